//! Axis environments.
//!
//! [`AxisEnv`] collects the options of one `axis` (or `\nextgroupplot`)
//! environment. The options derived from the axes itself are computed up
//! front; the children add theirs while they are compiled, and the whole set
//! is sorted when the opening code is finally written.

use crate::errors::Result;
use crate::figure::{
    Artist, Aspect, Axes, AxisBelow, AxisInfo, Figure, HAlign, LabelSide, Orientation,
    ScalarMapping, Scale, SubplotSpec, TickDirection, TickLabel, Ticks,
};
use crate::log::debug;
use crate::types::try_f2i;

use super::color::resolve_color;
use super::colormap::transcode_colormap;
use super::context::CompileState;
use super::defaults::{COLORBAR_ASPECT_THRESHOLD, TICK_TOLERANCE};
use super::style::linestyle_option;
use super::text::texify;

/// Options and framing of one axis environment
#[derive(Clone, Debug, Default)]
pub struct AxisEnv {
    pub options: Vec<String>,
    /// Opening text before the option list
    head: String,
    is_subplot: bool,
    /// One-based position in the subplot grid
    subplot_index: usize,
    nsubplots: usize,
}

impl AxisEnv {
    /// Append an option unless it is already present.
    pub fn add_option(&mut self, option: impl Into<String>) {
        let option = option.into();
        if !self.options.contains(&option) {
            self.options.push(option);
        }
    }

    fn extend_options(&mut self, options: impl IntoIterator<Item = String>) {
        for option in options {
            self.add_option(option);
        }
    }

    /// Replace the `{xy}min=…, {xy}max=…` limit option of one axis.
    pub fn set_limits(&mut self, xy: &str, option: impl Into<String>) {
        let prefix = format!("{xy}min=");
        self.options.retain(|o| !o.starts_with(&prefix));
        self.add_option(option);
    }

    /// Build the environment of `axes`, which must not be a colorbar.
    pub fn new(ctx: &mut CompileState, axes: &Axes, figure: &Figure) -> Result<Self> {
        let mut env = AxisEnv::default();
        let colorbar = find_colorbar(axes, figure);

        if let Some(spec) = axes.subplot {
            env.subplot(ctx, spec, colorbar.is_some());
        }
        if env.is_subplot {
            env.head.push_str("\n\\nextgroupplot");
        } else {
            env.head = ctx.flavor.start("axis");
        }

        if !axes.axis_on {
            env.add_option("hide x axis");
            env.add_option("hide y axis");
        } else {
            if !axes.xaxis.visible {
                env.add_option("hide x axis");
            }
            if !axes.yaxis.visible {
                env.add_option("hide y axis");
            }
        }

        if !axes.title.is_empty() {
            env.add_option(format!("title={{{}}}", texify(&axes.title)));
        }
        env.axis_labels(ctx, axes)?;
        env.limits(ctx, axes);

        if axes.axis_below == AxisBelow::Above {
            env.add_option("axis on top");
        }
        env.dimensions(ctx, axes);

        if axes.xaxis.label_side == LabelSide::High {
            env.add_option("axis x line=top");
        }
        if axes.yaxis.label_side == LabelSide::High {
            env.add_option("axis y line=right");
            env.add_option("ylabel near ticks");
            env.add_option("yticklabel pos=right");
        }

        env.ticks(ctx, axes);
        env.grid(ctx, axes)?;

        let spine = resolve_color(ctx, &axes.spine_color, None)?;
        if spine.name != "black" {
            env.add_option(format!("axis line style={{{}}}", spine.name));
        }
        let background = resolve_color(ctx, &axes.facecolor, None)?;
        if background.name != "white" {
            env.add_option(format!("axis background/.style={{fill={}}}", background.name));
        }

        if let Some((cbar_axes, mapping)) = colorbar {
            env.colorbar(ctx, cbar_axes, mapping)?;
        }
        Ok(env)
    }

    /// Subplot state machine: open a groupplot on the first subplot of a grid.
    fn subplot(&mut self, ctx: &mut CompileState, spec: SubplotSpec, has_colorbar: bool) {
        self.nsubplots = spec.count();
        if self.nsubplots <= 1 {
            return;
        }
        // An axes sharing its grid with nothing but its own colorbar is no group
        if self.nsubplots == 2 && has_colorbar {
            return;
        }
        self.is_subplot = true;
        self.subplot_index = spec.index + 1;
        if !ctx.is_in_groupplot_env {
            let mut group_style = vec![format!("group size={} by {}", spec.ncols, spec.nrows)];
            group_style.extend(ctx.extra_groupstyle_options.iter().cloned());
            self.head = format!(
                "{}[group style={{{}}}]",
                ctx.flavor.start("groupplot"),
                group_style.join(", ")
            );
            ctx.is_in_groupplot_env = true;
            ctx.add_pgfplots_lib("groupplots");
            debug!(nrows = spec.nrows, ncols = spec.ncols, "groupplot opened");
        }
    }

    fn axis_labels(&mut self, ctx: &mut CompileState, axes: &Axes) -> Result<()> {
        for (xy, axis, default_rotation) in [("x", &axes.xaxis, 0.0), ("y", &axes.yaxis, 90.0)] {
            if axis.label.is_empty() {
                continue;
            }
            let label = texify(&axis.label);
            let color = resolve_color(ctx, &axis.label_color, None)?;
            if color.name == "black" {
                self.add_option(format!("{xy}label={{{label}}}"));
            } else {
                self.add_option(format!("{xy}label=\\textcolor{{{}}}{{{label}}}", color.name));
            }
            if axis.label_rotation != default_rotation {
                let rotate = axis.label_rotation - default_rotation;
                self.add_option(format!("{xy}label style={{rotate={}}}", ctx.ff(rotate)));
            }
        }
        Ok(())
    }

    fn limits(&mut self, ctx: &CompileState, axes: &Axes) {
        for (xy, axis) in [("x", &axes.xaxis), ("y", &axes.yaxis)] {
            let (lo, hi) = axis.limits;
            self.add_option(format!(
                "{xy}min={}, {xy}max={}",
                ctx.ff(lo.min(hi)),
                ctx.ff(lo.max(hi))
            ));
            if lo > hi {
                self.add_option(format!("{xy} dir=reverse"));
            }
            if let Scale::Log { base } = axis.scale {
                self.add_option(format!("{xy}mode=log"));
                self.add_option(format!(
                    "log basis {xy}={{{}}}",
                    try_f2i(base, &ctx.float_format)
                ));
            }
        }

        if let Some(view) = &axes.view3d {
            let (lo, hi) = view.zlim;
            self.add_option(format!(
                "zmin={}, zmax={}",
                ctx.ff(lo.min(hi)),
                ctx.ff(lo.max(hi))
            ));
            if let Scale::Log { base } = view.zscale {
                self.add_option("zmode=log");
                self.add_option(format!("log basis z={{{}}}", try_f2i(base, &ctx.float_format)));
            }
            self.add_option(format!(
                "view={{{}}}{{{}}}",
                ctx.ff(view.azimuth),
                ctx.ff(view.elevation)
            ));
        }
    }

    /// `width`/`height` from the configured sizes, completing a missing one
    /// from the aspect ratio.
    fn dimensions(&mut self, ctx: &CompileState, axes: &Axes) {
        let alpha = axes.aspect.ratio().map(|ratio| {
            let (x0, x1) = axes.xaxis.limits;
            let (y0, y1) = axes.yaxis.limits;
            ratio * (y1 - y0) / (x1 - x0)
        });

        match (&ctx.axis_width, &ctx.axis_height) {
            (Some(width), Some(height)) => {
                self.add_option(format!("width={width}"));
                self.add_option(format!("height={height}"));
            }
            (Some(width), None) => {
                self.add_option(format!("width={width}"));
                if let Some(alpha) = alpha.filter(|a| a.is_finite()) {
                    if alpha == 1.0 {
                        self.add_option(format!("height={width}"));
                    } else {
                        self.add_option(format!("height={}*{width}", ctx.ff(alpha)));
                    }
                }
            }
            (None, Some(height)) => {
                self.add_option(format!("height={height}"));
                if let Some(alpha) = alpha.filter(|a| a.is_finite() && *a != 0.0) {
                    if alpha == 1.0 {
                        self.add_option(format!("width={height}"));
                    } else {
                        self.add_option(format!("width={}*{height}", ctx.ff(1.0 / alpha)));
                    }
                }
            }
            (None, None) => {}
        }
    }

    fn ticks(&mut self, ctx: &CompileState, axes: &Axes) {
        for (xy, axis) in [("x", &axes.xaxis), ("y", &axes.yaxis)] {
            self.extend_options(tick_options(ctx, xy, &axis.major, true));
            self.extend_options(tick_options(ctx, &format!("minor {xy}"), &axis.minor, false));
        }

        match axes.xaxis.tick_direction {
            TickDirection::In => {}
            TickDirection::Out => self.add_option("tick align=outside"),
            TickDirection::InOut => self.add_option("tick align=center"),
        }

        for (xy, axis) in [("x", &axes.xaxis), ("y", &axes.yaxis)] {
            if let Some(style) = ticklabel_style(ctx, xy, &axis.major.labels) {
                self.add_option(style);
            }
        }

        let x_pos = tick_position(&axes.xaxis);
        let y_pos = tick_position(&axes.yaxis);
        match (x_pos, y_pos) {
            (Some(x), Some(y)) if x == y => self.add_option(format!("tick pos={x}")),
            _ => {
                for (xy, pos) in [("x", x_pos), ("y", y_pos)] {
                    match pos {
                        Some(pos) => self.add_option(format!("{xy}tick pos={pos}")),
                        None => self.add_option(format!("{xy}majorticks=false")),
                    }
                }
            }
        }
    }

    fn grid(&mut self, ctx: &mut CompileState, axes: &Axes) -> Result<()> {
        for (xy, axis) in [("x", &axes.xaxis), ("y", &axes.yaxis)] {
            if axis.major_grid.is_some() {
                self.add_option(format!("{xy}majorgrids"));
            }
            if axis.minor_grid.is_some() {
                self.add_option(format!("{xy}minorgrids"));
            }
            let Some(style) = axis.major_grid.as_ref().or(axis.minor_grid.as_ref()) else {
                continue;
            };
            let mut parts = Vec::new();
            let color = resolve_color(ctx, &style.color, None)?;
            if color.name != "black" {
                parts.push(color.name);
            }
            if let Some(ls) = linestyle_option(ctx, &style.linestyle) {
                parts.push(ls);
            }
            if !parts.is_empty() {
                self.add_option(format!("{xy} grid style={{{}}}", parts.join(", ")));
            }
        }
        Ok(())
    }

    fn colorbar(
        &mut self,
        ctx: &mut CompileState,
        cbar_axes: &Axes,
        mapping: &ScalarMapping,
    ) -> Result<()> {
        let orientation = cbar_axes
            .colorbar
            .map(|c| c.orientation)
            .unwrap_or_default();
        let (xy, axis) = match orientation {
            Orientation::Horizontal => {
                self.add_option("colorbar horizontal");
                ("x", &cbar_axes.xaxis)
            }
            Orientation::Vertical => {
                self.add_option("colorbar");
                ("y", &cbar_axes.yaxis)
            }
        };

        // PGFPlots places colorbar ticks in point meta units
        let (lim0, lim1) = axis.limits;
        let (c0, c1) = mapping.clim;
        let rescale = |ticks: &Ticks| Ticks {
            locs: ticks
                .locs
                .iter()
                .map(|t| (t - lim0) / (lim1 - lim0) * (c1 - c0) + c0)
                .collect(),
            labels: ticks.labels.clone(),
        };

        let mut styles = tick_options(ctx, xy, &rescale(&axis.major), true);
        styles.extend(tick_options(
            ctx,
            &format!("minor {xy}"),
            &rescale(&axis.minor),
            false,
        ));

        self.add_option(transcode_colormap(ctx, &mapping.cmap)?.option());
        self.add_option(format!("point meta min={}", ctx.ff(c0)));
        self.add_option(format!("point meta max={}", ctx.ff(c1)));
        if !styles.is_empty() {
            self.add_option(format!("colorbar style={{{}}}", styles.join(",")));
        }
        Ok(())
    }

    /// Opening code with the sorted option list.
    pub fn begin_code(&mut self) -> String {
        let mut code = self.head.clone();
        if !self.options.is_empty() {
            self.options.sort();
            code.push_str(&format!("[\n{}\n]\n", self.options.join(",\n")));
        }
        code
    }

    /// Closing code; the last subplot of a grid closes the groupplot.
    pub fn end_code(&self, ctx: &mut CompileState) -> String {
        if !self.is_subplot {
            return format!("{}\n\n", ctx.flavor.end("axis"));
        }
        if self.subplot_index == self.nsubplots {
            ctx.is_in_groupplot_env = false;
            return format!("{}\n\n", ctx.flavor.end("groupplot"));
        }
        String::new()
    }
}

/// Whether an axes is a colorbar, by its marker or by its shape.
///
/// Without a marker an axes counts as a colorbar when its aspect is extreme
/// and the long axis has no ticks.
pub fn is_colorbar(axes: &Axes) -> bool {
    if axes.colorbar.is_some() {
        return true;
    }
    let Aspect::Ratio(aspect) = axes.aspect else {
        return false;
    };
    (aspect >= COLORBAR_ASPECT_THRESHOLD && axes.xaxis.major.locs.is_empty())
        || (aspect <= 1.0 / COLORBAR_ASPECT_THRESHOLD && axes.yaxis.major.locs.is_empty())
}

/// The colorbar axes attached to a mappable child of `axes`.
fn find_colorbar<'a>(axes: &'a Axes, figure: &'a Figure) -> Option<(&'a Axes, &'a ScalarMapping)> {
    axes.children.iter().find_map(|child| {
        let mapping = match child {
            Artist::Image(image) => Some(&image.mapping),
            Artist::QuadMesh(mesh) => Some(&mesh.mapping),
            Artist::PathCollection(collection) => collection.mapping.as_ref(),
            _ => None,
        }?;
        let cbar = figure.axes_by_id(mapping.colorbar?)?;
        Some((cbar, mapping))
    })
}

fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= TICK_TOLERANCE + TICK_TOLERANCE * b.abs()
}

/// Texified tick label, braced when it contains a list separator.
pub(super) fn tick_label(text: &str) -> String {
    let tex = texify(text);
    if tex.contains(',') {
        format!("{{{tex}}}")
    } else {
        tex
    }
}

/// Tick options for one tick set.
///
/// Positions and labels are only written when strict mode asks for them or
/// when a label cannot be reproduced from its position.
fn tick_options(ctx: &CompileState, xy: &str, ticks: &Ticks, major: bool) -> Vec<String> {
    let mut options = Vec::new();
    let mut labels = Vec::new();
    let mut label_required = false;

    for (loc, label) in ticks.locs.iter().zip(&ticks.labels) {
        if !label.visible {
            label_required = true;
            labels.push(String::new());
            continue;
        }
        let text = label.text.trim();
        if !text.is_empty() {
            match text.replace('\u{2212}', "-").parse::<f64>() {
                Ok(value) if is_close(*loc, value) => {}
                _ => label_required = true,
            }
        }
        labels.push(tick_label(&label.text));
    }

    if major && ticks.labels.is_empty() && !ticks.locs.is_empty() {
        options.push(format!("{xy}ticklabels={{}}"));
        options.push(format!("scaled {xy} ticks=manual:{{}}{{\\pgfmathparse{{#1}}}}"));
    }

    if ctx.strict || label_required {
        if ticks.locs.is_empty() {
            let empty = if major { "\\empty" } else { "{}" };
            options.push(format!("{xy}tick={empty}"));
        } else {
            let locs: Vec<String> = ticks.locs.iter().map(|t| ctx.ff(*t)).collect();
            options.push(format!("{xy}tick={{{}}}", locs.join(",")));
        }
        if label_required {
            options.push(format!("{xy}ticklabels={{{}}}", labels.join(",")));
        }
    }
    options
}

fn ticklabel_style(ctx: &CompileState, xy: &str, labels: &[TickLabel]) -> Option<String> {
    let first = labels.first()?;
    let mut values = Vec::new();

    if labels.iter().all(|l| l.rotation == first.rotation) {
        if first.rotation != 0.0 {
            values.push(format!("rotate={}", ctx.ff(first.rotation)));
        }
    } else {
        let rotations: Vec<String> = labels.iter().map(|l| ctx.ff(l.rotation)).collect();
        values.push(format!("rotate={{{},0}}[\\ticknum]", rotations.join(",")));
    }

    if labels.iter().all(|l| l.ha == first.ha) {
        let anchor = match first.ha {
            HAlign::Left => Some("west"),
            // y tick labels are right-aligned by default
            HAlign::Right if xy != "y" => Some("east"),
            _ => None,
        };
        if let Some(anchor) = anchor {
            values.push(format!("anchor={anchor}"));
        }
    }

    (!values.is_empty()).then(|| format!("{xy}ticklabel style={{{}}}", values.join(",")))
}

fn tick_position(axis: &AxisInfo) -> Option<&'static str> {
    match (axis.ticks_low, axis.ticks_high) {
        (true, true) => Some("both"),
        (true, false) => Some("left"),
        (false, true) => Some("right"),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{AxesId, ColorbarSpec, Colormap, GridStyle, QuadMesh};
    use crate::options::Options;

    fn state(options: Options) -> CompileState {
        CompileState::new(&options.with_filepath("x.tex"), &Figure::default()).unwrap()
    }

    fn env_for(ctx: &mut CompileState, axes: &Axes) -> AxisEnv {
        let figure = Figure::with_axes(axes.clone());
        AxisEnv::new(ctx, axes, &figure).unwrap()
    }

    #[test]
    fn default_axes_options_are_sorted() {
        let mut ctx = state(Options::new());
        let mut axes = Axes::new(AxesId(0)).with_limits((0.0, 1.0), (-1.0, 2.0));
        axes.title = "Growth_rate".into();
        let mut env = env_for(&mut ctx, &axes);
        assert_eq!(
            env.begin_code(),
            "\\begin{axis}[\n\
             tick align=outside,\n\
             tick pos=left,\n\
             title={Growth\\_rate},\n\
             xmin=0, xmax=1,\n\
             ymin=-1, ymax=2\n\
             ]\n"
        );
        assert_eq!(env.end_code(&mut ctx), "\\end{axis}\n\n");
    }

    #[test]
    fn reversed_limits_and_log_scale() {
        let mut ctx = state(Options::new());
        let mut axes = Axes::new(AxesId(0)).with_limits((5.0, 1.0), (1.0, 100.0));
        axes.yaxis.scale = Scale::LOG10;
        let env = env_for(&mut ctx, &axes);
        assert!(env.options.contains(&"xmin=1, xmax=5".to_string()));
        assert!(env.options.contains(&"x dir=reverse".to_string()));
        assert!(env.options.contains(&"ymode=log".to_string()));
        assert!(env.options.contains(&"log basis y={10}".to_string()));
        assert!(!env.options.iter().any(|o| o.starts_with("ytick=")));
    }

    #[test]
    fn labels_with_color_and_rotation() {
        let mut ctx = state(Options::new());
        let mut axes = Axes::new(AxesId(0));
        axes.xaxis.label = "time".into();
        axes.yaxis.label = "speed".into();
        axes.yaxis.label_color = "r".into();
        axes.yaxis.label_rotation = 0.0;
        let env = env_for(&mut ctx, &axes);
        assert!(env.options.contains(&"xlabel={time}".to_string()));
        assert!(env.options.contains(&"ylabel=\\textcolor{red}{speed}".to_string()));
        assert!(env.options.contains(&"ylabel style={rotate=-90}".to_string()));
    }

    #[test]
    fn aspect_completes_the_missing_dimension() {
        let mut options = Options::new();
        options.axis_width = Some("8cm".into());
        let mut ctx = state(options);
        let mut axes = Axes::new(AxesId(0)).with_limits((0.0, 2.0), (0.0, 1.0));
        axes.aspect = Aspect::Equal;
        let env = env_for(&mut ctx, &axes);
        assert!(env.options.contains(&"width=8cm".to_string()));
        assert!(env.options.contains(&"height=0.5*8cm".to_string()));
        assert_eq!(ctx.axis_height, None);
    }

    #[test]
    fn numeric_labels_matching_their_ticks_are_left_to_pgfplots() {
        let ctx = state(Options::new());
        let ticks = Ticks::labelled(vec![0.0, 0.5, 1.0], ["0.0", "0.5", "1.0"]);
        assert!(tick_options(&ctx, "x", &ticks, true).is_empty());

        let strict = state(Options::new().with_strict(true));
        assert_eq!(tick_options(&strict, "x", &ticks, true), vec!["xtick={0,0.5,1}"]);
        assert_eq!(
            tick_options(&strict, "minor x", &Ticks::default(), false),
            vec!["minor xtick={}"]
        );
        assert_eq!(tick_options(&strict, "y", &Ticks::default(), true), vec!["ytick=\\empty"]);
    }

    #[test]
    fn text_labels_force_explicit_ticks() {
        let ctx = state(Options::new());
        let ticks = Ticks::labelled(vec![0.0, 1.0], ["a, b", "\u{2212}1"]);
        assert_eq!(
            tick_options(&ctx, "x", &ticks, true),
            vec!["xtick={0,1}", "xticklabels={{a, b},\\ensuremath{-}1}"]
        );
    }

    #[test]
    fn missing_labels_suppress_the_multiplier() {
        let ctx = state(Options::new());
        let ticks = Ticks::new(vec![0.0, 1.0], Vec::new());
        assert_eq!(
            tick_options(&ctx, "x", &ticks, true),
            vec![
                "xticklabels={}",
                "scaled x ticks=manual:{}{\\pgfmathparse{#1}}"
            ]
        );
    }

    #[test]
    fn rotated_tick_labels_and_split_tick_positions() {
        let mut ctx = state(Options::new());
        let mut axes = Axes::new(AxesId(0));
        let mut labels = vec![TickLabel::new("a"), TickLabel::new("b")];
        for l in &mut labels {
            l.rotation = 45.0;
            l.ha = HAlign::Right;
        }
        axes.xaxis.major = Ticks::new(vec![0.0, 1.0], labels);
        axes.yaxis.ticks_high = true;
        axes.xaxis.tick_direction = TickDirection::In;
        let env = env_for(&mut ctx, &axes);
        assert!(env.options.contains(&"xticklabel style={rotate=45,anchor=east}".to_string()));
        assert!(env.options.contains(&"xtick pos=left".to_string()));
        assert!(env.options.contains(&"ytick pos=both".to_string()));
        assert!(!env.options.iter().any(|o| o.starts_with("tick align")));
    }

    #[test]
    fn grids_spines_and_background() {
        let mut ctx = state(Options::new());
        let mut axes = Axes::new(AxesId(0));
        axes.xaxis.major_grid = Some(GridStyle::default());
        axes.yaxis.minor_grid = Some(GridStyle {
            color: "k".into(),
            linestyle: crate::figure::LineStyle::Dashed,
            linewidth: 0.5,
        });
        axes.spine_color = "b".into();
        axes.facecolor = [0.8, 0.8, 0.8].into();
        let env = env_for(&mut ctx, &axes);
        for option in [
            "xmajorgrids",
            "x grid style={darkgray176}",
            "yminorgrids",
            "y grid style={dashed}",
            "axis line style={blue}",
            "axis background/.style={fill=lightgray204}",
        ] {
            assert!(env.options.contains(&option.to_string()), "{option}: {:?}", env.options);
        }
    }

    #[test]
    fn subplots_share_one_groupplot() {
        let figure = Figure::subplots(2, 2);
        let mut ctx = state(Options::new());
        let mut codes = Vec::new();
        for axes in figure.axes() {
            let mut env = AxisEnv::new(&mut ctx, axes, &figure).unwrap();
            codes.push((env.begin_code(), env.end_code(&mut ctx)));
        }
        assert!(codes[0].0.starts_with(
            "\\begin{groupplot}[group style={group size=2 by 2}]\n\\nextgroupplot[\n"
        ));
        for (begin, _) in &codes[1..] {
            assert!(begin.starts_with("\n\\nextgroupplot[\n"));
        }
        assert_eq!(codes[2].1, "");
        assert_eq!(codes[3].1, "\\end{groupplot}\n\n");
        assert!(!ctx.is_in_groupplot_env);
        assert!(ctx.pgfplots_libs.contains("groupplots"));
    }

    #[test]
    fn colorbar_axes_are_detected_and_attached() {
        let mut figure = Figure::default();
        let mut cbar = Axes::new(AxesId(1)).with_limits((0.0, 1.0), (0.0, 1.0));
        cbar.colorbar = Some(ColorbarSpec {
            orientation: Orientation::Vertical,
        });
        cbar.yaxis.major = Ticks::labelled(vec![0.0, 0.5, 1.0], ["low", "mid", "high"]);

        let mut mapping = ScalarMapping::new(Colormap::viridis(), (10.0, 20.0));
        mapping.colorbar = Some(AxesId(1));
        let mesh = QuadMesh::rectilinear(&[0.0, 1.0], &[0.0, 1.0], vec![15.0], mapping);
        let axes = Axes::new(AxesId(0)).with_child(mesh);
        figure.push(axes.clone());
        figure.push(cbar.clone());

        assert!(is_colorbar(&cbar));
        assert!(!is_colorbar(&axes));

        let mut ctx = state(Options::new());
        let env = AxisEnv::new(&mut ctx, &axes, &figure).unwrap();
        for option in [
            "colorbar",
            "colormap/viridis",
            "point meta min=10",
            "point meta max=20",
            "colorbar style={ytick={10,15,20},yticklabels={low,mid,high}}",
        ] {
            assert!(env.options.contains(&option.to_string()), "{option}: {:?}", env.options);
        }
    }

    #[test]
    fn colorbar_shape_heuristic() {
        let mut axes = Axes::new(AxesId(0));
        axes.aspect = Aspect::Ratio(20.0);
        assert!(is_colorbar(&axes));
        axes.xaxis.major = Ticks::labelled(vec![0.0], ["0"]);
        assert!(!is_colorbar(&axes));
    }
}
