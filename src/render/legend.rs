//! Legend placement and style, emitted as options of the enclosing axis.

use glam::DVec2;

use crate::errors::Result;
use crate::figure::{HAlign, Legend, LegendLoc};
use crate::log::{debug, warn};
use crate::types::Bbox;

use super::color::resolve_color;
use super::context::CompileState;
use super::defaults::LEGEND_PAD;

/// Legend position in axes fractions and the TikZ anchor placed there.
///
/// Upper right is PGFPlots' own default and yields `None`.
fn placement(loc: LegendLoc) -> Option<(DVec2, &'static str)> {
    let pad = LEGEND_PAD;
    let (x, y, anchor) = match loc.0 {
        2 => (pad, 1.0 - pad, "north west"),
        3 => (pad, pad, "south west"),
        4 => (1.0 - pad, pad, "south east"),
        5 => (1.0 - pad, 0.5, "west"),
        6 => (3.0 * pad, 0.5, "east"),
        7 => (1.0 - 3.0 * pad, 0.5, "west"),
        8 => (0.5, 3.0 * pad, "south"),
        9 => (0.5, 1.0 - 3.0 * pad, "north"),
        10 => (0.5, 0.5, "center"),
        _ => return None,
    };
    Some((DVec2::new(x, y), anchor))
}

/// Key point of a box for a location code: a corner, an edge center or the center.
fn key_point(bbox: &Bbox, loc: u8) -> DVec2 {
    let (lo, hi) = (bbox.min(), bbox.max());
    let mid = (lo + hi) * 0.5;
    match loc {
        1 => hi,
        2 => DVec2::new(lo.x, hi.y),
        3 => lo,
        4 => DVec2::new(hi.x, lo.y),
        6 => DVec2::new(lo.x, mid.y),
        7 => DVec2::new(hi.x, mid.y),
        8 => DVec2::new(mid.x, lo.y),
        9 => DVec2::new(mid.x, hi.y),
        _ => mid,
    }
}

/// Resolve "best" to the location whose key point of the rendered legend
/// frame lies closest to the matching key point of the axes box.
fn best_location(legend: &Legend, axes_px: &Bbox) -> LegendLoc {
    let Some(frame) = legend.window_extent else {
        debug!("legend extent unknown, assuming upper right");
        return LegendLoc::UPPER_RIGHT;
    };
    let mut best = (1, f64::INFINITY);
    for loc in [1, 2, 3, 4, 6, 7, 8, 9, 10] {
        let d = key_point(axes_px, loc).distance(key_point(&frame, loc));
        if d < best.1 {
            best = (loc, d);
        }
    }
    LegendLoc(best.0)
}

fn cell_alignment(legend: &Legend) -> Option<HAlign> {
    let mut entries = legend.entries.iter();
    let first = entries.next()?.ha;
    if entries.any(|e| e.ha != first) {
        warn!("varying horizontal alignments in the legend, using the default");
        return None;
    }
    Some(first)
}

/// Add the legend options to the enclosing axis.
///
/// `figure_px` is the figure size in display pixels, the frame of reference of
/// the legend's measured extent.
pub fn draw_legend(ctx: &mut CompileState, legend: &Legend, figure_px: DVec2) -> Result<()> {
    let loc = if legend.loc == LegendLoc::BEST {
        let axes_px = ctx
            .scope
            .as_ref()
            .map(|s| s.position.scaled(figure_px.x, figure_px.y))
            .unwrap_or(Bbox::UNIT);
        best_location(legend, &axes_px)
    } else {
        legend.loc
    };

    let mut position = placement(loc);
    if let Some(anchor_point) = legend.bbox_to_anchor {
        let anchor = position.map(|(_, a)| a);
        position = Some((anchor_point, anchor.unwrap_or("")));
    }

    let mut style = Vec::new();
    if let Some(alpha) = legend.frame_alpha {
        style.push(format!("fill opacity={}", ctx.ff(alpha)));
    }
    style.push("draw opacity=1".to_string());
    style.push("text opacity=1".to_string());
    if let Some((at, anchor)) = position {
        style.push(format!("at={{({},{})}}", ctx.ff(at.x), ctx.ff(at.y)));
        if !anchor.is_empty() {
            style.push(format!("anchor={anchor}"));
        }
    }

    if legend.frame_on {
        let edge = resolve_color(ctx, &legend.edgecolor, None)?;
        if edge.name != "black" {
            style.push(format!("draw={}", edge.name));
        }
    } else {
        style.push("draw=none".to_string());
    }
    let face = resolve_color(ctx, &legend.facecolor, None)?;
    if face.name != "white" {
        style.push(format!("fill={}", face.name));
    }

    if let Some(align) = cell_alignment(legend) {
        ctx.add_axis_option(format!("legend cell align={{{}}}", align.as_str()));
    }
    if legend.ncols > 1 {
        ctx.add_axis_option(format!("legend columns={}", legend.ncols));
    }

    let option = if style.len() == 1 {
        format!("legend style={{{}}}", style[0])
    } else {
        format!("legend style={{\n  {}\n}}", style.join(",\n  "))
    };
    ctx.add_axis_option(option);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Axes, AxesId, Figure};
    use crate::options::Options;
    use crate::render::axes::AxisEnv;
    use crate::render::context::AxesScope;

    fn state(axes: &Axes) -> CompileState {
        let mut ctx =
            CompileState::new(&Options::new().with_filepath("x.tex"), &Figure::default()).unwrap();
        ctx.scope = Some(AxesScope::new(axes));
        ctx.current_axes = Some(AxisEnv::default());
        ctx
    }

    fn options(ctx: &CompileState) -> Vec<String> {
        ctx.current_axes.as_ref().unwrap().options.clone()
    }

    #[test]
    fn upper_left_legend_style() {
        let axes = Axes::new(AxesId(0));
        let mut ctx = state(&axes);
        let legend = Legend::for_labels(["a"]).with_loc(LegendLoc::UPPER_LEFT);
        draw_legend(&mut ctx, &legend, DVec2::new(640.0, 480.0)).unwrap();
        assert_eq!(
            options(&ctx),
            vec![
                "legend cell align={left}".to_string(),
                "legend style={\n  fill opacity=0.8,\n  draw opacity=1,\n  text opacity=1,\n  at={(0.03,0.97)},\n  anchor=north west,\n  draw=lightgray204\n}"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn best_without_extent_is_upper_right() {
        let axes = Axes::new(AxesId(0));
        let mut ctx = state(&axes);
        let mut legend = Legend::for_labels(["a"]);
        legend.frame_on = false;
        legend.ncols = 2;
        draw_legend(&mut ctx, &legend, DVec2::new(640.0, 480.0)).unwrap();
        let opts = options(&ctx);
        assert!(opts.contains(&"legend columns=2".to_string()));
        let style = opts.iter().find(|o| o.starts_with("legend style")).unwrap();
        assert!(!style.contains("at="));
        assert!(style.contains("draw=none"));
    }

    #[test]
    fn best_picks_the_nearest_corner() {
        let axes = Axes::new(AxesId(0));
        let mut ctx = state(&axes);
        // axes box in pixels is (80, 52.8)-(576, 422.4); legend hugs lower left
        let mut legend = Legend::for_labels(["a"]);
        legend.window_extent = Some(Bbox::new(85.0, 58.0, 160.0, 90.0));
        draw_legend(&mut ctx, &legend, DVec2::new(640.0, 480.0)).unwrap();
        let opts = options(&ctx);
        let style = opts.iter().find(|o| o.starts_with("legend style")).unwrap();
        assert!(style.contains("anchor=south west"), "{style}");
    }

    #[test]
    fn bbox_to_anchor_moves_the_legend() {
        let axes = Axes::new(AxesId(0));
        let mut ctx = state(&axes);
        let mut legend = Legend::for_labels(["a"]).with_loc(LegendLoc(2));
        legend.bbox_to_anchor = Some(DVec2::new(1.05, 1.0));
        draw_legend(&mut ctx, &legend, DVec2::new(640.0, 480.0)).unwrap();
        let opts = options(&ctx);
        let style = opts.iter().find(|o| o.starts_with("legend style")).unwrap();
        assert!(style.contains("at={(1.05,1)},\n  anchor=north west"));
    }
}
