//! Figure cleaning before export
//!
//! Removes data that cannot be seen, pulls far-away points toward the visible
//! box, drops points that would land on the same output pixel, and rounds the
//! remaining coordinates. The figure is modified in place; the result renders
//! the same but produces much smaller files.
//!
//! - `geometry`: box tests, clipping and the 3-D camera
//! - `simplify`: Opheim line reduction, marker pixelation, rounding

pub mod geometry;
pub mod simplify;

use glam::{DMat4, DVec2, DVec3};

use crate::errors::{ConfigError, Error};
use crate::figure::{
    Artist, Axes, Container, ContainerKind, Figure, Line2D, PatchKind, PathCollection, Scale,
    XData,
};
use crate::log::{debug, warn};

use geometry::{VisualBox, project, projection_matrix};
use simplify::{least_significant_bit, opheim, pixelate, round_to};

/// Slack on the visible box so points on its edge survive rounding noise
const BOX_TOLERANCE: f64 = 1e-10;
/// How far beyond the visible box far-away points are pulled in
const MOVE_MARGIN: f64 = 0.1;
/// Marker grid cells per output pixel
const MARKER_CELLS_PER_PIXEL: f64 = 2.0;

/// Output resolution the cleaned figure is tuned for
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetResolution {
    /// Dots per inch, applied to the figure size
    Dpi(f64),
    /// Canvas width and height in pixels
    Pixels(f64, f64),
}

impl Default for TargetResolution {
    fn default() -> Self {
        TargetResolution::Dpi(600.0)
    }
}

impl From<f64> for TargetResolution {
    fn from(dpi: f64) -> Self {
        TargetResolution::Dpi(dpi)
    }
}

impl TargetResolution {
    /// Canvas size in pixels for `figure`.
    fn canvas(&self, figure: &Figure) -> Result<DVec2, ConfigError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        let canvas = match *self {
            TargetResolution::Dpi(dpi) if valid(dpi) => figure.size_inches * dpi,
            TargetResolution::Pixels(w, h) if valid(w) && valid(h) => DVec2::new(w, h),
            _ => {
                return Err(ConfigError::InvalidTargetResolution {
                    value: format!("{self:?}"),
                });
            }
        };
        Ok(canvas)
    }
}

/// Clean every axes of `figure` in place.
///
/// `scale_precision` scales the rounding resolution; zero or less keeps full
/// precision.
pub fn clean_figure(
    figure: &mut Figure,
    target: TargetResolution,
    scale_precision: f64,
) -> Result<(), Error> {
    let canvas = target.canvas(figure)?;
    debug!(width = canvas.x, height = canvas.y, "cleaning figure");
    for axes in figure.axes_mut() {
        clean_axes(axes, canvas, scale_precision);
    }
    Ok(())
}

fn clean_axes(axes: &mut Axes, canvas: DVec2, alpha: f64) {
    let space = Space::new(axes);

    let Axes {
        containers,
        children,
        ..
    } = axes;
    for container in containers.iter() {
        clean_container(container, children, alpha);
    }

    for child in children.iter_mut() {
        match child {
            Artist::Line(line) if line.visible => clean_line(line, &space, canvas, alpha),
            Artist::PathCollection(collection) if collection.visible => {
                clean_scatter(collection, &space, canvas, alpha)
            }
            Artist::PatchCollection(_) | Artist::LineCollection(_) | Artist::QuadMesh(_) => {
                warn!("cleaning of this collection type is not supported, leaving it as is");
            }
            _ => {}
        }
    }
}

fn to_visual(value: f64, log: bool) -> f64 {
    if log { value.log10() } else { value }
}

fn from_visual(value: f64, log: bool) -> f64 {
    if log { 10f64.powf(value) } else { value }
}

/// Mapping between data coordinates and the visual plane of one axes.
///
/// Log axes are linearized; 3-D axes are projected through the view camera.
struct Space {
    log: [bool; 3],
    camera: Option<DMat4>,
    bounds: VisualBox,
}

impl Space {
    fn new(axes: &Axes) -> Self {
        let is_log = |scale: &Scale| matches!(scale, Scale::Log { .. });
        let zlog = axes.view3d.as_ref().is_some_and(|v| is_log(&v.zscale));
        let log = [is_log(&axes.xaxis.scale), is_log(&axes.yaxis.scale), zlog];
        let limits = |(lo, hi): (f64, f64), log: bool| (to_visual(lo, log), to_visual(hi, log));
        let xlim = limits(axes.xaxis.limits, log[0]);
        let ylim = limits(axes.yaxis.limits, log[1]);

        let Some(view) = &axes.view3d else {
            return Self {
                log,
                camera: None,
                bounds: VisualBox::new(xlim, ylim),
            };
        };

        let zlim = limits(view.zlim, log[2]);
        let ranges = DVec3::new(xlim.1 - xlim.0, ylim.1 - ylim.0, zlim.1 - zlim.0).abs();
        let camera = projection_matrix(view, ranges);
        let corners = (0..8).map(|k| {
            let pick = |bit: usize, (lo, hi): (f64, f64)| if k & bit == 0 { lo } else { hi };
            project(&camera, DVec3::new(pick(1, xlim), pick(2, ylim), pick(4, zlim)))
        });
        Self {
            log,
            bounds: VisualBox::enclosing(corners),
            camera: Some(camera),
        }
    }

    fn is_3d(&self) -> bool {
        self.camera.is_some()
    }

    fn visual(&self, data: DVec3) -> DVec2 {
        let v = DVec3::new(
            to_visual(data.x, self.log[0]),
            to_visual(data.y, self.log[1]),
            to_visual(data.z, self.log[2]),
        );
        match &self.camera {
            Some(camera) => project(camera, v),
            None => v.truncate(),
        }
    }

    /// Inverse of [`Space::visual`] for 2-D axes.
    fn sample_at(&self, visual: DVec2, source: Option<usize>) -> Sample {
        Sample {
            data: DVec3::new(
                from_visual(visual.x, self.log[0]),
                from_visual(visual.y, self.log[1]),
                0.0,
            ),
            visual,
            source,
        }
    }
}

/// One data point with its visual position and the index it came from
#[derive(Clone, Copy, Debug)]
struct Sample {
    data: DVec3,
    visual: DVec2,
    /// `None` for inserted line breaks
    source: Option<usize>,
}

impl Sample {
    fn gap() -> Self {
        Self {
            data: DVec3::NAN,
            visual: DVec2::NAN,
            source: None,
        }
    }

    fn is_gap(&self) -> bool {
        self.source.is_none()
    }
}

/// Collapse runs of breaks and strip them from both ends.
fn remove_redundant_gaps(samples: Vec<Sample>) -> Vec<Sample> {
    let mut out: Vec<Sample> = Vec::with_capacity(samples.len());
    for sample in samples {
        let after_gap = out.last().is_none_or(Sample::is_gap);
        if sample.is_gap() && after_gap {
            continue;
        }
        out.push(sample);
    }
    if out.last().is_some_and(Sample::is_gap) {
        out.pop();
    }
    out
}

/// Drop points that cannot be seen.
///
/// For lines, a point is also kept when a segment touching it is visible. Each
/// run of removed points leaves one break behind so the line is not joined
/// across the hole.
fn prune_outside_box(bounds: &VisualBox, samples: Vec<Sample>, has_lines: bool) -> Vec<Sample> {
    let relaxed = bounds.relaxed(BOX_TOLERANCE);
    let inside: Vec<bool> = samples.iter().map(|s| relaxed.contains(s.visual)).collect();
    let mut keep = inside.clone();
    if has_lines {
        for i in 1..samples.len() {
            let (a, b) = (samples[i - 1].visual, samples[i].visual);
            let crosses = a.is_finite() && b.is_finite() && bounds.crossed_by(a, b);
            if inside[i - 1] || inside[i] || crosses {
                keep[i - 1] = true;
                keep[i] = true;
            }
        }
    }

    let mut out = Vec::with_capacity(samples.len());
    let mut dropping = false;
    for (sample, keep) in samples.into_iter().zip(keep) {
        if keep {
            out.push(sample);
            dropping = false;
        } else if !dropping {
            out.push(Sample::gap());
            dropping = true;
        }
    }
    remove_redundant_gaps(out)
}

/// Replace points far outside the box by where their segments enter it.
fn move_points_closer(space: &Space, samples: Vec<Sample>) -> Vec<Sample> {
    let large = space.bounds.extended(MOVE_MARGIN);
    let is_far = |s: &Sample| !s.is_gap() && !large.contains(s.visual);
    if !samples.iter().any(is_far) {
        return samples;
    }

    let mut out = Vec::with_capacity(samples.len() + 4);
    for (i, sample) in samples.iter().enumerate() {
        if !is_far(sample) {
            out.push(*sample);
            continue;
        }
        if let Some(previous) = i.checked_sub(1).map(|k| samples[k]).filter(|s| !s.is_gap()) {
            if let Some((_, end)) = large.clip(previous.visual, sample.visual) {
                out.push(space.sample_at(end, sample.source));
            }
        }
        out.push(Sample::gap());
        if let Some(next) = samples.get(i + 1).filter(|s| !s.is_gap()) {
            if let Some((start, _)) = large.clip(sample.visual, next.visual) {
                out.push(space.sample_at(start, sample.source));
            }
        }
    }
    remove_redundant_gaps(out)
}

/// Drop points that do not change the picture at the target resolution.
///
/// Pure marker plots are pixelated, pure lines are Opheim-simplified per
/// unbroken run. Plots with both lines and markers are left alone.
fn simplify(space: &Space, samples: Vec<Sample>, lines: bool, markers: bool, canvas: DVec2) -> Vec<Sample> {
    let size = space.bounds.size();
    if lines == markers || samples.is_empty() || !(size.x > 0.0 && size.y > 0.0) {
        return samples;
    }
    let pixels_per_unit = canvas / size;

    if markers {
        let visual: Vec<DVec2> = samples.iter().map(|s| s.visual).collect();
        let mask = pixelate(&visual, pixels_per_unit * MARKER_CELLS_PER_PIXEL);
        return samples
            .into_iter()
            .zip(mask)
            .filter_map(|(s, keep)| keep.then_some(s))
            .collect();
    }

    let tol = (1.0 / pixels_per_unit.x).min(1.0 / pixels_per_unit.y);
    let mut out = Vec::with_capacity(samples.len());
    for run in samples.split(Sample::is_gap).filter(|run| !run.is_empty()) {
        if !out.is_empty() {
            out.push(Sample::gap());
        }
        let visual: Vec<DVec2> = run.iter().map(|s| s.visual).collect();
        let mask = opheim(&visual, tol);
        out.extend(run.iter().zip(mask).filter_map(|(s, keep)| keep.then_some(*s)));
    }
    out
}

/// Round coordinates to the resolution of the largest one, in visual space.
fn limit_precision(samples: &mut [Sample], log: [bool; 3], dims: usize, alpha: f64) {
    let values = samples
        .iter()
        .flat_map(|s| (0..dims).map(move |k| to_visual(s.data[k], log[k])));
    let Some(lsb) = least_significant_bit(values, alpha) else {
        return;
    };
    for sample in samples.iter_mut() {
        for k in 0..dims {
            let v = to_visual(sample.data[k], log[k]);
            if v.is_finite() {
                sample.data[k] = from_visual(round_to(v, lsb), log[k]);
            }
        }
    }
}

fn clean_line(line: &mut Line2D, space: &Space, canvas: DVec2, alpha: f64) {
    let XData::Numeric(xs) = &line.xdata else {
        warn!(label = %line.label, "cleaning lines with non-numeric x data is not supported");
        return;
    };
    let ys = line.y_with_gaps();
    let n = xs.len().min(ys.len());
    let samples: Vec<Sample> = (0..n)
        .map(|i| {
            let z = line
                .zdata
                .as_ref()
                .and_then(|z| z.get(i).copied())
                .unwrap_or(0.0);
            let data = DVec3::new(xs[i], ys[i], z);
            Sample {
                data,
                visual: space.visual(data),
                source: Some(i),
            }
        })
        .collect();

    let has_lines = line.linestyle.is_visible();
    let samples = prune_outside_box(&space.bounds, samples, has_lines);
    let samples = if space.is_3d() {
        samples
    } else {
        move_points_closer(space, samples)
    };
    let mut samples = simplify(space, samples, has_lines, line.has_marker(), canvas);
    let dims = if space.is_3d() { 3 } else { 2 };
    limit_precision(&mut samples, space.log, dims, alpha);

    debug!(label = %line.label, before = n, after = samples.len(), "cleaned line");
    line.xdata = XData::Numeric(samples.iter().map(|s| s.data.x).collect());
    line.ydata = samples.iter().map(|s| s.data.y).collect();
    line.ymask = None;
    if line.zdata.is_some() {
        line.zdata = Some(samples.iter().map(|s| s.data.z).collect());
    }
}

/// Keep the per-point entries of `values` at `kept`; broadcast values stay.
fn select<T: Clone>(values: &mut Vec<T>, kept: &[usize], n: usize) {
    if values.len() == n && n != 1 {
        *values = kept.iter().map(|&i| values[i].clone()).collect();
    }
}

fn clean_scatter(collection: &mut PathCollection, space: &Space, canvas: DVec2, alpha: f64) {
    if space.is_3d() {
        warn!(label = %collection.label, "cleaning 3-D scatter plots is not supported");
        return;
    }
    let n = collection.offsets.len();
    let samples: Vec<Sample> = collection
        .offsets
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let data = p.extend(0.0);
            Sample {
                data,
                visual: space.visual(data),
                source: Some(i),
            }
        })
        .collect();

    let samples: Vec<Sample> = prune_outside_box(&space.bounds, samples, false)
        .into_iter()
        .filter(|s| !s.is_gap())
        .collect();
    let mut samples = simplify(space, samples, false, true, canvas);
    limit_precision(&mut samples, space.log, 2, alpha);

    let kept: Vec<usize> = samples.iter().filter_map(|s| s.source).collect();
    debug!(label = %collection.label, before = n, after = kept.len(), "cleaned scatter");
    collection.offsets = samples.iter().map(|s| s.data.truncate()).collect();
    select(&mut collection.sizes, &kept, n);
    select(&mut collection.edgecolors, &kept, n);
    select(&mut collection.facecolors, &kept, n);
    select(&mut collection.linestyles, &kept, n);
    select(&mut collection.linewidths, &kept, n);
    if let Some(array) = collection.array.as_mut() {
        select(array, &kept, n);
    }
}

fn clean_container(container: &Container, children: &mut [Artist], alpha: f64) {
    if container.kind != ContainerKind::Bar {
        warn!(kind = ?container.kind, "cleaning of this container type is not supported");
        return;
    }
    let rectangle = |artist: &Artist| match artist {
        Artist::Patch(patch) => match patch.kind {
            PatchKind::Rectangle {
                x,
                y,
                width,
                height,
            } => Some([x, y, width, height]),
            _ => None,
        },
        _ => None,
    };
    let values = container
        .members
        .iter()
        .filter_map(|&i| children.get(i).and_then(rectangle))
        .flatten();
    let Some(lsb) = least_significant_bit(values, alpha) else {
        return;
    };
    for &i in &container.members {
        if let Some(Artist::Patch(patch)) = children.get_mut(i) {
            if let PatchKind::Rectangle {
                x,
                y,
                width,
                height,
            } = &mut patch.kind
            {
                for v in [x, y, width, height] {
                    *v = round_to(*v, lsb);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{AxesId, LineStyle, Patch, View3d};

    fn unit_axes() -> Axes {
        Axes::new(AxesId(0)).with_limits((0.0, 1.0), (0.0, 1.0))
    }

    fn line_of(figure: &Figure) -> &Line2D {
        match &figure.axes().next().unwrap().children[0] {
            Artist::Line(line) => line,
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn invisible_tail_is_cut_and_line_straightened() {
        let xs: Vec<f64> = (0..=10).map(f64::from).collect();
        let axes = Axes::new(AxesId(0))
            .with_limits((0.0, 5.0), (0.0, 5.0))
            .with_child(Line2D::new(xs.clone(), xs));
        let mut figure = Figure::with_axes(axes);
        clean_figure(&mut figure, TargetResolution::Dpi(600.0), 1.0).unwrap();

        let line = line_of(&figure);
        assert_eq!(line.xdata, XData::Numeric(vec![0.0, 5.5]));
        assert_eq!(line.ydata, vec![0.0, 5.5]);
    }

    #[test]
    fn hidden_middle_leaves_one_break() {
        let line = Line2D::new(vec![0.2, 0.4, 5.0, 6.0, 7.0, 0.6, 0.8], vec![0.5; 7]);
        let mut figure = Figure::with_axes(unit_axes().with_child(line));
        clean_figure(&mut figure, TargetResolution::Dpi(600.0), 0.0).unwrap();

        let line = line_of(&figure);
        let XData::Numeric(xs) = &line.xdata else {
            panic!("numeric x expected");
        };
        let breaks = xs.iter().filter(|x| x.is_nan()).count();
        assert_eq!(breaks, 1, "{xs:?}");
        assert_eq!(xs.first(), Some(&0.2));
        assert_eq!(xs.last(), Some(&0.8));
    }

    #[test]
    fn overlapping_markers_are_merged() {
        let line = Line2D::new(vec![0.0, 0.0001, 1.0], vec![0.0, 0.0001, 1.0])
            .with_linestyle(LineStyle::None)
            .with_marker("o");
        let mut figure = Figure::with_axes(unit_axes().with_child(line));
        clean_figure(&mut figure, TargetResolution::Pixels(100.0, 100.0), 1.0).unwrap();

        let line = line_of(&figure);
        assert_eq!(line.xdata, XData::Numeric(vec![0.0, 1.0]));
        assert_eq!(line.ydata, vec![0.0, 1.0]);
    }

    #[test]
    fn scatter_attributes_follow_their_points() {
        let collection = PathCollection {
            offsets: vec![DVec2::new(0.5, 0.5), DVec2::new(3.0, 3.0), DVec2::new(0.6, 0.6)],
            sizes: vec![1.0, 2.0, 3.0],
            array: Some(vec![10.0, 20.0, 30.0]),
            ..PathCollection::default()
        };
        let mut figure = Figure::with_axes(unit_axes().with_child(collection));
        clean_figure(&mut figure, TargetResolution::Dpi(100.0), 0.0).unwrap();

        let Artist::PathCollection(collection) = &figure.axes().next().unwrap().children[0] else {
            panic!("expected a scatter");
        };
        assert_eq!(
            collection.offsets,
            vec![DVec2::new(0.5, 0.5), DVec2::new(0.6, 0.6)]
        );
        assert_eq!(collection.sizes, vec![1.0, 3.0]);
        assert_eq!(collection.array, Some(vec![10.0, 30.0]));
        // single broadcast color is left alone
        assert_eq!(collection.facecolors.len(), 1);
    }

    #[test]
    fn straight_3d_line_keeps_its_endpoints() {
        let mut line = Line2D::new(vec![0.0, 0.5, 1.0], vec![0.0, 0.5, 1.0]);
        line.zdata = Some(vec![0.0, 0.5, 1.0]);
        let mut axes = unit_axes().with_child(line);
        axes.view3d = Some(View3d::default());
        let mut figure = Figure::with_axes(axes);
        clean_figure(&mut figure, TargetResolution::default(), 1.0).unwrap();

        let line = line_of(&figure);
        assert_eq!(line.xdata, XData::Numeric(vec![0.0, 1.0]));
        assert_eq!(line.zdata, Some(vec![0.0, 1.0]));
    }

    #[test]
    fn bar_coordinates_are_rounded() {
        let mut axes = unit_axes();
        axes.push_container(
            ContainerKind::Bar,
            "bars",
            [
                Artist::from(Patch::bar(1.0001, 0.0, 0.5, 1.0, "C0")),
                Artist::from(Patch::bar(2.0, 0.0, 0.5, 1_099_511_627_776.0, "C0")),
            ],
        );
        let mut figure = Figure::with_axes(axes);
        clean_figure(&mut figure, TargetResolution::default(), 1.0).unwrap();

        let Artist::Patch(patch) = &figure.axes().next().unwrap().children[0] else {
            panic!("expected a bar");
        };
        let PatchKind::Rectangle { x, width, .. } = patch.kind else {
            panic!("expected a rectangle");
        };
        assert_eq!(x, 1.0);
        assert_eq!(width, 0.5);
    }

    #[test]
    fn target_resolution_must_be_positive() {
        let mut figure = Figure::default();
        for target in [
            TargetResolution::Dpi(0.0),
            TargetResolution::Dpi(f64::NAN),
            TargetResolution::Pixels(100.0, -1.0),
        ] {
            let err = clean_figure(&mut figure, target, 1.0).unwrap_err();
            assert!(matches!(
                err,
                Error::Config(ConfigError::InvalidTargetResolution { .. })
            ));
        }
    }
}
