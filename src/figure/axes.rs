//! Axes and per-axis (x / y) configuration.

use super::color::ColorSpec;
use super::line::LineStyle;
use super::text::HAlign;
use super::{Artist, AxesId};
use crate::types::Bbox;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Scale {
    #[default]
    Linear,
    Log {
        base: f64,
    },
}

impl Scale {
    pub const LOG10: Scale = Scale::Log { base: 10.0 };

    pub fn is_log(&self) -> bool {
        matches!(self, Scale::Log { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TickDirection {
    In,
    #[default]
    Out,
    InOut,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TickLabel {
    pub text: String,
    pub visible: bool,
    /// Degrees
    pub rotation: f64,
    pub ha: HAlign,
}

impl TickLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
            rotation: 0.0,
            ha: HAlign::Center,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Ticks {
    pub locs: Vec<f64>,
    pub labels: Vec<TickLabel>,
}

impl Ticks {
    pub fn new(locs: Vec<f64>, labels: Vec<TickLabel>) -> Self {
        Self { locs, labels }
    }

    /// Ticks labelled with the given strings.
    pub fn labelled<S: Into<String>>(locs: Vec<f64>, labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            locs,
            labels: labels.into_iter().map(TickLabel::new).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    pub color: ColorSpec,
    pub linestyle: LineStyle,
    pub linewidth: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            color: ColorSpec::Hex("#b0b0b0".into()),
            linestyle: LineStyle::Solid,
            linewidth: 0.8,
        }
    }
}

/// Which side of the plot an axis label (and its spine) sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LabelSide {
    /// Bottom for x, left for y
    #[default]
    Low,
    /// Top for x, right for y
    High,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisInfo {
    pub label: String,
    pub label_color: ColorSpec,
    /// Degrees
    pub label_rotation: f64,
    pub label_side: LabelSide,
    pub limits: (f64, f64),
    pub scale: Scale,
    pub major: Ticks,
    pub minor: Ticks,
    pub tick_direction: TickDirection,
    /// Major ticks drawn on the low (bottom/left) side
    pub ticks_low: bool,
    /// Major ticks drawn on the high (top/right) side
    pub ticks_high: bool,
    pub major_grid: Option<GridStyle>,
    pub minor_grid: Option<GridStyle>,
    /// Values are day numbers of a date axis
    pub dates: bool,
    pub visible: bool,
}

impl AxisInfo {
    fn with_label_rotation(label_rotation: f64) -> Self {
        Self {
            label: String::new(),
            label_color: ColorSpec::named("black"),
            label_rotation,
            label_side: LabelSide::Low,
            limits: (0.0, 1.0),
            scale: Scale::Linear,
            major: Ticks::default(),
            minor: Ticks::default(),
            tick_direction: TickDirection::Out,
            ticks_low: true,
            ticks_high: false,
            major_grid: None,
            minor_grid: None,
            dates: false,
            visible: true,
        }
    }

    pub fn x() -> Self {
        Self::with_label_rotation(0.0)
    }

    pub fn y() -> Self {
        Self::with_label_rotation(90.0)
    }

    pub fn with_limits(mut self, lo: f64, hi: f64) -> Self {
        self.limits = (lo, hi);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Aspect {
    #[default]
    Auto,
    Equal,
    /// Data-unit ratio of y to x
    Ratio(f64),
}

impl Aspect {
    pub fn ratio(&self) -> Option<f64> {
        match self {
            Aspect::Auto => None,
            Aspect::Equal => Some(1.0),
            Aspect::Ratio(r) => Some(*r),
        }
    }
}

/// Whether ticks and grid lines are drawn below the data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AxisBelow {
    Below,
    /// Below the lines, above the patches
    #[default]
    Line,
    Above,
}

/// Position of an axes inside a regular grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubplotSpec {
    pub nrows: usize,
    pub ncols: usize,
    /// Zero-based, row-major
    pub index: usize,
}

impl SubplotSpec {
    pub fn count(&self) -> usize {
        self.nrows * self.ncols
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Marks an axes as the colorbar of some mappable
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorbarSpec {
    pub orientation: Orientation,
}

/// Camera of a 3-D axes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View3d {
    /// Degrees
    pub elevation: f64,
    /// Degrees
    pub azimuth: f64,
    pub zlim: (f64, f64),
    pub zscale: Scale,
    pub box_aspect: [f64; 3],
}

impl Default for View3d {
    fn default() -> Self {
        Self {
            elevation: 30.0,
            azimuth: -60.0,
            zlim: (0.0, 1.0),
            zscale: Scale::Linear,
            box_aspect: [1.0, 1.0, 1.0],
        }
    }
}

/// Grouping of children produced together (a bar series, an errorbar set)
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    pub kind: ContainerKind,
    pub label: String,
    /// Indices into the axes' children
    pub members: Vec<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    Bar,
    Errorbar,
    Stem,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    pub id: AxesId,
    /// Placement in figure fractions
    pub position: Bbox,
    pub title: String,
    pub xaxis: AxisInfo,
    pub yaxis: AxisInfo,
    pub aspect: Aspect,
    pub facecolor: ColorSpec,
    pub spine_color: ColorSpec,
    pub axis_below: AxisBelow,
    /// `false` hides both axes entirely
    pub axis_on: bool,
    pub subplot: Option<SubplotSpec>,
    pub colorbar: Option<ColorbarSpec>,
    pub view3d: Option<View3d>,
    pub containers: Vec<Container>,
    pub children: Vec<Artist>,
    pub zorder: f64,
    pub visible: bool,
}

impl Axes {
    pub fn new(id: AxesId) -> Self {
        Self {
            id,
            position: Bbox::new(0.125, 0.11, 0.9, 0.88),
            title: String::new(),
            xaxis: AxisInfo::x(),
            yaxis: AxisInfo::y(),
            aspect: Aspect::Auto,
            facecolor: ColorSpec::named("white"),
            spine_color: ColorSpec::named("black"),
            axis_below: AxisBelow::Line,
            axis_on: true,
            subplot: None,
            colorbar: None,
            view3d: None,
            containers: Vec::new(),
            children: Vec::new(),
            zorder: 0.0,
            visible: true,
        }
    }

    pub fn with_limits(mut self, xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        self.xaxis.limits = xlim;
        self.yaxis.limits = ylim;
        self
    }

    /// Append a child and return its index.
    pub fn push(&mut self, artist: impl Into<Artist>) -> usize {
        self.children.push(artist.into());
        self.children.len() - 1
    }

    pub fn with_child(mut self, artist: impl Into<Artist>) -> Self {
        self.push(artist);
        self
    }

    /// Add a group of children as one container (e.g. a bar series).
    pub fn push_container(
        &mut self,
        kind: ContainerKind,
        label: impl Into<String>,
        artists: impl IntoIterator<Item = Artist>,
    ) {
        let members = artists.into_iter().map(|a| self.push(a)).collect();
        self.containers.push(Container {
            kind,
            label: label.into(),
            members,
        });
    }
}
