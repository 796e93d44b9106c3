//! Filled shapes: rectangles, ellipses, circles, generic paths and arrows.

use glam::DVec2;

use super::color::ColorSpec;
use super::line::LineStyle;
use super::path::Path;

#[derive(Clone, Debug, PartialEq)]
pub enum PatchKind {
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Ellipse {
        center: DVec2,
        width: f64,
        height: f64,
        /// Degrees, counter-clockwise
        angle: f64,
    },
    Circle {
        center: DVec2,
        radius: f64,
    },
    /// Polygons, wedges and anything else described by a path
    Path(Path),
    /// Annotation-style arrow between two points
    FancyArrow {
        arrowstyle: String,
        path: Path,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Patch {
    pub kind: PatchKind,
    pub label: String,
    pub zorder: f64,
    pub visible: bool,
    pub edgecolor: ColorSpec,
    pub facecolor: ColorSpec,
    pub alpha: Option<f64>,
    pub linewidth: f64,
    pub linestyle: LineStyle,
    /// Hatch pattern string such as `"/"` or `"xx"`
    pub hatch: Option<String>,
    pub hatch_color: Option<ColorSpec>,
}

impl Patch {
    pub fn new(kind: PatchKind) -> Self {
        Self {
            kind,
            label: String::new(),
            zorder: 1.0,
            visible: true,
            edgecolor: ColorSpec::named("black"),
            facecolor: ColorSpec::named("C0"),
            alpha: None,
            linewidth: 1.0,
            linestyle: LineStyle::Solid,
            hatch: None,
            hatch_color: None,
        }
    }

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(PatchKind::Rectangle {
            x,
            y,
            width,
            height,
        })
    }

    /// A bar as produced by bar charts: no edge, no own legend entry.
    pub fn bar(x: f64, y: f64, width: f64, height: f64, color: impl Into<ColorSpec>) -> Self {
        Self {
            label: "_nolegend_".into(),
            edgecolor: ColorSpec::None,
            facecolor: color.into(),
            linewidth: 0.0,
            ..Self::rectangle(x, y, width, height)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_colors(mut self, edge: impl Into<ColorSpec>, face: impl Into<ColorSpec>) -> Self {
        self.edgecolor = edge.into();
        self.facecolor = face.into();
        self
    }

    pub fn with_hatch(mut self, hatch: impl Into<String>) -> Self {
        self.hatch = Some(hatch.into());
        self
    }
}
