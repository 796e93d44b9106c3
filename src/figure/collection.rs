//! Collections: many paths sharing one artist.
//!
//! Per-item property lists cycle: item `i` uses entry `i % len`. An empty
//! list means "not set".

use glam::{DAffine2, DVec2};

use super::AxesId;
use super::color::ColorSpec;
use super::colormap::Colormap;
use super::line::LineStyle;
use super::path::Path;

/// Scalar-to-color mapping shared by collections, images and meshes
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarMapping {
    pub cmap: Colormap,
    /// `(vmin, vmax)`
    pub clim: (f64, f64),
    /// Axes holding the colorbar for this mapping, if any
    pub colorbar: Option<AxesId>,
}

impl ScalarMapping {
    pub fn new(cmap: Colormap, clim: (f64, f64)) -> Self {
        Self {
            cmap,
            clim,
            colorbar: None,
        }
    }

    /// Normalize a value into `[0, 1]` (NaN stays NaN).
    pub fn normalize(&self, value: f64) -> f64 {
        let (vmin, vmax) = self.clim;
        if vmax == vmin {
            return 0.0;
        }
        (value - vmin) / (vmax - vmin)
    }
}

/// Generic patches sharing styles (polygons, wedges, fills)
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PatchCollection {
    pub label: String,
    pub zorder: f64,
    pub visible: bool,
    pub paths: Vec<Path>,
    pub edgecolors: Vec<ColorSpec>,
    pub facecolors: Vec<ColorSpec>,
    pub linestyles: Vec<LineStyle>,
    pub linewidths: Vec<f64>,
    pub transforms: Vec<DAffine2>,
    pub offsets: Vec<DVec2>,
    pub hatch: Option<String>,
}

impl PatchCollection {
    pub fn new(paths: Vec<Path>) -> Self {
        Self {
            zorder: 1.0,
            visible: true,
            paths,
            ..Self::default()
        }
    }
}

/// Independent polylines (error bars, contour lines, segments)
#[derive(Clone, Debug, PartialEq, Default)]
pub struct LineCollection {
    pub label: String,
    pub zorder: f64,
    pub visible: bool,
    pub paths: Vec<Path>,
    pub colors: Vec<ColorSpec>,
    pub linestyles: Vec<LineStyle>,
    pub linewidths: Vec<f64>,
}

impl LineCollection {
    pub fn new(paths: Vec<Path>) -> Self {
        Self {
            zorder: 2.0,
            visible: true,
            paths,
            ..Self::default()
        }
    }
}

/// Scatter plots: one marker path stamped at every offset
#[derive(Clone, Debug, PartialEq)]
pub struct PathCollection {
    pub label: String,
    pub zorder: f64,
    pub visible: bool,
    /// Marker path(s) in points, centered on the origin
    pub paths: Vec<Path>,
    pub offsets: Vec<DVec2>,
    /// Marker areas in points squared
    pub sizes: Vec<f64>,
    /// Scalar per point, mapped through `mapping`
    pub array: Option<Vec<f64>>,
    pub mapping: Option<ScalarMapping>,
    pub edgecolors: Vec<ColorSpec>,
    pub facecolors: Vec<ColorSpec>,
    pub linestyles: Vec<LineStyle>,
    pub linewidths: Vec<f64>,
}

impl Default for PathCollection {
    fn default() -> Self {
        Self {
            label: "_nolegend_".into(),
            zorder: 1.0,
            visible: true,
            paths: Vec::new(),
            offsets: Vec::new(),
            sizes: vec![36.0],
            array: None,
            mapping: None,
            edgecolors: Vec::new(),
            facecolors: vec![ColorSpec::named("C0")],
            linestyles: Vec::new(),
            linewidths: Vec::new(),
        }
    }
}

impl PathCollection {
    pub fn scatter(x: &[f64], y: &[f64]) -> Self {
        Self {
            offsets: x.iter().zip(y).map(|(x, y)| DVec2::new(*x, *y)).collect(),
            ..Self::default()
        }
    }

    /// Color the points by `values` through `mapping`.
    pub fn with_values(mut self, values: Vec<f64>, mapping: ScalarMapping) -> Self {
        self.array = Some(values);
        self.mapping = Some(mapping);
        self
    }

    pub fn with_marker_path(mut self, path: Path) -> Self {
        self.paths = vec![path];
        self
    }
}
