//! Raster artists: images with an extent and quadrilateral meshes.

use glam::DVec2;

use super::collection::ScalarMapping;

/// Row-major 2-D array
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<T>,
}

impl<T: Copy> Grid<T> {
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Self {
        Self { rows, cols, data }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    pub fn expected_len(&self) -> usize {
        self.rows * self.cols
    }
}

/// Pixel payload of an [`AxesImage`]
#[derive(Clone, Debug, PartialEq)]
pub enum ImageData {
    /// Scalars mapped through the image's colormap
    Scalar(Grid<f64>),
    /// RGB floats in `[0, 1]`
    Rgb(Grid<[f64; 3]>),
    /// RGBA floats in `[0, 1]`
    Rgba(Grid<[f64; 4]>),
    Rgba8(Grid<[u8; 4]>),
}

/// Where row 0 of the data is drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Upper,
    Lower,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxesImage {
    pub label: String,
    pub zorder: f64,
    pub visible: bool,
    pub data: ImageData,
    /// `[left, right, bottom, top]` in data coordinates
    pub extent: [f64; 4],
    pub origin: Origin,
    pub mapping: ScalarMapping,
}

impl AxesImage {
    pub fn new(data: ImageData, extent: [f64; 4], mapping: ScalarMapping) -> Self {
        Self {
            label: String::new(),
            zorder: 0.0,
            visible: true,
            data,
            extent,
            origin: Origin::Upper,
            mapping,
        }
    }
}

/// Quadrilateral mesh (pcolormesh)
#[derive(Clone, Debug, PartialEq)]
pub struct QuadMesh {
    pub label: String,
    pub zorder: f64,
    pub visible: bool,
    /// `(rows + 1) x (cols + 1)` corner coordinates
    pub coordinates: Grid<DVec2>,
    /// `rows x cols` cell values
    pub values: Grid<f64>,
    pub mapping: ScalarMapping,
    pub alpha: Option<f64>,
}

impl QuadMesh {
    /// Mesh over a rectilinear grid given by cell edges.
    pub fn rectilinear(x_edges: &[f64], y_edges: &[f64], values: Vec<f64>, mapping: ScalarMapping) -> Self {
        let corners = y_edges
            .iter()
            .flat_map(|y| x_edges.iter().map(move |x| DVec2::new(*x, *y)))
            .collect();
        let rows = y_edges.len().saturating_sub(1);
        let cols = x_edges.len().saturating_sub(1);
        Self {
            label: String::new(),
            zorder: 1.0,
            visible: true,
            coordinates: Grid::new(y_edges.len(), x_edges.len(), corners),
            values: Grid::new(rows, cols, values),
            mapping,
            alpha: None,
        }
    }
}
