//! Vertex/opcode paths in data coordinates.

use glam::{DAffine2, DVec2};

/// Opcode attached to each vertex
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathCode {
    MoveTo,
    LineTo,
    /// Quadratic Bezier; consumes a control vertex and an end vertex
    Curve3,
    /// Cubic Bezier; consumes two control vertices and an end vertex
    Curve4,
    /// Close the current sub-path; the vertex itself is ignored
    ClosePoly,
}

/// One drawing instruction of a [`Path`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(DVec2),
    LineTo(DVec2),
    Curve3(DVec2, DVec2),
    Curve4(DVec2, DVec2, DVec2),
    Close,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Path {
    pub vertices: Vec<DVec2>,
    /// One code per vertex. Empty means "move to the first vertex, then lines".
    pub codes: Vec<PathCode>,
}

impl Path {
    pub fn new(vertices: Vec<DVec2>, codes: Vec<PathCode>) -> Self {
        Self { vertices, codes }
    }

    /// Polyline through `points`, optionally closed.
    pub fn polyline(points: &[DVec2], closed: bool) -> Self {
        let mut vertices = points.to_vec();
        let mut codes: Vec<PathCode> = (0..points.len())
            .map(|i| if i == 0 { PathCode::MoveTo } else { PathCode::LineTo })
            .collect();
        if closed && !points.is_empty() {
            vertices.push(points[0]);
            codes.push(PathCode::ClosePoly);
        }
        Self { vertices, codes }
    }

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::polyline(
            &[
                DVec2::new(x, y),
                DVec2::new(x + width, y),
                DVec2::new(x + width, y + height),
                DVec2::new(x, y + height),
            ],
            true,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn code_at(&self, index: usize) -> PathCode {
        match self.codes.get(index) {
            Some(code) => *code,
            None if index == 0 => PathCode::MoveTo,
            None => PathCode::LineTo,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.codes.contains(&PathCode::ClosePoly)
    }

    /// Group vertices into segments. A curve truncated by the end of the
    /// vertex list is dropped.
    pub fn segments(&self) -> Vec<PathSegment> {
        let mut out = Vec::with_capacity(self.vertices.len());
        let mut i = 0;
        while i < self.vertices.len() {
            let v = self.vertices[i];
            match self.code_at(i) {
                PathCode::MoveTo => {
                    out.push(PathSegment::MoveTo(v));
                    i += 1;
                }
                PathCode::LineTo => {
                    out.push(PathSegment::LineTo(v));
                    i += 1;
                }
                PathCode::ClosePoly => {
                    out.push(PathSegment::Close);
                    i += 1;
                }
                PathCode::Curve3 => {
                    let Some(end) = self.vertices.get(i + 1) else {
                        break;
                    };
                    out.push(PathSegment::Curve3(v, *end));
                    i += 2;
                }
                PathCode::Curve4 => {
                    let (Some(c2), Some(end)) = (self.vertices.get(i + 1), self.vertices.get(i + 2))
                    else {
                        break;
                    };
                    out.push(PathSegment::Curve4(v, *c2, *end));
                    i += 3;
                }
            }
        }
        out
    }

    pub fn transformed(&self, transform: &DAffine2) -> Path {
        Path {
            vertices: self
                .vertices
                .iter()
                .map(|v| transform.transform_point2(*v))
                .collect(),
            codes: self.codes.clone(),
        }
    }

    pub fn translated(&self, offset: DVec2) -> Path {
        self.transformed(&DAffine2::from_translation(offset))
    }

    /// Vertices that are actually drawn (close markers excluded).
    pub fn drawn_vertices(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(i, _)| self.code_at(*i) != PathCode::ClosePoly)
            .map(|(_, v)| *v)
    }

    /// True when both paths have the same codes and vertices within `tolerance`.
    pub fn approx_eq(&self, other: &Path, tolerance: f64) -> bool {
        self.vertices.len() == other.vertices.len()
            && (0..self.vertices.len()).all(|i| self.code_at(i) == other.code_at(i))
            && self
                .vertices
                .iter()
                .zip(&other.vertices)
                .all(|(a, b)| (*a - *b).abs().max_element() <= tolerance)
    }
}
