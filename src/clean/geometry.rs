//! Box tests, segment clipping and the 3-D camera of the cleaner.

use glam::{DMat4, DVec2, DVec3, DVec4};

use crate::figure::View3d;

/// Axis-aligned box in visual coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl VisualBox {
    pub fn new(xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        Self {
            min: DVec2::new(xlim.0.min(xlim.1), ylim.0.min(ylim.1)),
            max: DVec2::new(xlim.0.max(xlim.1), ylim.0.max(ylim.1)),
        }
    }

    /// Smallest box holding every finite point.
    pub fn enclosing(points: impl IntoIterator<Item = DVec2>) -> Self {
        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);
        for p in points.into_iter().filter(|p| p.is_finite()) {
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn relaxed(&self, tol: f64) -> Self {
        Self {
            min: self.min - tol,
            max: self.max + tol,
        }
    }

    /// Grow each side by `factor` times the box size.
    pub fn extended(&self, factor: f64) -> Self {
        let margin = self.size() * factor;
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// Closed containment; NaN coordinates are outside.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    fn edges(&self) -> [(DVec2, DVec2); 4] {
        let bottom_left = self.min;
        let top_right = self.max;
        let top_left = DVec2::new(self.min.x, self.max.y);
        let bottom_right = DVec2::new(self.max.x, self.min.y);
        [
            (bottom_left, top_left),
            (bottom_right, top_right),
            (bottom_left, bottom_right),
            (top_left, top_right),
        ]
    }

    /// Whether the segment `a-b` crosses one of the box edges.
    pub fn crossed_by(&self, a: DVec2, b: DVec2) -> bool {
        self.edges()
            .iter()
            .any(|(c, d)| segments_intersect(a, b, *c, *d))
    }

    /// Liang-Barsky clipping of `a-b`; `None` when the segment misses the box.
    pub fn clip(&self, a: DVec2, b: DVec2) -> Option<(DVec2, DVec2)> {
        let d = b - a;
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        for (p, q) in [
            (-d.x, a.x - self.min.x),
            (d.x, self.max.x - a.x),
            (-d.y, a.y - self.min.y),
            (d.y, self.max.y - a.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
        Some((a + d * t0, a + d * t1))
    }
}

/// Whether segments `a1-a2` and `b1-b2` intersect strictly inside both.
pub fn segments_intersect(a1: DVec2, a2: DVec2, b1: DVec2, b2: DVec2) -> bool {
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.perp_dot(s);
    if denom == 0.0 {
        return false;
    }
    let qp = b1 - a1;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;
    0.0 < t && t < 1.0 && 0.0 < u && u < 1.0
}

/// Camera matrix `RotX(elev) * RotZ(-azim) * diag(aspect, 1)`.
///
/// `ranges` are the visual extents of the three data axes; the aspect scales
/// each of them to its share of the box.
pub fn projection_matrix(view: &View3d, ranges: DVec3) -> DMat4 {
    let az = (-view.azimuth).to_radians();
    let el = view.elevation.to_radians();
    #[rustfmt::skip]
    let rot_z = DMat4::from_cols_array_2d(&[
        [az.cos(), -az.sin(), 0.0, 0.0],
        [az.sin(), az.cos(), 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]).transpose();
    #[rustfmt::skip]
    let rot_x = DMat4::from_cols_array_2d(&[
        [1.0, 0.0, 0.0, 0.0],
        [0.0, el.sin(), el.cos(), 0.0],
        [0.0, -el.cos(), el.sin(), 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]).transpose();
    let aspect = DVec3::from_array(view.box_aspect) / ranges;
    let scale = DMat4::from_diagonal(DVec4::new(aspect.x, aspect.y, aspect.z, 1.0));
    rot_x * rot_z * scale
}

/// Project a 3-D point and divide by the homogeneous coordinate.
pub fn project(camera: &DMat4, p: DVec3) -> DVec2 {
    let v = *camera * DVec4::new(p.x, p.y, p.z, 1.0);
    DVec2::new(v.x / v.w, v.y / v.w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> VisualBox {
        VisualBox::new((0.0, 1.0), (0.0, 1.0))
    }

    #[test]
    fn containment_is_closed_and_rejects_nan() {
        let b = unit();
        assert!(b.contains(DVec2::new(1.0, 0.0)));
        assert!(!b.contains(DVec2::new(1.1, 0.5)));
        assert!(!b.contains(DVec2::new(f64::NAN, 0.5)));
    }

    #[test]
    fn crossing_segments() {
        let b = unit();
        assert!(b.crossed_by(DVec2::new(-1.0, 0.5), DVec2::new(2.0, 0.5)));
        assert!(!b.crossed_by(DVec2::new(-1.0, 2.0), DVec2::new(2.0, 2.0)));
        assert!(!segments_intersect(
            DVec2::ZERO,
            DVec2::X,
            DVec2::Y,
            DVec2::new(1.0, 1.0)
        ));
    }

    #[test]
    fn clipping_to_the_box() {
        let b = unit();
        let (start, end) = b.clip(DVec2::new(0.5, 0.5), DVec2::new(2.5, 0.5)).unwrap();
        assert_eq!(start, DVec2::new(0.5, 0.5));
        assert_eq!(end, DVec2::new(1.0, 0.5));
        assert_eq!(b.clip(DVec2::new(2.0, 2.0), DVec2::new(3.0, 2.0)), None);
    }

    #[test]
    fn top_down_camera_only_scales() {
        let view = View3d {
            elevation: 90.0,
            azimuth: 0.0,
            ..View3d::default()
        };
        let camera = projection_matrix(&view, DVec3::new(2.0, 4.0, 1.0));
        let p = project(&camera, DVec3::new(2.0, 4.0, 0.0));
        assert!((p - DVec2::new(1.0, 1.0)).length() < 1e-12, "{p:?}");
    }
}
