//! Canonical unit marker paths.
//!
//! Scatter collections only carry the marker's path. Comparing it against
//! this atlas recovers the symbolic marker code the PGFPlots mark table needs.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DAffine2, DVec2};

use super::path::{Path, PathCode};

/// Marker codes in lookup order.
pub const MARKER_CODES: &[&str] = &[
    ".", "o", "v", "^", "<", ">", "1", "2", "3", "4", "s", "p", "*", "h", "H", "+", "x", "D",
    "d", "|", "_",
];

/// Cubic Bezier handle length for a quarter circle.
const KAPPA: f64 = 0.552_284_749_830_793_6;

fn circle(radius: f64) -> Path {
    let k = KAPPA * radius;
    let r = radius;
    let pts = [
        DVec2::new(r, 0.0),
        DVec2::new(r, k),
        DVec2::new(k, r),
        DVec2::new(0.0, r),
        DVec2::new(-k, r),
        DVec2::new(-r, k),
        DVec2::new(-r, 0.0),
        DVec2::new(-r, -k),
        DVec2::new(-k, -r),
        DVec2::new(0.0, -r),
        DVec2::new(k, -r),
        DVec2::new(r, -k),
        DVec2::new(r, 0.0),
    ];
    let mut codes = vec![PathCode::MoveTo];
    codes.extend(std::iter::repeat_n(PathCode::Curve4, 12));
    let mut vertices = pts.to_vec();
    vertices.push(pts[0]);
    codes.push(PathCode::ClosePoly);
    Path::new(vertices, codes)
}

fn regular_polygon(sides: usize, radius: f64, phase: f64) -> Path {
    let points: Vec<DVec2> = (0..sides)
        .map(|i| {
            let angle = phase + 2.0 * PI * i as f64 / sides as f64;
            DVec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    Path::polyline(&points, true)
}

fn star(points: usize, outer: f64, inner: f64) -> Path {
    let verts: Vec<DVec2> = (0..2 * points)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = FRAC_PI_2 + PI * i as f64 / points as f64;
            DVec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    Path::polyline(&verts, true)
}

fn strokes(pairs: &[(DVec2, DVec2)]) -> Path {
    let mut vertices = Vec::with_capacity(pairs.len() * 2);
    let mut codes = Vec::with_capacity(pairs.len() * 2);
    for (a, b) in pairs {
        vertices.extend([*a, *b]);
        codes.extend([PathCode::MoveTo, PathCode::LineTo]);
    }
    Path::new(vertices, codes)
}

fn triangle(rotation: f64) -> Path {
    let up = Path::polyline(
        &[
            DVec2::new(0.0, 0.5),
            DVec2::new(-0.5, -0.5),
            DVec2::new(0.5, -0.5),
        ],
        true,
    );
    up.transformed(&DAffine2::from_angle(rotation))
}

fn tri_spokes(rotation: f64) -> Path {
    let spokes = strokes(&[
        (DVec2::ZERO, DVec2::new(0.0, -0.5)),
        (DVec2::ZERO, DVec2::new(0.5 * 0.866_025_403_784_438_6, 0.25)),
        (DVec2::ZERO, DVec2::new(-0.5 * 0.866_025_403_784_438_6, 0.25)),
    ]);
    spokes.transformed(&DAffine2::from_angle(rotation))
}

/// Unit path of a marker code, if the atlas knows it.
pub fn marker_path(code: &str) -> Option<Path> {
    let h = 0.5;
    Some(match code {
        "." => circle(0.25),
        "o" => circle(0.5),
        "^" => triangle(0.0),
        "v" => triangle(PI),
        "<" => triangle(FRAC_PI_2),
        ">" => triangle(-FRAC_PI_2),
        "1" => tri_spokes(0.0),
        "2" => tri_spokes(PI),
        "3" => tri_spokes(-FRAC_PI_2),
        "4" => tri_spokes(FRAC_PI_2),
        "s" => Path::rectangle(-h, -h, 1.0, 1.0),
        "p" => regular_polygon(5, h, FRAC_PI_2),
        "*" => star(5, h, h * 0.381_966),
        "h" => regular_polygon(6, h, FRAC_PI_2),
        "H" => regular_polygon(6, h, 0.0),
        "+" => strokes(&[
            (DVec2::new(-h, 0.0), DVec2::new(h, 0.0)),
            (DVec2::new(0.0, -h), DVec2::new(0.0, h)),
        ]),
        "x" => strokes(&[
            (DVec2::new(-h, -h), DVec2::new(h, h)),
            (DVec2::new(-h, h), DVec2::new(h, -h)),
        ]),
        "D" => Path::polyline(
            &[
                DVec2::new(0.0, -h),
                DVec2::new(h, 0.0),
                DVec2::new(0.0, h),
                DVec2::new(-h, 0.0),
            ],
            true,
        ),
        "d" => Path::polyline(
            &[
                DVec2::new(0.0, -h),
                DVec2::new(0.6 * h, 0.0),
                DVec2::new(0.0, h),
                DVec2::new(-0.6 * h, 0.0),
            ],
            true,
        ),
        "|" => strokes(&[(DVec2::new(0.0, -h), DVec2::new(0.0, h))]),
        "_" => strokes(&[(DVec2::new(-h, 0.0), DVec2::new(h, 0.0))]),
        _ => return None,
    })
}

/// Find the marker code whose unit path matches `path` within `tolerance`.
pub fn detect_marker(path: &Path, tolerance: f64) -> Option<&'static str> {
    MARKER_CODES.iter().copied().find(|code| {
        marker_path(code).is_some_and(|candidate| candidate.approx_eq(path, tolerance))
    })
}
