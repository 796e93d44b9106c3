//! Point reduction passes: Opheim line simplification, marker pixelation and
//! precision limiting.

use glam::DVec2;

/// Opheim simplification of a polyline; `true` marks points to keep.
///
/// From each kept point a search corridor of half-width `tol` is laid along
/// the direction to the first point at least `tol` away. The walk continues
/// while points stay strictly inside the corridor and keep moving forward; the
/// last such point is kept and becomes the next anchor. Endpoints are always
/// kept, and a zero tolerance keeps every point.
pub fn opheim(points: &[DVec2], tol: f64) -> Vec<bool> {
    let n = points.len();
    let mut mask = vec![false; n];
    if n == 0 {
        return mask;
    }
    mask[0] = true;
    mask[n - 1] = true;

    let mut i = 0;
    while i + 3 <= n {
        let mut j = i + 1;
        let mut v = points[j] - points[i];
        while j < n - 1 && v.length() < tol {
            j += 1;
            v = points[j] - points[i];
        }
        let length = v.length();
        if length > 0.0 {
            let direction = v / length;
            let normal = direction.perp();
            while j < n - 1 {
                let offset = points[j + 1] - points[i];
                if normal.dot(offset).abs() >= tol {
                    break;
                }
                if direction.dot(points[j + 1] - points[j]) < 0.0 {
                    break;
                }
                j += 1;
            }
        }
        i = j;
        mask[i] = true;
    }
    mask
}

/// Keep the first point of every occupied cell of a grid with
/// `cells_per_unit` resolution. Points with NaN coordinates are dropped.
pub fn pixelate(points: &[DVec2], cells_per_unit: DVec2) -> Vec<bool> {
    let cells: Vec<Option<(i64, i64)>> = points
        .iter()
        .map(|p| {
            let cell = (*p * cells_per_unit).round();
            cell.is_finite().then_some((cell.x as i64, cell.y as i64))
        })
        .collect();

    let mut order: Vec<usize> = (0..points.len()).filter(|&i| cells[i].is_some()).collect();
    order.sort_by_key(|&i| (cells[i], i));

    let mut mask = vec![false; points.len()];
    let mut previous = None;
    for i in order {
        if cells[i] != previous {
            mask[i] = true;
            previous = cells[i];
        }
    }
    mask
}

/// Resolution to round to: the machine epsilon of the largest finite
/// magnitude, scaled by `alpha`. `None` when nothing needs rounding.
pub fn least_significant_bit(values: impl IntoIterator<Item = f64>, alpha: f64) -> Option<f64> {
    if alpha.is_nan() || alpha <= 0.0 {
        return None;
    }
    let max = values
        .into_iter()
        .filter(|v| v.is_finite())
        .map(f64::abs)
        .fold(0.0, f64::max);
    (max > 0.0).then(|| max * f64::EPSILON * alpha)
}

pub fn round_to(value: f64, lsb: f64) -> f64 {
    (value / lsb).round() * lsb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<DVec2> {
        coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect()
    }

    #[test]
    fn straight_run_collapses_to_endpoints() {
        let line = points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert_eq!(opheim(&line, 0.1), vec![true, false, false, true]);
    }

    #[test]
    fn corners_survive() {
        let line = points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (2.0, 2.0)]);
        assert_eq!(opheim(&line, 0.1), vec![true, false, true, false, true]);
    }

    #[test]
    fn backtracking_ends_the_corridor() {
        let line = points(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.0), (3.0, 0.0)]);
        let mask = opheim(&line, 0.1);
        assert!(mask[1]);
        assert!(mask[3]);
    }

    #[test]
    fn zero_tolerance_keeps_everything() {
        let line = points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0)]);
        assert_eq!(opheim(&line, 0.0), vec![true; 5]);
    }

    #[test]
    fn never_grows() {
        let line: Vec<DVec2> = (0..50)
            .map(|i| DVec2::new(i as f64, ((i * 7) % 5) as f64 * 0.01))
            .collect();
        for tol in [0.001, 0.02, 1.0] {
            let kept = opheim(&line, tol).into_iter().filter(|k| *k).count();
            assert!(kept <= line.len());
            assert!(kept >= 2);
        }
    }

    #[test]
    fn short_lines_are_untouched() {
        assert_eq!(opheim(&points(&[(0.0, 0.0), (1.0, 1.0)]), 0.5), vec![true, true]);
        assert!(opheim(&[], 0.5).is_empty());
    }

    #[test]
    fn pixelation_keeps_first_per_cell() {
        let markers = points(&[(0.0, 0.0), (5.0, 5.0), (0.001, 0.0), (f64::NAN, 1.0)]);
        assert_eq!(
            pixelate(&markers, DVec2::splat(10.0)),
            vec![true, true, false, false]
        );
    }

    #[test]
    fn rounding_to_the_largest_magnitude() {
        let lsb = least_significant_bit([1.0001, -1_099_511_627_776.0, f64::NAN], 1.0).unwrap();
        assert_eq!(lsb, 1.0 / 4096.0);
        assert_eq!(round_to(1.0001, lsb), 1.0);
        assert_eq!(least_significant_bit([0.0, f64::INFINITY], 1.0), None);
        assert_eq!(least_significant_bit([3.0], 0.0), None);
    }
}
