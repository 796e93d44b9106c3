//! Colormaps attached to scalar-mapped artists.

use crate::types::Rgba;

/// One anchor of a piecewise-linear channel: at `x` the channel jumps from
/// `y0` (left limit) to `y1` (right limit).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Anchor {
    pub const fn new(x: f64, y0: f64, y1: f64) -> Self {
        Self { x, y0, y1 }
    }
}

/// Piecewise-linear map defined per channel
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentedColormap {
    pub name: String,
    pub red: Vec<Anchor>,
    pub green: Vec<Anchor>,
    pub blue: Vec<Anchor>,
}

/// Discrete palette, optionally resampled to `n` entries
#[derive(Clone, Debug, PartialEq)]
pub struct ListedColormap {
    pub name: String,
    pub colors: Vec<[f64; 3]>,
    pub n: Option<usize>,
}

impl ListedColormap {
    /// The palette repeated and truncated to `n` entries.
    pub fn resampled(&self) -> Vec<[f64; 3]> {
        match self.n {
            Some(n) if n != self.colors.len() && !self.colors.is_empty() => {
                self.colors.iter().cycle().take(n).copied().collect()
            }
            _ => self.colors.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Colormap {
    Segmented(SegmentedColormap),
    Listed(ListedColormap),
}

impl Colormap {
    pub fn name(&self) -> &str {
        match self {
            Colormap::Segmented(s) => &s.name,
            Colormap::Listed(l) => &l.name,
        }
    }

    pub fn listed(name: impl Into<String>, colors: Vec<[f64; 3]>) -> Self {
        Colormap::Listed(ListedColormap {
            name: name.into(),
            colors,
            n: None,
        })
    }

    pub fn gray() -> Self {
        let ramp = vec![Anchor::new(0.0, 0.0, 0.0), Anchor::new(1.0, 1.0, 1.0)];
        Colormap::Segmented(SegmentedColormap {
            name: "gray".into(),
            red: ramp.clone(),
            green: ramp.clone(),
            blue: ramp,
        })
    }

    pub fn jet() -> Self {
        Colormap::Segmented(SegmentedColormap {
            name: "jet".into(),
            red: vec![
                Anchor::new(0.0, 0.0, 0.0),
                Anchor::new(0.35, 0.0, 0.0),
                Anchor::new(0.66, 1.0, 1.0),
                Anchor::new(0.89, 1.0, 1.0),
                Anchor::new(1.0, 0.5, 0.5),
            ],
            green: vec![
                Anchor::new(0.0, 0.0, 0.0),
                Anchor::new(0.125, 0.0, 0.0),
                Anchor::new(0.375, 1.0, 1.0),
                Anchor::new(0.64, 1.0, 1.0),
                Anchor::new(0.91, 0.0, 0.0),
                Anchor::new(1.0, 0.0, 0.0),
            ],
            blue: vec![
                Anchor::new(0.0, 0.5, 0.5),
                Anchor::new(0.11, 1.0, 1.0),
                Anchor::new(0.34, 1.0, 1.0),
                Anchor::new(0.65, 0.0, 0.0),
                Anchor::new(1.0, 0.0, 0.0),
            ],
        })
    }

    /// The first, middle and last colors of viridis; enough for raster
    /// previews. PGFPlots ships the full map under the same name.
    pub fn viridis() -> Self {
        Colormap::listed(
            "viridis",
            vec![
                [0.267004, 0.004874, 0.329415],
                [0.229739, 0.322361, 0.545706],
                [0.127568, 0.566949, 0.550556],
                [0.369214, 0.788888, 0.382914],
                [0.993248, 0.906157, 0.143936],
            ],
        )
    }

    /// Color at `t` in `[0, 1]`; NaN maps to transparent.
    pub fn eval(&self, t: f64) -> Rgba {
        if t.is_nan() {
            return Rgba::TRANSPARENT;
        }
        let t = t.clamp(0.0, 1.0);
        match self {
            Colormap::Segmented(s) => Rgba::rgb(
                eval_channel(&s.red, t),
                eval_channel(&s.green, t),
                eval_channel(&s.blue, t),
            ),
            Colormap::Listed(l) => {
                let colors = l.resampled();
                if colors.is_empty() {
                    return Rgba::TRANSPARENT;
                }
                let index = ((t * colors.len() as f64) as usize).min(colors.len() - 1);
                let [r, g, b] = colors[index];
                Rgba::rgb(r, g, b)
            }
        }
    }
}

fn eval_channel(anchors: &[Anchor], t: f64) -> f64 {
    let Some(first) = anchors.first() else {
        return 0.0;
    };
    if t <= first.x {
        return first.y1;
    }
    for pair in anchors.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.x {
            let span = b.x - a.x;
            if span <= 0.0 {
                return b.y0;
            }
            return a.y1 + (b.y0 - a.y1) * (t - a.x) / span;
        }
    }
    anchors.last().map_or(0.0, |a| a.y0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_is_linear() {
        let c = Colormap::gray().eval(0.25);
        assert!((c.r - 0.25).abs() < 1e-12);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    fn jet_endpoints() {
        let jet = Colormap::jet();
        assert_eq!(jet.eval(0.0), Rgba::rgb(0.0, 0.0, 0.5));
        assert_eq!(jet.eval(1.0), Rgba::rgb(0.5, 0.0, 0.0));
    }

    #[test]
    fn listed_lookup_and_resampling() {
        let map = ListedColormap {
            name: "pair".into(),
            colors: vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            n: Some(5),
        };
        assert_eq!(map.resampled().len(), 5);
        assert_eq!(map.resampled()[2], [1.0, 0.0, 0.0]);
        let cmap = Colormap::Listed(map);
        assert_eq!(cmap.eval(0.0), Rgba::rgb(1.0, 0.0, 0.0));
        assert_eq!(cmap.eval(0.3), Rgba::rgb(0.0, 0.0, 1.0));
        assert_eq!(cmap.eval(f64::NAN), Rgba::TRANSPARENT);
    }
}
