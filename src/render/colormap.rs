//! Colormap transcoding into PGFPlots `colormap` definitions.

use crate::errors::{RenderError, Result};
use crate::figure::{Anchor, Colormap, ListedColormap, SegmentedColormap};

use super::context::CompileState;
use super::defaults::{COLORMAP_GCD_TOLERANCE, COLORMAP_MAX_STEPS};

/// A colormap as PGFPlots understands it
#[derive(Clone, Debug, PartialEq)]
pub enum PgfColormap {
    /// Shipped with PGFPlots, referenced as `colormap/<name>`
    Builtin(&'static str),
    /// Inline `{mymap}{[1pt] rgb(..)=(..); ...}` definition
    Custom(String),
}

impl PgfColormap {
    /// The axis option selecting this colormap.
    pub fn option(&self) -> String {
        match self {
            PgfColormap::Builtin(name) => format!("colormap/{name}"),
            PgfColormap::Custom(def) => format!("colormap={def}"),
        }
    }
}

pub fn transcode_colormap(ctx: &CompileState, cmap: &Colormap) -> Result<PgfColormap> {
    match cmap {
        Colormap::Segmented(seg) => Ok(transcode_segmented(ctx, seg)),
        Colormap::Listed(listed) => transcode_listed(ctx, listed),
    }
}

fn is_gray(seg: &SegmentedColormap) -> bool {
    seg.red == seg.green && seg.green == seg.blue
}

fn interpolate(x: f64, prev: &Anchor, next: &Anchor) -> f64 {
    let span = next.x - prev.x;
    if span == 0.0 {
        return next.y0;
    }
    (next.y0 * (x - prev.x) + prev.y1 * (next.x - x)) / span
}

/// Channel value at `x`, where `k` is the index of the next anchor of that channel.
fn channel_at(x: f64, anchors: &[Anchor], k: &mut usize) -> f64 {
    match anchors.get(*k) {
        Some(anchor) if anchor.x == x => {
            *k += 1;
            anchor.y0
        }
        Some(anchor) if *k > 0 => interpolate(x, &anchors[*k - 1], anchor),
        Some(anchor) => anchor.y0,
        None => anchors.last().map_or(0.0, |a| a.y1),
    }
}

fn transcode_segmented(ctx: &CompileState, seg: &SegmentedColormap) -> PgfColormap {
    if is_gray(seg) {
        return PgfColormap::Builtin("blackwhite");
    }
    let channels = [&seg.red, &seg.green, &seg.blue];
    let mut ks = [0usize; 3];
    let mut positions = Vec::new();
    let mut colors = Vec::new();
    loop {
        let x = channels
            .iter()
            .zip(ks)
            .filter_map(|(anchors, k)| anchors.get(k).map(|a| a.x))
            .fold(f64::INFINITY, f64::min);
        if !x.is_finite() {
            break;
        }
        let mut rgb = [0.0; 3];
        for (i, anchors) in channels.iter().enumerate() {
            rgb[i] = channel_at(x, anchors, &mut ks[i]);
        }
        positions.push(x);
        colors.push(rgb);
        if x >= 1.0 {
            break;
        }
    }
    custom_definition(ctx, &scale_to_int(&positions, COLORMAP_MAX_STEPS), &colors, "\n  ")
}

fn transcode_listed(ctx: &CompileState, listed: &ListedColormap) -> Result<PgfColormap> {
    if listed.name == "viridis" {
        return Ok(PgfColormap::Builtin("viridis"));
    }
    let colors = listed.resampled();
    if colors.is_empty() {
        return Err(RenderError::EmptyColormap {
            name: listed.name.clone(),
        }
        .into());
    }
    let positions: Vec<i64> = (0..colors.len() as i64).collect();
    Ok(custom_definition(ctx, &positions, &colors, "\n "))
}

fn custom_definition(
    ctx: &CompileState,
    positions: &[i64],
    colors: &[[f64; 3]],
    lead: &str,
) -> PgfColormap {
    let mut last = i64::MIN;
    let changes: Vec<String> = positions
        .iter()
        .zip(colors)
        .filter(|(x, _)| {
            let keep = **x > last;
            if keep {
                last = **x;
            }
            keep
        })
        .map(|(x, [r, g, b])| {
            format!("rgb({x}pt)=({},{},{})", ctx.ff(*r), ctx.ff(*g), ctx.ff(*b))
        })
        .collect();
    PgfColormap::Custom(format!("{{mymap}}{{[1pt]{lead}{}\n}}", changes.join(";\n  ")))
}

/// Largest `h` such that every value is (nearly) an integer multiple of `h`.
fn gcd_array(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, x| real_gcd(acc, *x))
}

fn real_gcd(mut a: f64, mut b: f64) -> f64 {
    while a > COLORMAP_GCD_TOLERANCE {
        (a, b) = (b % a, a);
    }
    b
}

fn scale_to_int(values: &[f64], max_steps: f64) -> Vec<i64> {
    let divisor = (1.0 / max_steps).max(gcd_array(values));
    values.iter().map(|x| (x / divisor).round() as i64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Figure;
    use crate::options::Options;

    fn state() -> CompileState {
        CompileState::new(&Options::new().with_filepath("x.tex"), &Figure::default()).unwrap()
    }

    #[test]
    fn gray_becomes_blackwhite() {
        let ctx = state();
        let map = transcode_colormap(&ctx, &Colormap::gray()).unwrap();
        assert_eq!(map.option(), "colormap/blackwhite");
    }

    #[test]
    fn viridis_is_referenced_by_name() {
        let ctx = state();
        let map = transcode_colormap(&ctx, &Colormap::viridis()).unwrap();
        assert_eq!(map, PgfColormap::Builtin("viridis"));
    }

    #[test]
    fn jet_positions_are_strictly_increasing_integers() {
        let ctx = state();
        let PgfColormap::Custom(def) = transcode_colormap(&ctx, &Colormap::jet()).unwrap() else {
            panic!("jet should be custom");
        };
        assert!(def.starts_with("{mymap}{[1pt]\n  rgb(0pt)=(0,0,0.5);"));
        assert!(def.ends_with("pt)=(0.5,0,0)\n}"));
        let re = regex_lite::Regex::new(r"rgb\((\d+)pt\)").unwrap();
        let xs: Vec<i64> = re
            .captures_iter(&def)
            .map(|c| c[1].parse().unwrap())
            .collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]), "{xs:?}");
        assert_eq!(
            xs,
            vec![0, 22, 25, 68, 70, 75, 128, 130, 132, 178, 182, 200]
        );
    }

    #[test]
    fn commensurable_positions_use_the_common_divisor() {
        assert_eq!(scale_to_int(&[0.0, 0.5, 1.0], 1000.0), vec![0, 1, 2]);
        assert_eq!(scale_to_int(&[0.0, 0.25, 1.0], 1000.0), vec![0, 1, 4]);
        assert_eq!(scale_to_int(&[0.0, 0.001, 1.0], 1000.0), vec![0, 1, 1000]);
    }

    #[test]
    fn listed_maps_are_inlined_with_repetition() {
        let ctx = state();
        let cmap = Colormap::Listed(ListedColormap {
            name: "duo".into(),
            colors: vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            n: Some(3),
        });
        let map = transcode_colormap(&ctx, &cmap).unwrap();
        assert_eq!(
            map.option(),
            "colormap={mymap}{[1pt]\n rgb(0pt)=(1,0,0);\n  rgb(1pt)=(0,0,1);\n  rgb(2pt)=(1,0,0)\n}"
        );
    }

    #[test]
    fn empty_listed_map_is_an_error() {
        let ctx = state();
        let cmap = Colormap::listed("empty", vec![]);
        assert!(transcode_colormap(&ctx, &cmap).is_err());
    }
}
