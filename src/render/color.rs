//! Color naming: xcolor builtins first, then synthesized `\definecolor`s.
//!
//! A synthesized name is the nearest CSS color name followed by the 0-255
//! channel digits (a single group when the color is gray), so distinct
//! colors never share a name and every name is a valid TeX identifier.

use crate::errors::Result;
use crate::figure::ColorSpec;
use crate::figure::color::WEB_COLORS;
use crate::types::Rgba;

use super::context::{CompileState, CustomColor};

/// Colors every xcolor installation knows, in lookup order.
#[rustfmt::skip]
const BUILTIN_COLORS: &[(&str, [f64; 3])] = &[
    ("white", [1.0, 1.0, 1.0]),
    ("lightgray", [0.75, 0.75, 0.75]),
    ("gray", [0.5, 0.5, 0.5]),
    ("darkgray", [0.25, 0.25, 0.25]),
    ("black", [0.0, 0.0, 0.0]),
    ("red", [1.0, 0.0, 0.0]),
    ("green", [0.0, 1.0, 0.0]),
    ("blue", [0.0, 0.0, 1.0]),
    ("brown", [0.75, 0.5, 0.25]),
    ("lime", [0.75, 1.0, 0.0]),
    ("orange", [1.0, 0.5, 0.0]),
    ("pink", [1.0, 0.75, 0.75]),
    ("purple", [0.75, 0.0, 0.25]),
    ("teal", [0.0, 0.5, 0.5]),
    ("violet", [0.5, 0.0, 0.5]),
];

/// A color as referenced in the output
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedColor {
    /// Builtin or registered name; `"none"` for transparent colors
    pub name: String,
    pub rgba: Rgba,
}

impl ResolvedColor {
    pub fn is_none(&self) -> bool {
        self.name == "none"
    }

    pub fn alpha(&self) -> f64 {
        self.rgba.a
    }
}

/// Name for an already-resolved color, registering it when needed.
pub fn color_name(ctx: &mut CompileState, rgba: Rgba) -> String {
    if rgba.is_invisible() {
        return "none".to_string();
    }
    let rgb = rgba.channels();
    if let Some((name, _)) = BUILTIN_COLORS.iter().find(|(_, c)| *c == rgb) {
        return name.to_string();
    }

    let rgb255 = rgba.to_rgb255();
    let name = synthesized_name(rgb255);
    if !ctx.custom_colors.iter().any(|c| c.name == name) {
        ctx.custom_colors.push(CustomColor {
            name: name.clone(),
            rgb,
        });
    }
    name
}

/// Resolve a color spec, optionally overriding its alpha.
pub fn resolve_color(
    ctx: &mut CompileState,
    spec: &ColorSpec,
    alpha: Option<f64>,
) -> Result<ResolvedColor> {
    let rgba = spec.to_rgba_with_alpha(alpha)?;
    Ok(ResolvedColor {
        name: color_name(ctx, rgba),
        rgba,
    })
}

fn nearest_web_color(rgb255: [u8; 3]) -> &'static str {
    let distance = |c: &[u8; 3]| -> i32 {
        c.iter()
            .zip(rgb255)
            .map(|(a, b)| (*a as i32 - b as i32).pow(2))
            .sum()
    };
    let mut best = WEB_COLORS[0];
    let mut best_distance = distance(&best.1);
    for entry in &WEB_COLORS[1..] {
        let d = distance(&entry.1);
        if d < best_distance {
            best = *entry;
            best_distance = d;
        }
    }
    best.0
}

fn synthesized_name(rgb255: [u8; 3]) -> String {
    let [r, g, b] = rgb255;
    let base = nearest_web_color(rgb255);
    if r == g && g == b {
        format!("{base}{r}")
    } else {
        format!("{base}{r}{g}{b}")
    }
}

/// `\definecolor` lines for every registered color, in registration order.
pub fn color_definitions(ctx: &CompileState) -> Vec<String> {
    ctx.custom_colors
        .iter()
        .map(|c| {
            format!(
                "\\definecolor{{{}}}{{rgb}}{{{},{},{}}}",
                c.name,
                ctx.ff(c.rgb[0]),
                ctx.ff(c.rgb[1]),
                ctx.ff(c.rgb[2])
            )
        })
        .collect()
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
    fn default_cycle_blue_gets_a_synthesized_name() {
        let mut ctx = state();
        let c = resolve_color(&mut ctx, &ColorSpec::named("C0"), None).unwrap();
        assert_eq!(c.name, "steelblue31119180");
        assert_eq!(ctx.custom_colors.len(), 1);
    }

    #[test]
    fn builtins_are_not_registered() {
        let mut ctx = state();
        assert_eq!(color_name(&mut ctx, Rgba::rgb(1.0, 0.5, 0.0)), "orange");
        assert_eq!(color_name(&mut ctx, Rgba::BLACK), "black");
        assert!(ctx.custom_colors.is_empty());
    }

    #[test]
    fn transparent_is_none() {
        let mut ctx = state();
        assert_eq!(color_name(&mut ctx, Rgba::TRANSPARENT), "none");
        let r = resolve_color(&mut ctx, &ColorSpec::None, None).unwrap();
        assert!(r.is_none());
    }

    #[test]
    fn gray_levels_use_one_digit_group() {
        let mut ctx = state();
        let name = color_name(&mut ctx, Rgba::rgb(0.8, 0.8, 0.8));
        assert_eq!(name, "lightgray204");
    }

    #[test]
    fn registration_is_idempotent_and_ordered() {
        let mut ctx = state();
        let a = color_name(&mut ctx, Rgba::from_rgb8(31, 119, 180));
        let b = color_name(&mut ctx, Rgba::from_rgb8(255, 127, 14));
        let again = color_name(&mut ctx, Rgba::from_rgb8(31, 119, 180));
        assert_eq!(a, again);
        let defs = color_definitions(&ctx);
        assert_eq!(defs.len(), 2);
        assert!(defs[0].starts_with(&format!("\\definecolor{{{a}}}{{rgb}}{{")));
        assert!(defs[1].starts_with(&format!("\\definecolor{{{b}}}{{rgb}}{{")));
    }

    #[test]
    fn alpha_is_kept_but_not_part_of_the_name() {
        let mut ctx = state();
        let c = resolve_color(&mut ctx, &ColorSpec::named("C0"), Some(0.5)).unwrap();
        assert_eq!(c.name, "steelblue31119180");
        assert_eq!(c.alpha(), 0.5);
    }
}
