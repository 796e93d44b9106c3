//! Stroke, marker, hatch and arrow translations.

use crate::errors::{RenderError, Result};
use crate::figure::{ColorSpec, LineStyle};
use crate::log::warn;

use super::color::resolve_color;
use super::context::CompileState;
use super::defaults::LINEWIDTH_SCALE;

/// Line width option for a width in points.
///
/// Strict mode maps exact TikZ keyword widths; otherwise widths are scaled
/// so the host's default width (1pt) lands on TikZ's default (`thin`).
pub fn linewidth_option(ctx: &CompileState, width: f64) -> Option<String> {
    if ctx.strict {
        let keyword = match width {
            w if w == 0.1 => "ultra thin",
            w if w == 0.2 => "very thin",
            w if w == 0.4 => "thin",
            w if w == 0.6 => "semithick",
            w if w == 0.8 => "thick",
            w if w == 1.2 => "very thick",
            w if w == 1.6 => "ultra thick",
            _ => return Some(format!("line width={}pt", ctx.ff(width))),
        };
        return Some(keyword.to_string());
    }
    let scaled = width * 4.0;
    let keyword = match scaled {
        s if s == 1.0 => "ultra thin",
        s if s == 2.0 => "very thin",
        s if s == 4.0 => return None,
        s if s == 6.0 => "semithick",
        s if s == 8.0 => "thick",
        s if s == 12.0 => "very thick",
        s if s == 16.0 => "ultra thick",
        _ => return Some(format!("line width={}pt", ctx.ff(LINEWIDTH_SCALE * width))),
    };
    Some(keyword.to_string())
}

/// `dash pattern=on Apt off Bpt ...` for an on/off sequence.
pub fn dash_pattern(ctx: &CompileState, pattern: &[f64]) -> Option<String> {
    if pattern.is_empty() || pattern.len() % 2 != 0 {
        warn!(?pattern, "dash sequence must have an even, non-zero length");
        return None;
    }
    let parts: Vec<String> = pattern
        .chunks(2)
        .map(|pair| format!("on {}pt off {}pt", ctx.ff(pair[0]), ctx.ff(pair[1])))
        .collect();
    Some(format!("dash pattern={}", parts.join(" ")))
}

/// TikZ line style; `None` for solid and invisible strokes.
pub fn linestyle_option(ctx: &CompileState, style: &LineStyle) -> Option<String> {
    match style {
        LineStyle::Solid | LineStyle::None => None,
        LineStyle::Dotted => Some("dotted".into()),
        LineStyle::Dashed => Some("dashed".into()),
        LineStyle::DashDot => Some("dash pattern=on 1pt off 3pt on 3pt off 3pt".into()),
        LineStyle::Custom { pattern, .. } => dash_pattern(ctx, pattern),
    }
}

/// Marker symbol plus any extra mark options
#[derive(Clone, Debug, PartialEq)]
pub struct PgfMarker {
    pub symbol: String,
    pub options: Vec<String>,
}

/// Translate a marker code. Unknown codes yield `None` with a warning.
pub fn translate_marker(ctx: &mut CompileState, code: &str, filled: bool) -> Option<PgfMarker> {
    let plain = |s: &str| {
        Some(PgfMarker {
            symbol: s.to_string(),
            options: Vec::new(),
        })
    };
    match code {
        "" | " " | "None" | "none" => return None,
        "." => return plain("*"),
        "+" => return plain("+"),
        "x" => return plain("x"),
        "o" if filled => {
            ctx.add_tikz_lib("plotmarks");
            return plain("*");
        }
        "o" => return plain("o"),
        _ => {}
    }
    let (symbol, extra) = match code {
        "v" | "1" => ("triangle", Some("rotate=180")),
        "^" | "2" => ("triangle", None),
        "<" | "3" => ("triangle", Some("rotate=270")),
        ">" | "4" => ("triangle", Some("rotate=90")),
        "s" => ("square", None),
        "p" => ("pentagon", None),
        "*" => ("asterisk", None),
        "h" | "H" => ("star", None),
        "d" | "D" => ("diamond", None),
        "|" => ("|", None),
        "_" => ("-", None),
        other => {
            warn!(marker = other, "unsupported marker, dropped");
            return None;
        }
    };
    ctx.add_tikz_lib("plotmarks");
    let mut symbol = symbol.to_string();
    if filled && !matches!(symbol.as_str(), "|" | "-" | "asterisk" | "star") {
        symbol.push('*');
    }
    Some(PgfMarker {
        symbol,
        options: extra.map(|e| vec![e.to_string()]).unwrap_or_default(),
    })
}

/// PGF pattern name for a hatch character.
fn hatch_pattern(c: char) -> Option<&'static str> {
    Some(match c {
        '-' => "horizontal lines",
        '|' => "vertical lines",
        '/' => "north east lines",
        '\\' => "north west lines",
        '+' => "grid",
        'x' => "crosshatch",
        '.' => "crosshatch dots",
        'o' | 'O' => "dots",
        '*' => "fivepointed stars",
        _ => return None,
    })
}

/// `postaction={pattern=...}` for a hatch string.
///
/// Only the first character is used; PGF patterns have no density.
pub fn hatch_option(
    ctx: &mut CompileState,
    hatch: &str,
    color: &ColorSpec,
) -> Result<Option<String>> {
    let Some(first) = hatch.chars().next() else {
        return Ok(None);
    };
    if hatch.chars().count() > 1 {
        warn!(hatch, "hatch density is not supported, using the first character");
    }
    let Some(pattern) = hatch_pattern(first) else {
        warn!(hatch, "unknown hatch pattern, dropped");
        return Ok(None);
    };
    ctx.add_tikz_lib("patterns");
    let resolved = resolve_color(ctx, color, None)?;
    let mut parts = vec![format!("pattern={pattern}")];
    if resolved.name != "black" {
        parts.push(format!("pattern color={}", resolved.name));
    }
    if resolved.alpha() != 1.0 {
        parts.push(format!("fill opacity={}", ctx.ff(resolved.alpha())));
    }
    Ok(Some(format!("postaction={{{}}}", parts.join(", "))))
}

/// Arrow style options for annotation and fancy-arrow styles.
pub fn arrow_style_options(
    ctx: &mut CompileState,
    style: &str,
    color: &ColorSpec,
) -> Result<Vec<String>> {
    let mut options: Vec<String> = match style.trim() {
        "-" => vec!["-".into()],
        "->" => vec!["->".into()],
        "<-" => vec!["<-".into()],
        "<->" => vec!["<->".into()],
        "|-|" => vec!["|-|".into()],
        "-|>" => vec!["-latex".into()],
        "<|-" => vec!["latex-".into()],
        "<|-|>" => vec!["latex-latex".into()],
        "]-[" => vec!["|-|".into()],
        "-[" => vec!["-|".into()],
        "]-" => vec!["|-".into()],
        "fancy" | "simple" | "wedge" => vec!["-latex".into(), "very thick".into()],
        other => {
            return Err(RenderError::UnknownArrowStyle {
                style: other.to_string(),
            }
            .into());
        }
    };
    let resolved = resolve_color(ctx, color, None)?;
    options.push(resolved.name);
    Ok(options)
}
