//! Text nodes, annotations and TeX escaping of user strings.

use glam::DVec2;

use crate::errors::Result;
use crate::figure::{Annotation, BoxStyle, Coords, FontStyle, HAlign, LineStyle, Text, TextBox, VAlign};
use crate::log::warn;

use super::color::resolve_color;
use super::context::CompileState;
use super::defaults::LINEWIDTH_SCALE;
use super::style::arrow_style_options;

/// Make a user string safe for TeX.
///
/// `$...$` math segments pass through untouched; in text segments `_`, `#`
/// and `&` are escaped and `^` becomes `\^{}`. Already escaped characters are
/// left alone. The Unicode minus sign becomes `\ensuremath{-}`.
pub fn texify(text: &str) -> String {
    let text = text.replace('\u{2212}', "\\ensuremath{-}");
    let mut out = String::with_capacity(text.len());
    let mut in_math = false;
    let mut escaped = false;
    for c in text.chars() {
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                out.push(c);
                escaped = true;
            }
            '$' => {
                in_math = !in_math;
                out.push(c);
            }
            '_' | '#' | '&' if !in_math => {
                out.push('\\');
                out.push(c);
            }
            '^' if !in_math => out.push_str("\\^{}"),
            _ => out.push(c),
        }
    }
    out
}

/// TikZ coordinate for a position in the given coordinate system.
///
/// `None` when the system has no TikZ equivalent.
fn coordinate(ctx: &CompileState, coords: &Coords, p: DVec2) -> Option<String> {
    match coords {
        Coords::Data => Some(format!("(axis cs:{},{})", ctx.ff(p.x), ctx.ff(p.y))),
        Coords::AxesFraction => Some(fraction_coordinate(ctx, "current axis", p)),
        Coords::FigureFraction => Some(fraction_coordinate(ctx, "current bounding box", p)),
        Coords::OffsetPoints | Coords::Other(_) => None,
    }
}

fn fraction_coordinate(ctx: &CompileState, node: &str, p: DVec2) -> String {
    format!(
        "({{$({node}.south west)!{}!({node}.south east)$}}|-{{$({node}.south west)!{}!({node}.north west)$}})",
        ctx.ff(p.x),
        ctx.ff(p.y)
    )
}

fn anchor(ha: HAlign, va: VAlign) -> Option<String> {
    let h = match ha {
        HAlign::Left => "west",
        HAlign::Center => "",
        HAlign::Right => "east",
    };
    let v = match va {
        VAlign::Top => "north",
        VAlign::Center => "",
        VAlign::Baseline | VAlign::CenterBaseline => "base",
        VAlign::Bottom => "south",
    };
    if h.is_empty() && v.is_empty() {
        return None;
    }
    Some(format!("anchor={v} {h}").trim().to_string())
}

fn box_options(
    ctx: &mut CompileState,
    bbox: &TextBox,
    scaling: f64,
    properties: &mut Vec<String>,
) -> Result<()> {
    if bbox.fill {
        let fill = resolve_color(ctx, &bbox.facecolor, None)?;
        properties.push(format!("fill={}", fill.name));
        if fill.alpha() < 1.0 {
            properties.push(format!("fill opacity={}", ctx.ff(fill.alpha())));
        }
    }
    let draw = resolve_color(ctx, &bbox.edgecolor, None)?;
    properties.push(format!("draw={}", draw.name));
    properties.push(format!("line width={}pt", ctx.ff(bbox.linewidth * LINEWIDTH_SCALE)));
    properties.push(format!("inner sep={}pt", ctx.ff(bbox.pad * ctx.font_size)));

    match bbox.style {
        BoxStyle::Round | BoxStyle::Round4 => properties.push("rounded corners".into()),
        BoxStyle::RArrow => {
            ctx.add_tikz_lib("shapes.arrows");
            properties.push("single arrow".into());
        }
        BoxStyle::LArrow => {
            ctx.add_tikz_lib("shapes.arrows");
            properties.push("single arrow".into());
            properties.push("shape border rotate=180".into());
        }
        BoxStyle::DArrow => {
            ctx.add_tikz_lib("shapes.arrows");
            properties.push("double arrow".into());
        }
        BoxStyle::Circle => properties.push("circle".into()),
        BoxStyle::Roundtooth => {
            ctx.add_tikz_lib("decorations.pathmorphing");
            properties.push("decorate".into());
            properties.push("decoration={snake,amplitude=0.5,segment length=3}".into());
        }
        BoxStyle::Sawtooth => {
            ctx.add_tikz_lib("decorations.pathmorphing");
            properties.push("decorate".into());
            properties.push("decoration={zigzag,amplitude=0.5,segment length=3}".into());
        }
        BoxStyle::Square => {}
    }

    match &bbox.linestyle {
        LineStyle::Dotted => properties.push("dotted".into()),
        LineStyle::Dashed => properties.push("dashed".into()),
        LineStyle::DashDot => properties.push(format!(
            "dash pattern=on {}pt off {}pt on {}pt off {}pt",
            ctx.ff(1.0 / scaling),
            ctx.ff(3.0 / scaling),
            ctx.ff(6.0 / scaling),
            ctx.ff(3.0 / scaling)
        )),
        _ => {}
    }
    Ok(())
}

fn node(ctx: &mut CompileState, text: &Text, position: &str) -> Result<String> {
    let mut properties = Vec::new();

    // Font sizes come out too large without the factor one half
    let scaling = 0.5 * text.size / ctx.font_size;
    if scaling != 1.0 {
        properties.push(format!("scale={}", ctx.ff(scaling)));
    }
    if let Some(bbox) = &text.bbox {
        box_options(ctx, bbox, scaling, &mut properties)?;
    }
    if let Some(anchor) = anchor(text.ha, text.va) {
        properties.push(anchor);
    }
    let color = resolve_color(ctx, &text.color, None)?;
    properties.push(format!("text={}", color.name));
    properties.push(format!("rotate={:.1}", text.rotation));

    let mut style = Vec::new();
    if text.style != FontStyle::Normal {
        style.push("\\itshape".to_string());
    }
    if text.weight.is_bold() {
        style.push("\\bfseries".to_string());
    }

    let mut body = texify(&text.text);
    if body.contains('\n') {
        properties.push(format!("align={}", text.ha.as_str()));
        body = body.replace('\n', "\\\\");
    }
    style.push(body);

    Ok(format!(
        "\\draw {position} node[\n  {}\n]{{{}}};\n",
        properties.join(",\n  "),
        style.join(" ")
    ))
}

fn is_axes_title(ctx: &CompileState, text: &str) -> bool {
    ctx.scope.as_ref().is_some_and(|s| s.title == text)
}

pub fn draw_text(ctx: &mut CompileState, text: &Text) -> Result<String> {
    if text.text.is_empty() || is_axes_title(ctx, &text.text) {
        return Ok(String::new());
    }
    let position = coordinate(ctx, &text.coords, text.position).unwrap_or_else(|| {
        warn!(coords = ?text.coords, "unsupported text coordinates, using data coordinates");
        coordinate(ctx, &Coords::Data, text.position).unwrap_or_default()
    });
    node(ctx, text, &position)
}

pub fn draw_annotation(ctx: &mut CompileState, annotation: &Annotation) -> Result<String> {
    let text = &annotation.text;
    if text.text.is_empty() || is_axes_title(ctx, &text.text) {
        return Ok(String::new());
    }

    let Some(xy) = coordinate(ctx, &annotation.xycoords, annotation.xy) else {
        warn!(coords = ?annotation.xycoords, "unsupported annotation coordinates, placing text only");
        return draw_text(ctx, &text.clone().with_coords(Coords::Data));
    };

    let text_pos = match &text.coords {
        Coords::OffsetPoints => format!(
            "{xy} ++({}pt,{}pt)",
            ctx.ff(text.position.x),
            ctx.ff(text.position.y)
        ),
        coords => match coordinate(ctx, coords, text.position) {
            Some(pos) => pos,
            None => {
                warn!(coords = ?coords, "unsupported annotation text coordinates");
                return draw_text(ctx, &text.clone().with_coords(Coords::Data));
            }
        },
    };

    let mut code = String::new();
    if let Some(arrow) = &annotation.arrow {
        let style = arrow_style_options(ctx, &arrow.arrowstyle, &arrow.color)?;
        code.push_str(&format!("\\draw[{}] {text_pos} -- {xy};\n", style.join(",")));
    }
    code.push_str(&node(ctx, text, &text_pos)?);
    Ok(code)
}
