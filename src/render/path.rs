//! Path lowering to `\path` commands and shared draw options.

use glam::DVec2;

use crate::errors::{RenderError, Result};
use crate::figure::{ColorSpec, LineStyle, Path, PathSegment, num2date};

use super::color::resolve_color;
use super::context::CompileState;
use super::defaults::DATE_FORMAT;
use super::style::{hatch_option, linestyle_option, linewidth_option};

/// Stroke and fill of a shape, as given on the artist
#[derive(Clone, Debug, Default)]
pub struct ShapeStyle<'a> {
    pub edge: Option<&'a ColorSpec>,
    pub face: Option<&'a ColorSpec>,
    pub alpha: Option<f64>,
    pub linewidth: Option<f64>,
    pub linestyle: Option<&'a LineStyle>,
    pub hatch: Option<&'a str>,
    pub hatch_color: Option<&'a ColorSpec>,
}

/// Options for `\path`, `\draw` and `\addplot` from a shape style.
///
/// Equal sub-unit alphas collapse into one `opacity=`; otherwise draw and
/// fill opacities are emitted separately.
pub fn draw_options(ctx: &mut CompileState, style: &ShapeStyle<'_>) -> Result<Vec<String>> {
    let mut options = Vec::new();

    let edge = style
        .edge
        .map(|ec| resolve_color(ctx, ec, style.alpha))
        .transpose()?;
    let face = style
        .face
        .map(|fc| resolve_color(ctx, fc, style.alpha))
        .transpose()?;

    if let Some(ec) = &edge {
        if ec.is_none() {
            options.push("draw=none".to_string());
        } else {
            options.push(format!("draw={}", ec.name));
        }
    }
    if let Some(fc) = &face {
        options.push(format!("fill={}", fc.name));
    }

    let edge_alpha = edge.as_ref().filter(|c| !c.is_none()).map(|c| c.alpha());
    let face_alpha = face.as_ref().filter(|c| !c.is_none()).map(|c| c.alpha());
    match (edge_alpha, face_alpha) {
        (Some(ea), Some(fa)) if ea == fa && ea != 1.0 => {
            options.push(format!("opacity={}", ctx.ff(ea)));
        }
        _ => {
            if let Some(ea) = edge_alpha.filter(|a| *a > 0.0 && *a < 1.0) {
                options.push(format!("draw opacity={}", ctx.ff(ea)));
            }
            if let Some(fa) = face_alpha.filter(|a| *a > 0.0 && *a < 1.0) {
                options.push(format!("fill opacity={}", ctx.ff(fa)));
            }
        }
    }

    // Stroke settings are meaningless without a stroke
    let stroked = !edge.as_ref().is_some_and(|ec| ec.is_none());
    if let Some(width) = style.linewidth.filter(|_| stroked) {
        if let Some(opt) = linewidth_option(ctx, width) {
            options.push(opt);
        }
    }
    if let Some(ls) = style.linestyle.filter(|_| stroked) {
        if let Some(opt) = linestyle_option(ctx, ls) {
            options.push(opt);
        }
    }

    if let Some(hatch) = style.hatch.filter(|h| !h.is_empty()) {
        let color = match style.hatch_color {
            Some(c) => c.clone(),
            None => match &edge {
                Some(ec) if !ec.is_none() => ColorSpec::from(ec.rgba.with_alpha(1.0)),
                _ => ColorSpec::named("black"),
            },
        };
        if let Some(opt) = hatch_option(ctx, hatch, &color)? {
            options.push(opt);
        }
    }

    Ok(options)
}

/// X coordinate as written in the output; dates become `YYYY-MM-DD HH:MM`.
pub fn format_x(ctx: &CompileState, x: f64) -> String {
    if ctx.x_is_date() {
        if let Some(date) = num2date(x) {
            return date.format(DATE_FORMAT).to_string();
        }
    }
    ctx.ff(x)
}

fn axis_point(ctx: &CompileState, p: DVec2) -> String {
    format!("(axis cs:{},{})", format_x(ctx, p.x), ctx.ff(p.y))
}

/// A lowered path
#[derive(Clone, Debug, PartialEq)]
pub struct DrawnPath {
    pub code: String,
    /// The path contains a close operation and may be filled
    pub is_area: bool,
}

/// Lower a path to `\path [options] ... ;`.
///
/// Quadratic segments are elevated to cubics using the previous end point.
pub fn draw_path(ctx: &CompileState, path: &Path, options: &[String]) -> Result<DrawnPath> {
    if path.vertices.len() == 2
        && path.vertices[0] == path.vertices[1]
        && options.iter().any(|o| o == "fill opacity=0")
    {
        return Ok(DrawnPath {
            code: String::new(),
            is_area: false,
        });
    }

    let mut nodes: Vec<String> = Vec::new();
    let mut prev: Option<DVec2> = None;
    let mut is_area = false;
    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                nodes.push(axis_point(ctx, p));
                prev = Some(p);
            }
            PathSegment::LineTo(p) => {
                nodes.push(format!("--{}", axis_point(ctx, p)));
                prev = Some(p);
            }
            PathSegment::Curve3(c, end) => {
                let start = prev.ok_or(RenderError::DanglingCurve)?;
                let q1 = start + 2.0 / 3.0 * (c - start);
                let q2 = end + 2.0 / 3.0 * (c - end);
                nodes.push(format!(
                    ".. controls {} and {} .. {}",
                    axis_point(ctx, q1),
                    axis_point(ctx, q2),
                    axis_point(ctx, end)
                ));
                prev = Some(end);
            }
            PathSegment::Curve4(c1, c2, end) => {
                nodes.push(format!(
                    ".. controls {} and {} .. {}",
                    axis_point(ctx, c1),
                    axis_point(ctx, c2),
                    axis_point(ctx, end)
                ));
                prev = Some(end);
            }
            PathSegment::Close => {
                nodes.push("--cycle".to_string());
                is_area = true;
            }
        }
    }

    let head = if options.is_empty() {
        "\\path ".to_string()
    } else {
        format!("\\path [{}]\n", options.join(", "))
    };
    Ok(DrawnPath {
        code: format!("{head}{};\n", nodes.join("\n")),
        is_area,
    })
}
