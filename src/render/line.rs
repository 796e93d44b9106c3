//! `\addplot` emission for lines and line collections.

use crate::errors::Result;
use crate::figure::{DrawStyle, Line2D, LineCollection, LineStyle, MarkEvery, XData};
use crate::log::{debug, warn};

use super::axes::tick_label;
use super::color::resolve_color;
use super::context::CompileState;
use super::defaults::{DATE_FORMAT, TABLE_KIND};
use super::files::{new_sidecar, write_sidecar};
use super::path::{ShapeStyle, draw_options, draw_path};
use super::style::{PgfMarker, dash_pattern, linestyle_option, linewidth_option, translate_marker};
use super::text::texify;

pub fn draw_line2d(ctx: &mut CompileState, line: &Line2D) -> Result<String> {
    if line.xdata.is_empty() {
        debug!(label = %line.label, "empty line skipped");
        return Ok(String::new());
    }

    let mut options = Vec::new();
    if let Some(width) = linewidth_option(ctx, line.linewidth) {
        options.push(width);
    }
    let color = resolve_color(ctx, &line.color, None)?;
    options.push(color.name.clone());

    let alpha = line
        .alpha
        .or_else(|| (color.alpha() < 1.0).then(|| color.alpha()));
    if let Some(alpha) = alpha {
        options.push(format!("opacity={}", ctx.ff(alpha)));
    }

    options.extend(stroke_options(ctx, line));

    let mut has_marker = false;
    if line.has_marker() {
        let filled = !line.marker_face().is_none();
        if let Some(marker) = translate_marker(ctx, &line.marker, filled) {
            mark_options(ctx, line, marker, &color.name, &mut options)?;
            has_marker = true;
        }
    }
    if has_marker && !line.linestyle.is_visible() {
        options.push("only marks".into());
    }

    match line.drawstyle {
        DrawStyle::Default => {}
        DrawStyle::Steps | DrawStyle::StepsPre => options.push("const plot mark right".into()),
        DrawStyle::StepsMid => options.push("const plot mark mid".into()),
        DrawStyle::StepsPost => options.push("const plot mark left".into()),
    }

    let legend_text = ctx.legend_text(&line.label);
    if legend_text.is_none() && ctx.has_legend() {
        options.push("forget plot".into());
    }

    let mut code = if line.zdata.is_some() {
        String::from("\\addplot3 ")
    } else {
        String::from("\\addplot ")
    };
    if !options.is_empty() {
        code.push_str(&format!("[{}]\n", options.join(", ")));
    }
    code.push_str(&line_table(ctx, line)?);

    if let Some(text) = legend_text {
        code.push_str(&format!("\\addlegendentry{{{}}}\n", texify(&text)));
    }
    Ok(code)
}

/// Dash options, preferring an explicit dash sequence over the named style.
fn stroke_options(ctx: &CompileState, line: &Line2D) -> Vec<String> {
    let (offset, pattern) = match (&line.dashes, &line.linestyle) {
        (Some((offset, pattern)), _) => (*offset, pattern.as_slice()),
        (None, LineStyle::Custom { offset, pattern }) => (*offset, pattern.as_slice()),
        (None, style) => return linestyle_option(ctx, style).into_iter().collect(),
    };
    let mut options = Vec::new();
    if let Some(dashes) = dash_pattern(ctx, pattern) {
        options.push(dashes);
        if offset != 0.0 {
            options.push(format!("dash phase={}pt", ctx.ff(offset)));
        }
    }
    options
}

fn mark_options(
    ctx: &mut CompileState,
    line: &Line2D,
    marker: PgfMarker,
    line_color: &str,
    options: &mut Vec<String>,
) -> Result<()> {
    options.push(format!("mark={}", marker.symbol));

    if line.markersize > 0.0 {
        // PGFPlots sizes marks by radius
        options.push(format!("mark size={}", ctx.ff(0.5 * line.markersize)));
    }

    match &line.markevery {
        Some(MarkEvery::Every(n)) if *n > 0 => options.push(format!("mark repeat={n}")),
        Some(MarkEvery::Indices(indices)) if !indices.is_empty() => {
            let one_based: Vec<String> = indices.iter().map(|i| (i + 1).to_string()).collect();
            options.push(format!("mark indices={{{}}}", one_based.join(", ")));
        }
        _ => {}
    }

    let mut mark_opts = vec!["solid".to_string()];
    mark_opts.extend(marker.options);

    let face = line.marker_face();
    if face.is_none() {
        mark_opts.push("fill opacity=0".into());
    } else {
        let fill = resolve_color(ctx, &face, None)?;
        if fill.name != line_color {
            mark_opts.push(format!("fill={}", fill.name));
        }
    }

    let edge = line.marker_edge();
    if edge != face {
        let draw = resolve_color(ctx, &edge, None)?;
        if draw.name != line_color {
            mark_opts.push(format!("draw={}", draw.name));
        }
    }

    options.push(format!("mark options={{{}}}", mark_opts.join(",")));
    Ok(())
}

/// Unique category names in order of first appearance.
fn categories(names: &[String]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for name in names {
        if !seen.contains(&name.as_str()) {
            seen.push(name);
        }
    }
    seen
}

fn line_table(ctx: &mut CompileState, line: &Line2D) -> Result<String> {
    let y = line.y_with_gaps();
    let mut table_options: Vec<String> = Vec::new();
    let mut col_sep = " ";

    let x: Vec<String> = match &line.xdata {
        XData::Dates(dates) => {
            table_options.push("header=false".into());
            table_options.push("col sep=comma".into());
            col_sep = ",";
            ctx.add_axis_option("date coordinates in=x");
            if let Some((lo, hi)) = ctx.scope.as_ref().map(|s| s.xlim) {
                if let (Some(lo), Some(hi), Some(env)) = (
                    crate::figure::num2date(lo),
                    crate::figure::num2date(hi),
                    ctx.current_axes.as_mut(),
                ) {
                    let option = format!(
                        "xmin={}, xmax={}",
                        lo.format(DATE_FORMAT),
                        hi.format(DATE_FORMAT)
                    );
                    env.set_limits("x", option);
                }
            }
            dates.iter().map(|d| d.format(DATE_FORMAT).to_string()).collect()
        }
        XData::Categories(names) => {
            let unique = categories(names);
            let ticks: Vec<String> = (0..unique.len()).map(|i| i.to_string()).collect();
            ctx.add_axis_option(format!("xtick={{{}}}", ticks.join(",")));
            let labels: Vec<String> = unique.iter().map(|name| tick_label(name)).collect();
            ctx.add_axis_option(format!("xticklabels={{{}}}", labels.join(",")));
            line.xdata.as_floats().iter().map(|x| ctx.ff(*x)).collect()
        }
        XData::Numeric(values) => values.iter().map(|x| ctx.ff(*x)).collect(),
    };

    if x.len() != y.len() {
        warn!(x = x.len(), y = y.len(), "line data lengths differ, truncating");
    }

    if y.iter().any(|v| !v.is_finite()) {
        ctx.add_axis_option("unbounded coords=jump");
    }

    if ctx.table_row_sep != "\n" {
        table_options.push(format!("row sep={}", ctx.table_row_sep.trim()));
    }
    if ctx.externalize_tables {
        if let Some(path) = &ctx.externals_search_path {
            table_options.push(format!("search path={{{path}}}"));
        }
    }

    let rows: String = match &line.zdata {
        Some(z) => x
            .iter()
            .zip(&y)
            .zip(z)
            .map(|((x, y), z)| {
                format!("{x}{col_sep}{}{col_sep}{}{}", ctx.ff(*y), ctx.ff(*z), ctx.table_row_sep)
            })
            .collect(),
        None => x
            .iter()
            .zip(&y)
            .map(|(x, y)| format!("{x}{col_sep}{}{}", ctx.ff(*y), ctx.table_row_sep))
            .collect(),
    };

    let mut code = if table_options.is_empty() {
        String::from("table {")
    } else {
        format!("table [{}] {{", table_options.join(","))
    };

    if ctx.externalize_tables {
        let sidecar = new_sidecar(ctx, TABLE_KIND, "tsv")?;
        write_sidecar(&sidecar, rows.as_bytes())?;
        code.push_str(&format!("{}}};\n", ctx.reference_path(&sidecar.rel)));
    } else {
        code.push_str("%\n");
        code.push_str(&rows);
        code.push_str("};\n");
    }
    Ok(code)
}

/// Each path of a line collection as its own `\path`.
///
/// Missing per-path styles fall back to the first entry.
pub fn draw_linecollection(ctx: &mut CompileState, collection: &LineCollection) -> Result<String> {
    let mut code = String::new();
    for (i, path) in collection.paths.iter().enumerate() {
        let style = ShapeStyle {
            edge: nth_or_first(&collection.colors, i),
            linewidth: nth_or_first(&collection.linewidths, i).copied(),
            linestyle: nth_or_first(&collection.linestyles, i),
            ..ShapeStyle::default()
        };
        let options = draw_options(ctx, &style)?;
        let drawn = draw_path(ctx, path, &options)?;
        if !drawn.code.is_empty() {
            code.push_str(&drawn.code);
            code.push('\n');
        }
    }
    Ok(code)
}

fn nth_or_first<T>(items: &[T], i: usize) -> Option<&T> {
    items.get(i).or_else(|| items.first())
}
