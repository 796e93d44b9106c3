//! Scatter plots (`PathCollection`) as `\addplot` tables.
//!
//! Colormapped scatters carry a `colordata` column and let PGFPlots map the
//! values. Otherwise per-point colors, when they differ, travel as RGB255
//! columns that a `scatter/@pre marker code` hook turns into colors.

use std::f64::consts::PI;

use crate::errors::Result;
use crate::figure::{ColorSpec, PathCollection, markers};
use crate::log::debug;

use super::colormap::transcode_colormap;
use super::context::CompileState;
use super::defaults::{MARKER_TOLERANCE, TABLE_KIND};
use super::files::{new_sidecar, write_sidecar};
use super::path::{ShapeStyle, draw_options};
use super::style::translate_marker;
use super::text::texify;

fn push_unique(options: &mut Vec<String>, option: &str) {
    if !options.iter().any(|o| o == option) {
        options.push(option.to_string());
    }
}

/// True when a per-point color list holds more than one distinct color.
fn varies(colors: &[ColorSpec]) -> bool {
    colors.windows(2).any(|w| w[0] != w[1])
}

fn rgb255_cell(color: &ColorSpec) -> Result<String> {
    let [r, g, b] = color.to_rgba()?.to_rgb255();
    Ok(format!("{r},{g},{b}"))
}

/// Options and columns that color each point from a table column.
fn per_point_color(
    role: &str,
    colors: &[ColorSpec],
    n: usize,
    options: &mut Vec<String>,
    labels: &mut Vec<String>,
    columns: &mut Vec<Vec<String>>,
) -> Result<()> {
    let macro_name = format!("\\{role}color");
    let color_name = format!("thispoint{role}color");
    push_unique(options, "scatter");
    options.push(format!(
        "visualization depends on={{value \\thisrow{{{role}}} \\as {macro_name}}}"
    ));
    options.push(format!(
        "scatter/@pre marker code/.append code={{\\expanded{{\\noexpand\\definecolor{{{color_name}}}{{RGB}}{{{macro_name}}}}}\\scope[{role}={color_name}]}}"
    ));
    options.push("scatter/@post marker code/.append code={\\endscope}".into());
    labels.push(role.to_string());
    let cells = (0..n)
        .map(|i| rgb255_cell(&colors[i % colors.len()]))
        .collect::<Result<Vec<_>>>()?;
    columns.push(cells);
    Ok(())
}

pub fn draw_pathcollection(ctx: &mut CompileState, collection: &PathCollection) -> Result<String> {
    let n = collection.offsets.len();
    let mut options: Vec<String> = Vec::new();
    let mut table_options: Vec<String> = Vec::new();
    let mut labels: Vec<String> = vec!["x".into(), "y".into()];
    let mut columns: Vec<Vec<String>> = vec![
        collection.offsets.iter().map(|p| ctx.ff(p.x)).collect(),
        collection.offsets.iter().map(|p| ctx.ff(p.y)).collect(),
    ];

    match (&collection.array, &collection.mapping) {
        (Some(values), Some(mapping)) => {
            options.extend(["scatter", "only marks", "scatter src=explicit"].map(String::from));
            table_options.extend(["x=x", "y=y", "meta=colordata"].map(String::from));
            labels.push("colordata".into());
            columns.push(
                (0..n)
                    .map(|i| ctx.ff(values.get(i).copied().unwrap_or(f64::NAN)))
                    .collect(),
            );
            options.push(transcode_colormap(ctx, &mapping.cmap)?.option());
        }
        _ => {
            options.push("only marks".into());
            let edge = collection.edgecolors.first();
            let face = collection.facecolors.first();

            if varies(&collection.edgecolors) || varies(&collection.facecolors) {
                if varies(&collection.edgecolors) {
                    per_point_color(
                        "draw",
                        &collection.edgecolors,
                        n,
                        &mut options,
                        &mut labels,
                        &mut columns,
                    )?;
                }
                if varies(&collection.facecolors) {
                    per_point_color(
                        "fill",
                        &collection.facecolors,
                        n,
                        &mut options,
                        &mut labels,
                        &mut columns,
                    )?;
                }
            } else {
                options.extend(draw_options(
                    ctx,
                    &ShapeStyle {
                        edge,
                        face,
                        linestyle: collection.linestyles.first(),
                        ..ShapeStyle::default()
                    },
                )?);
            }

            let detected = collection
                .paths
                .first()
                .and_then(|p| markers::detect_marker(p, MARKER_TOLERANCE));
            if let Some(code) = detected {
                let filled = face.is_some_and(|f| !f.is_none());
                if let Some(marker) = translate_marker(ctx, code, filled) {
                    options.push(format!("mark={}", marker.symbol));
                    if !marker.options.is_empty() {
                        options.push(format!("mark options={{{}}}", marker.options.join(",")));
                    }
                }
            }
            if let Some(mapping) = &collection.mapping {
                options.push(transcode_colormap(ctx, &mapping.cmap)?.option());
            }
        }
    }

    let legend_text = ctx.legend_text(&collection.label);
    if legend_text.is_none() && ctx.has_legend() {
        options.push("forget plot".into());
    }

    if n > 0 && collection.sizes.len() == n {
        // PGFPlots mark sizes are radii, the sizes here are areas
        labels.push("sizedata".into());
        columns.push(
            collection
                .sizes
                .iter()
                .map(|s| ctx.ff((s / PI).sqrt()))
                .collect(),
        );
        options.push("visualization depends on={\\thisrow{sizedata} \\as\\perpointmarksize}".into());
        push_unique(&mut options, "scatter");
        options.push(
            "scatter/@pre marker code/.append style={/tikz/mark size=\\perpointmarksize}".into(),
        );
    }

    debug!(points = n, columns = ?labels, "scatter table");

    let mut code = if options.is_empty() {
        String::from("\\addplot\n")
    } else {
        format!("\\addplot [{}]\n", options.join(", "))
    };

    if ctx.externalize_tables {
        if let Some(path) = &ctx.externals_search_path {
            table_options.push(format!("search path={{{path}}}"));
        }
    }
    if table_options.is_empty() {
        code.push_str("table{");
    } else {
        code.push_str(&format!("table [{}]{{", table_options.join(", ")));
    }

    let sep = &ctx.table_row_sep;
    let mut rows = format!("{}{sep}", labels.join(" "));
    for i in 0..n {
        let row: Vec<&str> = columns.iter().map(|c| c[i].as_str()).collect();
        rows.push_str(&row.join(" "));
        rows.push_str(sep);
    }

    if ctx.externalize_tables {
        let sidecar = new_sidecar(ctx, TABLE_KIND, "tsv")?;
        write_sidecar(&sidecar, rows.as_bytes())?;
        code.push_str(&format!("{}}};\n", ctx.reference_path(&sidecar.rel)));
    } else {
        code.push_str("%\n");
        code.push_str(&rows);
        code.push_str("};\n");
    }

    if let Some(text) = legend_text {
        code.push_str(&format!("\\addlegendentry{{{}}}\n", texify(&text)));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Colormap, Figure, ScalarMapping};
    use crate::options::Options;

    fn state() -> CompileState {
        CompileState::new(&Options::new().with_filepath("x.tex"), &Figure::default()).unwrap()
    }

    #[test]
    fn colormapped_scatter_has_a_colordata_column() {
        let mut ctx = state();
        let scatter = PathCollection::scatter(&[0.0, 1.0], &[0.0, 1.0]).with_values(
            vec![0.0, 1.0],
            ScalarMapping::new(Colormap::viridis(), (0.0, 1.0)),
        );
        let code = draw_pathcollection(&mut ctx, &scatter).unwrap();
        assert_eq!(
            code,
            "\\addplot [scatter, only marks, scatter src=explicit, colormap/viridis]\n\
             table [x=x, y=y, meta=colordata]{%\n\
             x y colordata\n0 0 0\n1 1 1\n};\n"
        );
    }

    #[test]
    fn uniform_scatter_uses_draw_options_and_detected_marker() {
        let mut ctx = state();
        let mut scatter = PathCollection::scatter(&[0.0], &[1.0])
            .with_marker_path(markers::marker_path("s").unwrap());
        scatter.facecolors = vec![ColorSpec::named("r")];
        scatter.edgecolors = vec![ColorSpec::named("k")];
        scatter.sizes = vec![36.0, 36.0];
        let code = draw_pathcollection(&mut ctx, &scatter).unwrap();
        assert!(code.starts_with("\\addplot [only marks, draw=black, fill=red, mark=square*]\n"), "{code}");
        assert!(code.contains("x y\n0 1\n"));
    }

    #[test]
    fn per_point_sizes_become_radii() {
        let mut ctx = state();
        let mut scatter = PathCollection::scatter(&[0.0, 1.0], &[0.0, 1.0]);
        scatter.sizes = vec![PI, 4.0 * PI];
        let code = draw_pathcollection(&mut ctx, &scatter).unwrap();
        assert!(code.contains("x y sizedata\n0 0 1\n1 1 2\n"), "{code}");
        assert!(code.contains("\\as\\perpointmarksize"));
        assert_eq!(code.matches("scatter,").count() + code.matches("scatter]").count(), 1);
    }

    #[test]
    fn varying_face_colors_travel_as_rgb_columns() {
        let mut ctx = state();
        let mut scatter = PathCollection::scatter(&[0.0, 1.0, 2.0], &[0.0, 0.0, 0.0]);
        scatter.facecolors = vec![ColorSpec::named("r"), ColorSpec::named("b")];
        let code = draw_pathcollection(&mut ctx, &scatter).unwrap();
        assert!(code.contains("\\thisrow{fill} \\as \\fillcolor"));
        assert!(code.contains("x y fill\n0 0 255,0,0\n1 0 0,0,255\n2 0 255,0,0\n"), "{code}");
    }
}
