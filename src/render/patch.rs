//! Patches (rectangles, ellipses, polygons, arrows) and patch collections.

use glam::DAffine2;

use crate::errors::Result;
use crate::figure::{Patch, PatchCollection, PatchKind, Path};
use crate::log::debug;

use super::context::CompileState;
use super::path::{ShapeStyle, draw_options, draw_path};
use super::style::arrow_style_options;
use super::text::texify;

pub fn draw_patch(ctx: &mut CompileState, patch: &Patch) -> Result<String> {
    if let PatchKind::FancyArrow { arrowstyle, path } = &patch.kind {
        let options = draw_options(
            ctx,
            &ShapeStyle {
                edge: Some(&patch.edgecolor),
                alpha: patch.alpha,
                linewidth: Some(patch.linewidth),
                linestyle: Some(&patch.linestyle),
                hatch: patch.hatch.as_deref(),
                hatch_color: patch.hatch_color.as_ref(),
                ..ShapeStyle::default()
            },
        )?;
        return draw_fancy_arrow(ctx, patch, arrowstyle, path, options);
    }

    let options = draw_options(
        ctx,
        &ShapeStyle {
            edge: Some(&patch.edgecolor),
            face: Some(&patch.facecolor),
            alpha: patch.alpha,
            linewidth: Some(patch.linewidth),
            linestyle: Some(&patch.linestyle),
            hatch: patch.hatch.as_deref(),
            hatch_color: patch.hatch_color.as_ref(),
        },
    )?;

    match &patch.kind {
        PatchKind::Rectangle {
            x,
            y,
            width,
            height,
        } => draw_rectangle(ctx, patch, (*x, *y, *width, *height), &options),
        PatchKind::Ellipse {
            center,
            width,
            height,
            angle,
        } => {
            let mut options = options;
            if *angle != 0.0 {
                options.push(format!(
                    "rotate around={{{}:(axis cs:{},{})}}",
                    ctx.ff(*angle),
                    ctx.ff(center.x),
                    ctx.ff(center.y)
                ));
            }
            let mut code = format!(
                "\\draw[{}] (axis cs:{},{}) ellipse ({} and {});\n",
                options.join(", "),
                ctx.ff(center.x),
                ctx.ff(center.y),
                ctx.ff(0.5 * width),
                ctx.ff(0.5 * height)
            );
            code.push_str(&patch_legend(ctx, &patch.label, &options, "area legend"));
            Ok(code)
        }
        PatchKind::Circle { center, radius } => {
            let mut code = format!(
                "\\draw[{}] (axis cs:{},{}) circle ({});\n",
                options.join(", "),
                ctx.ff(center.x),
                ctx.ff(center.y),
                ctx.ff(*radius)
            );
            code.push_str(&patch_legend(ctx, &patch.label, &options, "area legend"));
            Ok(code)
        }
        PatchKind::Path(path) => {
            let drawn = draw_path(ctx, path, &options)?;
            let kind = if drawn.is_area { "area legend" } else { "line legend" };
            let legend = patch_legend(ctx, &patch.label, &options, kind);
            Ok(drawn.code + &legend)
        }
        PatchKind::FancyArrow { .. } => Ok(String::new()),
    }
}

/// `\addlegendimage` + `\addlegendentry` when the label is in the legend.
fn patch_legend(ctx: &CompileState, label: &str, options: &[String], kind: &str) -> String {
    let Some(text) = ctx.legend_text(label) else {
        return String::new();
    };
    let mut image = vec![kind.to_string()];
    image.extend(options.iter().cloned());
    format!(
        "\\addlegendimage{{{}}}\n\\addlegendentry{{{}}}\n\n",
        image.join(", "),
        texify(&text)
    )
}

fn draw_rectangle(
    ctx: &mut CompileState,
    patch: &Patch,
    (x, y, width, height): (f64, f64, f64, f64),
    options: &[String],
) -> Result<String> {
    // Unlabelled rectangles belong to axes decorations PGFPlots draws itself
    if patch.label.is_empty() {
        return Ok(String::new());
    }

    // Bars carry `_nolegend_`; their series label lives on the container
    let container_label = ctx
        .scope
        .as_ref()
        .and_then(|s| s.container_label(ctx.child_index))
        .map(str::to_string);
    let label = container_label.unwrap_or_else(|| patch.label.clone());

    let mut code = format!(
        "\\draw[{}] (axis cs:{},{}) rectangle (axis cs:{},{});\n",
        options.join(", "),
        ctx.ff(x),
        ctx.ff(y),
        ctx.ff(x + width),
        ctx.ff(y + height)
    );

    if !label.starts_with('_') && !ctx.rectangle_legends.contains(&label) {
        let text = ctx.legend_text(&label).unwrap_or_else(|| label.clone());
        let mut image = vec!["ybar".to_string(), "ybar legend".to_string()];
        image.extend(options.iter().cloned());
        code.push_str(&format!(
            "\\addlegendimage{{{}}};\n\\addlegendentry{{{}}}\n\n",
            image.join(", "),
            texify(&text)
        ));
        debug!(label = %label, "bar legend image");
        ctx.rectangle_legends.insert(label);
    }
    Ok(code)
}

fn draw_fancy_arrow(
    ctx: &mut CompileState,
    patch: &Patch,
    arrowstyle: &str,
    path: &Path,
    options: Vec<String>,
) -> Result<String> {
    let style = arrow_style_options(ctx, arrowstyle, &patch.edgecolor)?;
    let drawn: Vec<_> = path.drawn_vertices().collect();
    if let [a, b] = drawn.as_slice() {
        return Ok(format!(
            "\\draw[{}] (axis cs:{},{}) -- (axis cs:{},{});\n",
            style.join(", "),
            ctx.ff(a.x),
            ctx.ff(a.y),
            ctx.ff(b.x),
            ctx.ff(b.y)
        ));
    }
    let mut options = options;
    options.extend(style);
    Ok(draw_path(ctx, path, &options)?.code)
}

fn cycled<T>(items: &[T], i: usize) -> Option<&T> {
    if items.is_empty() {
        None
    } else {
        items.get(i % items.len())
    }
}

/// Every path of the collection with its own cycled style.
pub fn draw_patchcollection(
    ctx: &mut CompileState,
    collection: &PatchCollection,
) -> Result<String> {
    let mut code = String::new();
    let mut last_options = Vec::new();
    let mut is_area = false;

    for (i, path) in collection.paths.iter().enumerate() {
        let transform = cycled(&collection.transforms, i)
            .copied()
            .unwrap_or(DAffine2::IDENTITY);
        let path = match cycled(&collection.offsets, i) {
            Some(offset) => path.transformed(&transform).translated(*offset),
            None => path.transformed(&transform),
        };

        let options = draw_options(
            ctx,
            &ShapeStyle {
                edge: cycled(&collection.edgecolors, i),
                face: cycled(&collection.facecolors, i),
                linewidth: cycled(&collection.linewidths, i).copied(),
                linestyle: cycled(&collection.linestyles, i),
                hatch: collection.hatch.as_deref(),
                ..ShapeStyle::default()
            },
        )?;
        let drawn = draw_path(ctx, &path, &options)?;
        code.push_str(&drawn.code);
        is_area = drawn.is_area;
        last_options = options;
    }

    let kind = if is_area { "area legend" } else { "line legend" };
    code.push_str(&patch_legend(ctx, &collection.label, &last_options, kind));
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Axes, AxesId, ColorSpec, ContainerKind, Figure, Legend};
    use crate::options::Options;
    use crate::render::context::AxesScope;
    use glam::DVec2;

    fn state() -> CompileState {
        CompileState::new(&Options::new().with_filepath("x.tex"), &Figure::default()).unwrap()
    }

    #[test]
    fn rectangles_without_label_are_skipped() {
        let mut ctx = state();
        let code = draw_patch(&mut ctx, &Patch::rectangle(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert!(code.is_empty());
    }

    #[test]
    fn bar_series_get_one_legend_image() {
        let mut axes = Axes::new(AxesId(0));
        axes.push_container(
            ContainerKind::Bar,
            "apples",
            vec![
                crate::figure::Artist::from(Patch::bar(0.0, 0.0, 0.8, 1.0, "r")),
                crate::figure::Artist::from(Patch::bar(1.0, 0.0, 0.8, 2.0, "r")),
            ],
        );
        let mut ctx = state();
        ctx.scope = Some(AxesScope::new(&axes));

        let mut codes = Vec::new();
        for (i, child) in axes.children.iter().enumerate() {
            let crate::figure::Artist::Patch(bar) = child else {
                unreachable!()
            };
            ctx.child_index = i;
            codes.push(draw_patch(&mut ctx, bar).unwrap());
        }
        assert_eq!(
            codes[0],
            "\\draw[draw=none, fill=red] (axis cs:0,0) rectangle (axis cs:0.8,1);\n\
             \\addlegendimage{ybar, ybar legend, draw=none, fill=red};\n\
             \\addlegendentry{apples}\n\n"
        );
        assert_eq!(
            codes[1],
            "\\draw[draw=none, fill=red] (axis cs:1,0) rectangle (axis cs:1.8,2);\n"
        );
    }

    #[test]
    fn rotated_ellipse_and_circle() {
        let mut ctx = state();
        let mut ellipse = Patch::new(PatchKind::Ellipse {
            center: DVec2::new(1.0, 2.0),
            width: 4.0,
            height: 2.0,
            angle: 30.0,
        });
        ellipse.linewidth = 1.0;
        let code = draw_patch(&mut ctx, &ellipse.with_colors("k", "none")).unwrap();
        assert_eq!(
            code,
            "\\draw[draw=black, fill=none, rotate around={30:(axis cs:1,2)}] (axis cs:1,2) ellipse (2 and 1);\n"
        );

        let circle = Patch::new(PatchKind::Circle {
            center: DVec2::ZERO,
            radius: 0.5,
        })
        .with_colors("k", "w");
        let code = draw_patch(&mut ctx, &circle).unwrap();
        assert!(code.ends_with("(axis cs:0,0) circle (0.5);\n"), "{code}");
    }

    #[test]
    fn labelled_polygon_gets_an_area_legend() {
        let mut axes = Axes::new(AxesId(0));
        axes.push(Legend::for_labels(["region"]));
        let mut ctx = state();
        ctx.scope = Some(AxesScope::new(&axes));

        let triangle = Path::polyline(&[DVec2::ZERO, DVec2::X, DVec2::Y], true);
        let patch = Patch::new(PatchKind::Path(triangle))
            .with_colors("k", "r")
            .with_label("region");
        let code = draw_patch(&mut ctx, &patch).unwrap();
        assert!(code.contains("--cycle;\n"));
        assert!(code.ends_with(
            "\\addlegendimage{area legend, draw=black, fill=red}\n\\addlegendentry{region}\n\n"
        ));
    }

    #[test]
    fn two_point_arrows_are_straight_draws() {
        let mut ctx = state();
        let arrow = Patch::new(PatchKind::FancyArrow {
            arrowstyle: "->".into(),
            path: Path::polyline(&[DVec2::ZERO, DVec2::ONE], false),
        })
        .with_colors("r", "none");
        let code = draw_patch(&mut ctx, &arrow).unwrap();
        assert_eq!(code, "\\draw[->, red] (axis cs:0,0) -- (axis cs:1,1);\n");
    }

    #[test]
    fn collection_styles_cycle_and_offsets_apply() {
        let mut ctx = state();
        let square = Path::rectangle(0.0, 0.0, 1.0, 1.0);
        let mut collection = PatchCollection::new(vec![square.clone(), square]);
        collection.facecolors = vec![ColorSpec::named("r"), ColorSpec::named("b")];
        collection.edgecolors = vec![ColorSpec::named("k")];
        collection.offsets = vec![DVec2::ZERO, DVec2::new(10.0, 0.0)];
        let code = draw_patchcollection(&mut ctx, &collection).unwrap();
        assert!(code.contains("\\path [draw=black, fill=red]\n(axis cs:0,0)"));
        assert!(code.contains("\\path [draw=black, fill=blue]\n(axis cs:10,0)"));
    }
}
