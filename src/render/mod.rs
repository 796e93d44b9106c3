//! Lowering of a figure tree to PGFPlots code
//!
//! This module is organized into submodules:
//! - `context`: CompileState threaded through every emitter
//! - `defaults`: fixed constants of the lowering
//! - `color`, `colormap`, `style`: translation of visual properties
//! - `files`: sidecar file allocation
//! - `path`: path lowering shared by patches and collections
//! - `line`, `patch`, `scatter`, `raster`, `text`, `legend`: artist emitters
//! - `axes`: axis environments and the groupplot state machine
//! - `content`: z-ordered fragment buckets
//! - `document`: final assembly

pub mod axes;
pub mod color;
pub mod colormap;
pub mod content;
pub mod context;
pub mod defaults;
pub mod document;
pub mod files;
pub mod legend;
pub mod line;
pub mod patch;
pub mod path;
pub mod raster;
pub mod scatter;
pub mod style;
pub mod text;

pub use context::CompileState;

use crate::errors::Result;
use crate::figure::{Artist, ArtistNode, Axes, Figure};
use crate::log::{debug, info, warn};
use crate::options::Options;

use axes::{AxisEnv, is_colorbar};
use content::ContentBucket;
use context::AxesScope;

/// Compile a figure into the finished document text.
pub fn compile(figure: &Figure, options: &Options) -> Result<String> {
    let mut ctx = CompileState::new(options, figure)?;
    let body = compile_children(&mut ctx, &figure.children, figure)?;
    Ok(document::assemble(&mut ctx, options, body))
}

/// Compile siblings and return their fragments in z-order.
fn compile_children(
    ctx: &mut CompileState,
    children: &[Artist],
    figure: &Figure,
) -> Result<Vec<String>> {
    let mut content = ContentBucket::new();
    let figure_px = figure.size_pixels();

    for (index, child) in children.iter().enumerate() {
        if !child.visible() {
            continue;
        }
        ctx.child_index = index;
        let zorder = child.zorder();
        match child {
            // Axes always come first within their parent
            Artist::Axes(axes) => content.extend(compile_axes(ctx, axes, figure)?, 0.0),
            Artist::Line(line) => content.push(line::draw_line2d(ctx, line)?, zorder),
            Artist::Patch(patch) => content.push(patch::draw_patch(ctx, patch)?, zorder),
            Artist::PatchCollection(collection) => {
                content.push(patch::draw_patchcollection(ctx, collection)?, zorder)
            }
            Artist::LineCollection(collection) => {
                content.push(line::draw_linecollection(ctx, collection)?, zorder)
            }
            Artist::PathCollection(collection) => {
                content.push(scatter::draw_pathcollection(ctx, collection)?, zorder)
            }
            Artist::Image(image) => content.push(raster::draw_image(ctx, image)?, zorder),
            Artist::QuadMesh(mesh) => content.push(raster::draw_quadmesh(ctx, mesh)?, zorder),
            Artist::Text(text) => content.push(text::draw_text(ctx, text)?, zorder),
            Artist::Annotation(annotation) => {
                content.push(text::draw_annotation(ctx, annotation)?, zorder)
            }
            Artist::Legend(legend) => legend::draw_legend(ctx, legend, figure_px)?,
            Artist::Spine(_) | Artist::Axis(_) => {}
            Artist::Unknown(unknown) => {
                warn!(type_name = %unknown.type_name, "don't know how to handle artist, skipping");
            }
        }
    }
    Ok(content.flatten())
}

fn compile_axes(ctx: &mut CompileState, axes: &Axes, figure: &Figure) -> Result<Vec<String>> {
    if is_colorbar(axes) {
        debug!(id = axes.id.0, "colorbar axes, attached to its mappable's axis");
        return Ok(Vec::new());
    }

    let mut env = AxisEnv::new(ctx, axes, figure)?;
    for option in ctx.extra_axis_options.clone() {
        env.add_option(option);
    }

    let outer_env = ctx.current_axes.replace(env);
    let outer_scope = ctx.scope.replace(AxesScope::new(axes));
    debug!(id = axes.id.0, children = axes.children.len(), "compiling axes");
    let children = compile_children(ctx, &axes.children, figure);
    let env = std::mem::replace(&mut ctx.current_axes, outer_env);
    ctx.scope = outer_scope;
    let children = children?;

    let Some(mut env) = env else {
        return Ok(children);
    };
    let begin = env.begin_code();
    let end = env.end_code(ctx);
    if ctx.add_axis_environment {
        let mut fragments = Vec::with_capacity(children.len() + 2);
        fragments.push(begin);
        fragments.extend(children);
        fragments.push(end);
        Ok(fragments)
    } else {
        if ctx.show_info {
            info!(options = %env.options.join(",\n"), "axis environment options");
        }
        Ok(children)
    }
}
