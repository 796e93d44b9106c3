//! Images and quad meshes, written as PNG sidecars behind `\addplot graphics`.

use std::io::Cursor;

use glam::DVec2;
use image::{ImageFormat, RgbaImage};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::errors::{Error, RenderError, Result};
use crate::figure::{AxesImage, ImageData, Origin, QuadMesh, Scale, ScalarMapping};
use crate::log::debug;

use super::context::CompileState;
use super::defaults::IMAGE_KIND;
use super::files::{Sidecar, new_sidecar, write_sidecar};

fn graphics(ctx: &CompileState, rel: &str, [xmin, xmax, ymin, ymax]: [f64; 4]) -> String {
    format!(
        "\\addplot graphics [includegraphics cmd=\\pgfimage,xmin={}, xmax={}, ymin={}, ymax={}] {{{}}};\n",
        ctx.ff(xmin),
        ctx.ff(xmax),
        ctx.ff(ymin),
        ctx.ff(ymax),
        rel
    )
}

fn check_len(len: usize, expected: usize) -> Result<()> {
    if len != expected {
        return Err(RenderError::ImageShape { len, expected }.into());
    }
    Ok(())
}

fn unit_to_u8(v: f64) -> u8 {
    // saturating float-to-int cast truncates, as an 8-bit conversion does
    (v * 255.0) as u8
}

fn save_png(sidecar: &Sidecar, image: &RgbaImage) -> Result<()> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|source| Error::Png {
            path: sidecar.path.clone(),
            source,
        })?;
    write_sidecar(sidecar, &bytes)
}

/// RGBA pixels of an image, top row first.
fn image_pixels(image: &AxesImage) -> Result<(u32, u32, Vec<u8>)> {
    let (rows, cols, mut pixels): (usize, usize, Vec<[u8; 4]>) = match &image.data {
        ImageData::Scalar(grid) => {
            check_len(grid.data.len(), grid.expected_len())?;
            let pixels = grid
                .data
                .iter()
                .map(|v| scalar_color(&image.mapping, *v))
                .collect();
            (grid.rows, grid.cols, pixels)
        }
        ImageData::Rgb(grid) => {
            check_len(grid.data.len(), grid.expected_len())?;
            let pixels = grid
                .data
                .iter()
                .map(|[r, g, b]| [unit_to_u8(*r), unit_to_u8(*g), unit_to_u8(*b), 255])
                .collect();
            (grid.rows, grid.cols, pixels)
        }
        ImageData::Rgba(grid) => {
            check_len(grid.data.len(), grid.expected_len())?;
            let pixels = grid.data.iter().map(|px| px.map(unit_to_u8)).collect();
            (grid.rows, grid.cols, pixels)
        }
        ImageData::Rgba8(grid) => {
            check_len(grid.data.len(), grid.expected_len())?;
            (grid.rows, grid.cols, grid.data.clone())
        }
    };

    if image.origin == Origin::Lower {
        let flipped: Vec<[u8; 4]> = pixels.chunks(cols.max(1)).rev().flatten().copied().collect();
        pixels = flipped;
    }

    let too_large = || RenderError::RasterSize {
        width: u32::try_from(cols).unwrap_or(u32::MAX),
        height: u32::try_from(rows).unwrap_or(u32::MAX),
    };
    let width = u32::try_from(cols).map_err(|_| too_large())?;
    let height = u32::try_from(rows).map_err(|_| too_large())?;
    Ok((width, height, pixels.into_iter().flatten().collect()))
}

fn scalar_color(mapping: &ScalarMapping, value: f64) -> [u8; 4] {
    mapping.cmap.eval(mapping.normalize(value)).to_rgba8()
}

pub fn draw_image(ctx: &mut CompileState, image: &AxesImage) -> Result<String> {
    let (width, height, raw) = image_pixels(image)?;
    let buffer = RgbaImage::from_raw(width, height, raw)
        .ok_or(RenderError::RasterSize { width, height })?;

    let sidecar = new_sidecar(ctx, IMAGE_KIND, "png")?;
    save_png(&sidecar, &buffer)?;
    debug!(path = %sidecar.path.display(), width, height, "image written");

    let rel = ctx.reference_path(&sidecar.rel);
    Ok(graphics(ctx, &rel, image.extent))
}

/// Position along an axis after its scale is applied.
fn scaled(value: f64, scale: Scale) -> f64 {
    match scale {
        Scale::Linear => value,
        Scale::Log { .. } => value.log10(),
    }
}

/// Rasterize a mesh at the configured dpi into the pixels of its axes box.
pub fn draw_quadmesh(ctx: &mut CompileState, mesh: &QuadMesh) -> Result<String> {
    let Some(scope) = ctx.scope.clone() else {
        debug!("quad mesh outside of an axes skipped");
        return Ok(String::new());
    };
    check_len(mesh.values.data.len(), mesh.values.expected_len())?;
    check_len(mesh.coordinates.data.len(), mesh.coordinates.expected_len())?;

    let size = DVec2::new(
        scope.position.width() * ctx.figure_size_inches.x,
        scope.position.height() * ctx.figure_size_inches.y,
    ) * ctx.dpi;
    let width = size.x.round().max(0.0) as u32;
    let height = size.y.round().max(0.0) as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::RasterSize { width, height })?;

    let (x0, x1) = (scaled(scope.xlim.0, scope.xscale), scaled(scope.xlim.1, scope.xscale));
    let (y0, y1) = (scaled(scope.ylim.0, scope.yscale), scaled(scope.ylim.1, scope.yscale));
    let to_pixel = |p: DVec2| {
        let x = (scaled(p.x, scope.xscale) - x0) / (x1 - x0) * width as f64;
        let y = (y1 - scaled(p.y, scope.yscale)) / (y1 - y0) * height as f64;
        (x as f32, y as f32)
    };

    for row in 0..mesh.values.rows {
        for col in 0..mesh.values.cols {
            let Some(value) = mesh.values.get(row, col) else {
                continue;
            };
            if value.is_nan() {
                continue;
            }
            let corners = [
                mesh.coordinates.get(row, col),
                mesh.coordinates.get(row, col + 1),
                mesh.coordinates.get(row + 1, col + 1),
                mesh.coordinates.get(row + 1, col),
            ];
            let [Some(a), Some(b), Some(c), Some(d)] = corners else {
                continue;
            };
            let mut pb = PathBuilder::new();
            let (x, y) = to_pixel(a);
            pb.move_to(x, y);
            for corner in [b, c, d] {
                let (x, y) = to_pixel(corner);
                pb.line_to(x, y);
            }
            pb.close();
            let Some(quad) = pb.finish() else {
                continue;
            };

            let mut rgba = mesh.mapping.cmap.eval(mesh.mapping.normalize(value));
            if let Some(alpha) = mesh.alpha {
                rgba = rgba.with_alpha(alpha);
            }
            let mut paint = Paint::default();
            paint.set_color_rgba8(
                unit_to_u8(rgba.r),
                unit_to_u8(rgba.g),
                unit_to_u8(rgba.b),
                unit_to_u8(rgba.a),
            );
            // neighbouring cells must not leave hairline seams
            paint.anti_alias = false;
            pixmap.fill_path(&quad, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    let raw: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    let buffer = RgbaImage::from_raw(width, height, raw)
        .ok_or(RenderError::RasterSize { width, height })?;

    let sidecar = new_sidecar(ctx, IMAGE_KIND, "png")?;
    save_png(&sidecar, &buffer)?;
    debug!(path = %sidecar.path.display(), width, height, "quad mesh rasterized");

    let rel = ctx.reference_path(&sidecar.rel);
    Ok(graphics(
        ctx,
        &rel,
        [scope.xlim.0, scope.xlim.1, scope.ylim.0, scope.ylim.1],
    ))
}
