//! Compile plotting figures into PGFPlots/TikZ code for LaTeX documents.
//!
//! A [`Figure`] is a tree of axes, lines, patches, collections, images and
//! text. [`get_tikz_code`] walks it and returns the TeX source; raster images
//! and externalized tables are written next to the output as a side effect.
//! [`clean_figure`] optionally shrinks the figure's data beforehand.
//!
//! ```no_run
//! use plot2tikz::{Axes, AxesId, Figure, Line2D, Options};
//!
//! let axes = Axes::new(AxesId(0)).with_child(Line2D::new(vec![0.0, 1.0], vec![0.0, 1.0]));
//! let code = plot2tikz::get_tikz_code(&Figure::with_axes(axes), &Options::new())?;
//! # Ok::<(), plot2tikz::Error>(())
//! ```

pub mod clean;
pub mod errors;
pub mod figure;
pub mod log;
pub mod options;
pub mod render;
pub mod types;

pub use clean::{TargetResolution, clean_figure};
pub use errors::{ConfigError, Error, RenderError};
pub use figure::*;
pub use options::{Encoding, Flavor, Options};
pub use types::{Bbox, FloatFormat, Rgba};

/// Compile `figure` into PGFPlots code.
///
/// Sidecar files go next to `options.filepath`, or into a fresh temporary
/// directory when it is unset.
pub fn get_tikz_code(figure: &Figure, options: &Options) -> Result<String, Error> {
    render::compile(figure, options)
}

/// Compile `figure` and write the code to `path` in `options.encoding`.
///
/// `path` also becomes the anchor for sidecar files.
pub fn save(
    path: impl AsRef<std::path::Path>,
    figure: &Figure,
    options: &Options,
) -> Result<(), Error> {
    let path = path.as_ref();
    let encoding: Encoding = options.encoding.parse()?;
    let options = Options {
        filepath: Some(path.to_path_buf()),
        ..options.clone()
    };
    let code = get_tikz_code(figure, &options)?;
    let bytes = encoding.encode(&code)?;
    std::fs::write(path, bytes).map_err(|e| Error::io(path, e))?;
    log::debug!(path = %path.display(), "wrote figure");
    Ok(())
}
