//! Error types with rich diagnostics using miette
//!
//! Configuration problems are reported before any output is produced.
//! Render errors abort the whole compilation; nothing partial is returned.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while validating [`crate::Options`] or cleaner arguments
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("unknown flavor: {name}")]
    #[diagnostic(
        code(plot2tikz::config::unknown_flavor),
        help("supported flavors are `latex` and `context`")
    )]
    UnknownFlavor { name: String },

    #[error("invalid float format: {spec}")]
    #[diagnostic(
        code(plot2tikz::config::float_format),
        help("use a format such as `.15g`, `.4f` or `.3e`")
    )]
    InvalidFloatFormat { spec: String },

    #[error("unsupported encoding: {name}")]
    #[diagnostic(
        code(plot2tikz::config::encoding),
        help("supported encodings are `utf-8` and `latin-1`")
    )]
    UnsupportedEncoding { name: String },

    #[error("target resolution must be positive and finite, got {value}")]
    #[diagnostic(code(plot2tikz::config::target_resolution))]
    InvalidTargetResolution { value: String },

    #[error("invalid textsize: {value}")]
    #[diagnostic(code(plot2tikz::config::textsize))]
    InvalidTextSize { value: f64 },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while lowering artists to PGFPlots code
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("unknown color: {spec}")]
    #[diagnostic(code(plot2tikz::render::unknown_color))]
    UnknownColor { spec: String },

    #[error("quadratic Bezier segment without a preceding point")]
    #[diagnostic(
        code(plot2tikz::render::dangling_curve),
        help("a CURVE3 segment needs a MOVETO or another segment before it")
    )]
    DanglingCurve,

    #[error("unknown arrow style: {style}")]
    #[diagnostic(code(plot2tikz::render::arrow_style))]
    UnknownArrowStyle { style: String },

    #[error("image data has {len} samples, expected {expected}")]
    #[diagnostic(code(plot2tikz::render::image_shape))]
    ImageShape { len: usize, expected: usize },

    #[error("cannot rasterize a {width}x{height} canvas")]
    #[diagnostic(code(plot2tikz::render::raster_size))]
    RasterSize { width: u32, height: u32 },

    #[error("colormap `{name}` has no colors")]
    #[diagnostic(code(plot2tikz::render::empty_colormap))]
    EmptyColormap { name: String },

    #[error("output path is not valid UTF-8: {}", path.display())]
    #[diagnostic(code(plot2tikz::render::non_utf8_path))]
    NonUtf8Path { path: PathBuf },
}

// ============================================================================
// Top-level Error
// ============================================================================

/// Any failure surfaced by the public entry points
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),

    #[error("failed to write {}", path.display())]
    #[diagnostic(code(plot2tikz::io::write))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode PNG {}", path.display())]
    #[diagnostic(code(plot2tikz::io::png))]
    Png {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot represent character {ch:?} in latin-1")]
    #[diagnostic(code(plot2tikz::io::encoding))]
    Unencodable { ch: char },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_keep_their_code() {
        let err: Error = ConfigError::UnknownFlavor {
            name: "plain".into(),
        }
        .into();
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("plot2tikz::config::unknown_flavor"));
        assert_eq!(err.to_string(), "unknown flavor: plain");
    }

    #[test]
    fn io_error_names_the_path() {
        let err = Error::io(
            "/tmp/out.tex",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to write /tmp/out.tex");
    }
}
