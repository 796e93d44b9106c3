//! Compiler configuration.
//!
//! Everything here is plain data; values that need parsing (`flavor`,
//! `float_format`, `encoding`) are validated when compilation starts, before
//! any output is produced.

use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{ConfigError, Error};

/// Options accepted by [`crate::get_tikz_code`] and [`crate::save`]
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Destination of the TeX code; sidecar files land next to it
    pub filepath: Option<PathBuf>,
    /// `width=` of every axis environment, e.g. `"\\figwidth"` or `"8cm"`
    pub axis_width: Option<String>,
    pub axis_height: Option<String>,
    /// Font size (pt) of the target document; text is scaled relative to it
    pub textsize: f64,
    /// Directory prefix written in front of sidecar references
    pub tex_relative_path_to_data: Option<String>,
    /// Write line tables to `.tsv` sidecars instead of inlining them
    pub externalize_tables: bool,
    /// Reuse sidecar names even if the files already exist
    pub override_externals: bool,
    /// Directory added to PGFPlots' table search path
    pub externals_search_path: Option<String>,
    /// Emit every tick position and label instead of trusting PGFPlots
    pub strict: bool,
    /// Wrap the body in a `tikzpicture` environment
    pub wrap: bool,
    /// Emit `axis` / `groupplot` environments around axes content
    pub add_axis_environment: bool,
    pub extra_axis_parameters: Vec<String>,
    pub extra_groupstyle_parameters: Vec<String>,
    pub extra_tikzpicture_parameters: Vec<String>,
    /// Raw lines inserted right after `\begin{tikzpicture}`
    pub extra_lines_start: Vec<String>,
    /// Raster resolution for quad meshes; defaults to the figure dpi
    pub dpi: Option<f64>,
    /// Log the generated axis options at info level
    pub show_info: bool,
    pub include_disclaimer: bool,
    /// Produce a compilable document instead of a snippet
    pub standalone: bool,
    /// Python-style number format, e.g. `.15g`
    pub float_format: String,
    /// Row separator of inline tables
    pub table_row_sep: String,
    /// `latex` or `context`
    pub flavor: String,
    /// Escape bare `%` so the output survives being pasted into TeX
    pub escape_pct_latex: bool,
    /// Encoding used by [`crate::save`]: `utf-8` or `latin-1`
    pub encoding: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            filepath: None,
            axis_width: None,
            axis_height: None,
            textsize: 10.0,
            tex_relative_path_to_data: None,
            externalize_tables: false,
            override_externals: false,
            externals_search_path: None,
            strict: false,
            wrap: true,
            add_axis_environment: true,
            extra_axis_parameters: Vec::new(),
            extra_groupstyle_parameters: Vec::new(),
            extra_tikzpicture_parameters: Vec::new(),
            extra_lines_start: Vec::new(),
            dpi: None,
            show_info: false,
            include_disclaimer: true,
            standalone: false,
            float_format: ".15g".into(),
            table_row_sep: "\n".into(),
            flavor: "latex".into(),
            escape_pct_latex: false,
            encoding: "utf-8".into(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filepath(mut self, path: impl Into<PathBuf>) -> Self {
        self.filepath = Some(path.into());
        self
    }

    pub fn with_axis_size(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.axis_width = Some(width.into());
        self.axis_height = Some(height.into());
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = flavor.into();
        self
    }

    pub fn with_float_format(mut self, spec: impl Into<String>) -> Self {
        self.float_format = spec.into();
        self
    }

    pub fn with_externalized_tables(mut self, externalize: bool) -> Self {
        self.externalize_tables = externalize;
        self
    }

    pub fn with_disclaimer(mut self, include: bool) -> Self {
        self.include_disclaimer = include;
        self
    }
}

/// TeX dialect of the generated code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Flavor {
    #[default]
    Latex,
    Context,
}

impl FromStr for Flavor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latex" => Ok(Flavor::Latex),
            "context" => Ok(Flavor::Context),
            _ => Err(ConfigError::UnknownFlavor { name: s.to_string() }),
        }
    }
}

impl Flavor {
    pub fn start(&self, env: &str) -> String {
        match self {
            Flavor::Latex => format!("\\begin{{{env}}}"),
            Flavor::Context => format!("\\start{env}"),
        }
    }

    pub fn end(&self, env: &str) -> String {
        match self {
            Flavor::Latex => format!("\\end{{{env}}}"),
            Flavor::Context => format!("\\stop{env}"),
        }
    }

    /// Library loading lines; empty sets produce no line.
    pub fn use_libraries(&self, pgfplots_libs: &[&str], tikz_libs: &[&str]) -> String {
        let mut lines = Vec::new();
        match self {
            Flavor::Latex => {
                if !pgfplots_libs.is_empty() {
                    lines.push(format!("\\usepgfplotslibrary{{{}}}", pgfplots_libs.join(",")));
                }
                if !tikz_libs.is_empty() {
                    lines.push(format!("\\usetikzlibrary{{{}}}", tikz_libs.join(",")));
                }
            }
            Flavor::Context => {
                if !pgfplots_libs.is_empty() {
                    lines.push(format!("\\usepgfplotslibrary[{}]", pgfplots_libs.join(",")));
                }
                if !tikz_libs.is_empty() {
                    lines.push(format!("\\usetikzlibrary[{}]", tikz_libs.join(",")));
                }
            }
        }
        lines.join("\n")
    }

    pub fn preamble(&self, pgfplots_libs: &[&str], tikz_libs: &[&str]) -> String {
        let libs = self.use_libraries(pgfplots_libs, tikz_libs);
        let libs = if libs.is_empty() { String::new() } else { format!("{libs}\n") };
        match self {
            Flavor::Latex => format!(
                "\\documentclass{{standalone}}\n\\usepackage[utf8]{{inputenc}}\n\\usepackage{{pgfplots}}\n{libs}\\pgfplotsset{{compat=newest}}\n"
            ),
            Flavor::Context => format!(
                "\\setupcolors[state=start]\n\\usemodule[tikz]\n\\usemodule[pgfplots]\n{libs}\\pgfplotsset{{compat=newest}}\n"
            ),
        }
    }

    /// Wrap finished TikZ code into a compilable document.
    pub fn standalone(&self, code: &str, pgfplots_libs: &[&str], tikz_libs: &[&str]) -> String {
        let doc = match self {
            Flavor::Latex => "document",
            Flavor::Context => "TEXpage",
        };
        format!(
            "{}{}\n{}\n{}\n",
            self.preamble(pgfplots_libs, tikz_libs),
            self.start(doc),
            code,
            self.end(doc)
        )
    }
}

/// Output text encoding of [`crate::save`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Latin1,
}

impl FromStr for Encoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            _ => Err(ConfigError::UnsupportedEncoding { name: s.to_string() }),
        }
    }
}

impl Encoding {
    /// Encode `text` for writing; latin-1 rejects characters above U+00FF.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, Error> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Latin1 => text
                .chars()
                .map(|ch| u8::try_from(u32::from(ch)).map_err(|_| Error::Unencodable { ch }))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flavor_parsing_is_case_insensitive() {
        assert_eq!("LaTeX".parse::<Flavor>().unwrap(), Flavor::Latex);
        assert_eq!("context".parse::<Flavor>().unwrap(), Flavor::Context);
        assert!(matches!(
            "plain".parse::<Flavor>(),
            Err(ConfigError::UnknownFlavor { .. })
        ));
    }

    #[test]
    fn environments_per_flavor() {
        assert_eq!(Flavor::Latex.start("axis"), "\\begin{axis}");
        assert_eq!(Flavor::Context.end("axis"), "\\stopaxis");
    }

    #[test]
    fn latex_preamble_lists_libraries() {
        let pre = Flavor::Latex.preamble(&["groupplots"], &["patterns"]);
        assert!(pre.contains("\\usepgfplotslibrary{groupplots}\n"));
        assert!(pre.contains("\\usetikzlibrary{patterns}\n"));
        assert!(pre.ends_with("\\pgfplotsset{compat=newest}\n"));
    }

    #[test]
    fn context_uses_brackets_and_texpage() {
        let doc = Flavor::Context.standalone("X", &[], &["patterns"]);
        assert!(doc.contains("\\usetikzlibrary[patterns]"));
        assert!(doc.contains("\\startTEXpage\nX\n\\stopTEXpage"));
    }

    #[test]
    fn encodings() {
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("latin_1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert!("ascii".parse::<Encoding>().is_err());
    }

    #[test]
    fn latin1_encoding() {
        assert_eq!(Encoding::Latin1.encode("é%").unwrap(), vec![0xE9, b'%']);
        assert!(matches!(
            Encoding::Latin1.encode("\u{2212}"),
            Err(Error::Unencodable { ch: '\u{2212}' })
        ));
        assert_eq!(Encoding::Utf8.encode("é").unwrap(), "é".as_bytes());
    }
}
