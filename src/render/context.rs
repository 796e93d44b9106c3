//! Compile state - everything shared while walking one figure

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;

use camino::Utf8PathBuf;
use glam::DVec2;

use crate::errors::{ConfigError, Error};
use crate::figure::{Axes, AxesId, Container, ContainerKind, Figure, Legend, Scale};
use crate::log::debug;
use crate::options::{Flavor, Options};
use crate::types::{Bbox, FloatFormat};

use super::axes::AxisEnv;

/// Color registered through `\definecolor`
#[derive(Clone, Debug, PartialEq)]
pub struct CustomColor {
    pub name: String,
    pub rgb: [f64; 3],
}

/// Snapshot of the host axes currently being compiled
#[derive(Clone, Debug)]
pub struct AxesScope {
    pub id: AxesId,
    /// Placement in figure fractions
    pub position: Bbox,
    pub title: String,
    pub xlim: (f64, f64),
    pub ylim: (f64, f64),
    pub xscale: Scale,
    pub yscale: Scale,
    pub x_dates: bool,
    pub legend: Option<Legend>,
    pub containers: Vec<Container>,
}

impl AxesScope {
    pub fn new(axes: &Axes) -> Self {
        let legend = axes.children.iter().find_map(|c| match c {
            crate::figure::Artist::Legend(l) if l.visible => Some(l.clone()),
            _ => None,
        });
        Self {
            id: axes.id,
            position: axes.position,
            title: axes.title.clone(),
            xlim: axes.xaxis.limits,
            ylim: axes.yaxis.limits,
            xscale: axes.xaxis.scale,
            yscale: axes.yaxis.scale,
            x_dates: axes.xaxis.dates,
            legend,
            containers: axes.containers.clone(),
        }
    }

    pub fn has_legend(&self) -> bool {
        self.legend.is_some()
    }

    /// Legend text shown for an artist label.
    /// Labels starting with `_` never show up in a legend.
    pub fn legend_text(&self, label: &str) -> Option<&str> {
        if label.is_empty() || label.starts_with('_') {
            return None;
        }
        self.legend.as_ref()?.text_for(label)
    }

    /// Label of the bar container holding child `index`, if exactly one does.
    pub fn container_label(&self, index: usize) -> Option<&str> {
        let mut labels = self.containers.iter().filter(|c| {
            c.kind == ContainerKind::Bar && !c.label.starts_with('_') && c.members.contains(&index)
        });
        match (labels.next(), labels.next()) {
            (Some(c), None) => Some(c.label.as_str()),
            _ => None,
        }
    }
}

/// State carried through one compilation
pub struct CompileState {
    pub flavor: Flavor,
    pub float_format: FloatFormat,
    pub table_row_sep: String,
    pub strict: bool,
    /// Document font size in pt
    pub font_size: f64,
    pub axis_width: Option<String>,
    pub axis_height: Option<String>,
    /// Where sidecars are written; without an output file a scratch
    /// directory is made on first use
    pub output_dir: Option<PathBuf>,
    pub base_name: String,
    /// Prefix of sidecar references in the TeX code
    pub rel_data_path: Option<Utf8PathBuf>,
    pub externalize_tables: bool,
    pub override_externals: bool,
    pub externals_search_path: Option<String>,
    pub add_axis_environment: bool,
    pub show_info: bool,
    pub extra_axis_options: Vec<String>,
    pub extra_groupstyle_options: Vec<String>,
    pub tikz_libs: BTreeSet<String>,
    pub pgfplots_libs: BTreeSet<String>,
    /// Registered colors in insertion order
    pub custom_colors: Vec<CustomColor>,
    /// Bar labels that already got a legend image
    pub rectangle_legends: HashSet<String>,
    /// Last used sidecar index per file kind
    pub file_counters: HashMap<String, i64>,
    pub figure_size_inches: DVec2,
    /// Raster resolution for quad meshes
    pub dpi: f64,
    /// Axis environment being built
    pub current_axes: Option<AxisEnv>,
    pub scope: Option<AxesScope>,
    /// Index of the artist being compiled among its siblings
    pub child_index: usize,
    pub is_in_groupplot_env: bool,
}

impl CompileState {
    pub fn new(options: &Options, figure: &Figure) -> Result<Self, Error> {
        let flavor: Flavor = options.flavor.parse()?;
        let float_format: FloatFormat = options.float_format.parse()?;
        if !(options.textsize.is_finite() && options.textsize > 0.0) {
            return Err(ConfigError::InvalidTextSize {
                value: options.textsize,
            }
            .into());
        }

        let (output_dir, base_name) = match &options.filepath {
            Some(path) => {
                let dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("."));
                let base = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "figure".to_string());
                (Some(dir), base)
            }
            None => (None, "tmp".to_string()),
        };
        debug!(output_dir = ?output_dir, base_name = %base_name, "compile state");

        let mut extra_axis_options: Vec<String> = Vec::new();
        for opt in &options.extra_axis_parameters {
            if !extra_axis_options.contains(opt) {
                extra_axis_options.push(opt.clone());
            }
        }

        Ok(Self {
            flavor,
            float_format,
            table_row_sep: options.table_row_sep.clone(),
            strict: options.strict,
            font_size: options.textsize,
            axis_width: options.axis_width.clone(),
            axis_height: options.axis_height.clone(),
            output_dir,
            base_name,
            rel_data_path: options
                .tex_relative_path_to_data
                .as_ref()
                .map(Utf8PathBuf::from),
            externalize_tables: options.externalize_tables,
            override_externals: options.override_externals,
            externals_search_path: options.externals_search_path.clone(),
            add_axis_environment: options.add_axis_environment,
            show_info: options.show_info,
            extra_axis_options,
            extra_groupstyle_options: options.extra_groupstyle_parameters.clone(),
            tikz_libs: BTreeSet::new(),
            pgfplots_libs: BTreeSet::new(),
            custom_colors: Vec::new(),
            rectangle_legends: HashSet::new(),
            file_counters: HashMap::new(),
            figure_size_inches: figure.size_inches,
            dpi: options.dpi.unwrap_or(figure.dpi),
            current_axes: None,
            scope: None,
            child_index: 0,
            is_in_groupplot_env: false,
        })
    }

    /// Directory for sidecar files, creating the scratch directory if needed.
    pub fn sidecar_dir(&mut self) -> Result<PathBuf, Error> {
        if let Some(dir) = &self.output_dir {
            return Ok(dir.clone());
        }
        let dir = tempfile::Builder::new()
            .prefix("plot2tikz")
            .tempdir()
            .map_err(|e| Error::io(std::env::temp_dir(), e))?
            .keep();
        debug!(output_dir = %dir.display(), "created scratch directory");
        self.output_dir = Some(dir.clone());
        Ok(dir)
    }

    /// Format a number with the configured float format.
    pub fn ff(&self, value: f64) -> String {
        self.float_format.format(value)
    }

    pub fn add_tikz_lib(&mut self, lib: &str) {
        self.tikz_libs.insert(lib.to_string());
    }

    pub fn add_pgfplots_lib(&mut self, lib: &str) {
        self.pgfplots_libs.insert(lib.to_string());
    }

    /// Append an option to the enclosing axis environment, if there is one.
    pub fn add_axis_option(&mut self, option: impl Into<String>) {
        if let Some(env) = self.current_axes.as_mut() {
            env.add_option(option);
        }
    }

    pub fn has_axis_option(&self, option: &str) -> bool {
        self.current_axes
            .as_ref()
            .is_some_and(|env| env.options.iter().any(|o| o == option))
    }

    pub fn has_legend(&self) -> bool {
        self.scope.as_ref().is_some_and(AxesScope::has_legend)
    }

    pub fn legend_text(&self, label: &str) -> Option<String> {
        self.scope
            .as_ref()
            .and_then(|s| s.legend_text(label))
            .map(str::to_string)
    }

    pub fn x_is_date(&self) -> bool {
        self.scope.as_ref().is_some_and(|s| s.x_dates)
    }

    /// Sidecar reference as written in the TeX code.
    pub fn reference_path(&self, rel: &Utf8PathBuf) -> String {
        rel.as_str().replace('\\', "/")
    }

    /// Sorted library lists for the preamble.
    pub fn libraries(&self) -> (Vec<&str>, Vec<&str>) {
        (
            self.pgfplots_libs.iter().map(String::as_str).collect(),
            self.tikz_libs.iter().map(String::as_str).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{LegendEntry, Patch};

    #[test]
    fn state_from_filepath() {
        let opts = Options::new().with_filepath("out/dir/plot.tex");
        let ctx = CompileState::new(&opts, &Figure::default()).unwrap();
        assert_eq!(ctx.output_dir, Some(PathBuf::from("out/dir")));
        assert_eq!(ctx.base_name, "plot");
        assert_eq!(ctx.dpi, 100.0);
    }

    #[test]
    fn invalid_flavor_is_rejected_before_anything_else() {
        let opts = Options::new().with_flavor("plain");
        assert!(matches!(
            CompileState::new(&opts, &Figure::default()),
            Err(Error::Config(ConfigError::UnknownFlavor { .. }))
        ));
    }

    #[test]
    fn extra_axis_parameters_are_deduplicated() {
        let mut opts = Options::new().with_filepath("a.tex");
        opts.extra_axis_parameters = vec!["grid=both".into(), "grid=both".into()];
        let ctx = CompileState::new(&opts, &Figure::default()).unwrap();
        assert_eq!(ctx.extra_axis_options, vec!["grid=both".to_string()]);
    }

    #[test]
    fn scope_resolves_legend_and_containers() {
        let mut axes = Axes::new(AxesId(0));
        axes.push_container(
            ContainerKind::Bar,
            "apples",
            vec![Patch::bar(0.0, 0.0, 1.0, 1.0, "C0").into()],
        );
        axes.push(Legend::new(vec![LegendEntry {
            handle_label: "apples".into(),
            text: "Apples".into(),
            ha: crate::figure::HAlign::Left,
        }]));
        let scope = AxesScope::new(&axes);
        assert_eq!(scope.container_label(0), Some("apples"));
        assert_eq!(scope.container_label(1), None);
        assert_eq!(scope.legend_text("apples"), Some("Apples"));
    }
}
