//! Plain data lines and their stroke styles.

use std::str::FromStr;

use chrono::NaiveDateTime;

use super::color::ColorSpec;

/// Stroke pattern of a line or patch edge
#[derive(Clone, Debug, PartialEq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    DashDot,
    Dotted,
    /// Nothing is stroked
    None,
    /// Explicit on/off lengths in points, starting at `offset`
    Custom { offset: f64, pattern: Vec<f64> },
}

impl LineStyle {
    pub fn custom(offset: f64, pattern: impl Into<Vec<f64>>) -> Self {
        LineStyle::Custom {
            offset,
            pattern: pattern.into(),
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, LineStyle::None)
    }
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-" | "solid" => LineStyle::Solid,
            "--" | "dashed" => LineStyle::Dashed,
            "-." | "dashdot" => LineStyle::DashDot,
            ":" | "dotted" => LineStyle::Dotted,
            "" | " " | "None" | "none" => LineStyle::None,
            other => return Err(other.to_string()),
        })
    }
}

/// How consecutive points are connected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DrawStyle {
    #[default]
    Default,
    /// Same as [`DrawStyle::StepsPre`]
    Steps,
    StepsPre,
    StepsMid,
    StepsPost,
}

/// Subset of points that carry a marker
#[derive(Clone, Debug, PartialEq)]
pub enum MarkEvery {
    Every(usize),
    Indices(Vec<usize>),
}

/// X values of a line
#[derive(Clone, Debug, PartialEq)]
pub enum XData {
    Numeric(Vec<f64>),
    Dates(Vec<NaiveDateTime>),
    /// Category names; plotted at 0, 1, 2, ... in order of first appearance
    Categories(Vec<String>),
}

impl Default for XData {
    fn default() -> Self {
        XData::Numeric(Vec::new())
    }
}

impl XData {
    pub fn len(&self) -> usize {
        match self {
            XData::Numeric(v) => v.len(),
            XData::Dates(v) => v.len(),
            XData::Categories(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positions on the x axis as floats; dates become days since the epoch.
    pub fn as_floats(&self) -> Vec<f64> {
        match self {
            XData::Numeric(v) => v.clone(),
            XData::Dates(v) => v.iter().map(date2num).collect(),
            XData::Categories(v) => {
                let mut seen: Vec<&str> = Vec::new();
                v.iter()
                    .map(|c| match seen.iter().position(|s| *s == c.as_str()) {
                        Some(i) => i as f64,
                        None => {
                            seen.push(c);
                            (seen.len() - 1) as f64
                        }
                    })
                    .collect()
            }
        }
    }
}

/// Days since 1970-01-01T00:00, with fractional days.
pub fn date2num(date: &NaiveDateTime) -> f64 {
    let seconds = date.and_utc().timestamp() as f64
        + date.and_utc().timestamp_subsec_nanos() as f64 * 1e-9;
    seconds / 86_400.0
}

/// Inverse of [`date2num`], rounded to the second.
pub fn num2date(days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() {
        return None;
    }
    let seconds = (days * 86_400.0).round() as i64;
    chrono::DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line2D {
    pub label: String,
    pub zorder: f64,
    pub visible: bool,
    pub xdata: XData,
    pub ydata: Vec<f64>,
    /// Masked y entries (true = masked); treated as gaps
    pub ymask: Option<Vec<bool>>,
    /// Present on lines that live in 3-D axes
    pub zdata: Option<Vec<f64>>,
    pub color: ColorSpec,
    pub alpha: Option<f64>,
    pub linewidth: f64,
    pub linestyle: LineStyle,
    /// Explicit dash sequence set on the line, overriding the named style
    pub dashes: Option<(f64, Vec<f64>)>,
    pub drawstyle: DrawStyle,
    /// Marker code (`"o"`, `"s"`, ...); `"None"`, `"none"` or `""` for no marker
    pub marker: String,
    pub markersize: f64,
    /// `None` means "same as the line color"; `Some(ColorSpec::None)` is hollow
    pub markerfacecolor: Option<ColorSpec>,
    pub markeredgecolor: Option<ColorSpec>,
    pub markevery: Option<MarkEvery>,
}

impl Default for Line2D {
    fn default() -> Self {
        Self {
            label: "_nolegend_".into(),
            zorder: 2.0,
            visible: true,
            xdata: XData::default(),
            ydata: Vec::new(),
            ymask: None,
            zdata: None,
            color: ColorSpec::named("C0"),
            alpha: None,
            linewidth: 1.5,
            linestyle: LineStyle::Solid,
            dashes: None,
            drawstyle: DrawStyle::Default,
            marker: "None".into(),
            markersize: 6.0,
            markerfacecolor: None,
            markeredgecolor: None,
            markevery: None,
        }
    }
}

impl Line2D {
    pub fn new(x: impl Into<Vec<f64>>, y: impl Into<Vec<f64>>) -> Self {
        Self {
            xdata: XData::Numeric(x.into()),
            ydata: y.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_linestyle(mut self, style: LineStyle) -> Self {
        self.linestyle = style;
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_zorder(mut self, zorder: f64) -> Self {
        self.zorder = zorder;
        self
    }

    pub fn has_marker(&self) -> bool {
        !matches!(self.marker.as_str(), "" | " " | "None" | "none")
    }

    pub fn marker_face(&self) -> ColorSpec {
        self.markerfacecolor.clone().unwrap_or_else(|| self.color.clone())
    }

    pub fn marker_edge(&self) -> ColorSpec {
        self.markeredgecolor.clone().unwrap_or_else(|| self.color.clone())
    }

    /// y values with masked entries replaced by NaN.
    pub fn y_with_gaps(&self) -> Vec<f64> {
        match &self.ymask {
            Some(mask) => self
                .ydata
                .iter()
                .zip(mask.iter().chain(std::iter::repeat(&false)))
                .map(|(y, masked)| if *masked { f64::NAN } else { *y })
                .collect(),
            None => self.ydata.clone(),
        }
    }
}
