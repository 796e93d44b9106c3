//! Text labels and annotations.

use std::str::FromStr;

use glam::DVec2;

use super::color::ColorSpec;
use super::line::LineStyle;

/// Coordinate system of a text position
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Coords {
    #[default]
    Data,
    /// `(0, 0)` is the lower-left corner of the axes, `(1, 1)` the upper right
    AxesFraction,
    /// Fractions of the whole figure
    FigureFraction,
    /// Offset in points from the annotated point
    OffsetPoints,
    /// Anything else the host supports; kept for diagnostics
    Other(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Baseline,
    CenterBaseline,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Numeric font weight (400 normal, 700 bold)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);

    pub fn is_bold(&self) -> bool {
        self.0 > 550
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl FromStr for FontWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<u16>() {
            return Ok(FontWeight(n));
        }
        Ok(FontWeight(match s {
            "ultralight" => 100,
            "light" => 200,
            "normal" | "regular" | "book" => 400,
            "medium" | "roman" => 500,
            "semibold" | "demibold" | "demi" => 600,
            "bold" => 700,
            "heavy" | "extra bold" => 800,
            "black" => 900,
            other => return Err(other.to_string()),
        }))
    }
}

/// Frame shape around a text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BoxStyle {
    #[default]
    Square,
    Round,
    Round4,
    RArrow,
    LArrow,
    DArrow,
    Circle,
    Roundtooth,
    Sawtooth,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextBox {
    pub style: BoxStyle,
    /// Padding in multiples of the font size
    pub pad: f64,
    pub facecolor: ColorSpec,
    pub edgecolor: ColorSpec,
    pub fill: bool,
    pub linewidth: f64,
    pub linestyle: LineStyle,
}

impl Default for TextBox {
    fn default() -> Self {
        Self {
            style: BoxStyle::Square,
            pad: 0.3,
            facecolor: ColorSpec::named("white"),
            edgecolor: ColorSpec::named("black"),
            fill: true,
            linewidth: 1.0,
            linestyle: LineStyle::Solid,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub text: String,
    pub position: DVec2,
    pub coords: Coords,
    pub zorder: f64,
    pub visible: bool,
    /// Font size in points
    pub size: f64,
    pub color: ColorSpec,
    /// Degrees
    pub rotation: f64,
    pub ha: HAlign,
    pub va: VAlign,
    pub style: FontStyle,
    pub weight: FontWeight,
    pub bbox: Option<TextBox>,
}

impl Text {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            position: DVec2::new(x, y),
            coords: Coords::Data,
            zorder: 3.0,
            visible: true,
            size: 10.0,
            color: ColorSpec::named("black"),
            rotation: 0.0,
            ha: HAlign::Left,
            va: VAlign::Baseline,
            style: FontStyle::Normal,
            weight: FontWeight::NORMAL,
            bbox: None,
        }
    }

    pub fn with_coords(mut self, coords: Coords) -> Self {
        self.coords = coords;
        self
    }

    pub fn with_alignment(mut self, ha: HAlign, va: VAlign) -> Self {
        self.ha = ha;
        self.va = va;
        self
    }
}

/// Arrow drawn from the text to the annotated point
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowProps {
    pub arrowstyle: String,
    pub color: ColorSpec,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    /// Label text; its position is the text position (`xytext`)
    pub text: Text,
    /// Annotated point
    pub xy: DVec2,
    pub xycoords: Coords,
    pub arrow: Option<ArrowProps>,
}

impl Annotation {
    pub fn new(text: impl Into<String>, xy: DVec2, xytext: DVec2) -> Self {
        Self {
            text: Text::new(text, xytext.x, xytext.y),
            xy,
            xycoords: Coords::Data,
            arrow: None,
        }
    }

    pub fn with_arrow(mut self, arrowstyle: impl Into<String>, color: impl Into<ColorSpec>) -> Self {
        self.arrow = Some(ArrowProps {
            arrowstyle: arrowstyle.into(),
            color: color.into(),
        });
        self
    }
}
