//! Small value types shared by the figure model, the emitters and the cleaner.
//!
//! - [`Rgba`]: a normalized color after name resolution
//! - [`Bbox`]: an axis-aligned rectangle in any coordinate system
//! - [`FloatFormat`]: Python-style format specs (`.15g`, `.4f`, `.3e`) used
//!   for every number written to the output

use std::fmt;
use std::str::FromStr;

use glam::DVec2;

use crate::errors::ConfigError;

/// Color with channels in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Build from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels scaled to 0..=255 with round-half-away-from-zero.
    pub fn to_rgb255(&self) -> [u8; 3] {
        self.channels()
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let [r, g, b] = self.to_rgb255();
        [r, g, b, (self.a.clamp(0.0, 1.0) * 255.0).round() as u8]
    }

    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    pub fn is_invisible(&self) -> bool {
        self.a == 0.0
    }
}

/// Axis-aligned rectangle spanned by `(x0, y0)` and `(x1, y1)`
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Bbox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bbox {
    pub const UNIT: Bbox = Bbox::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x0.min(self.x1), self.y0.min(self.y1))
    }

    pub fn max(&self) -> DVec2 {
        DVec2::new(self.x0.max(self.x1), self.y0.max(self.y1))
    }

    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self::new(self.x0 * sx, self.y0 * sy, self.x1 * sx, self.y1 * sy)
    }
}

// ============================================================================
// Float formatting
// ============================================================================

/// Presentation type of a [`FloatFormat`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatKind {
    /// `g`: shortest of fixed or exponent notation, trailing zeros stripped
    General,
    /// `f`: fixed number of decimals
    Fixed,
    /// `e`: exponent notation with a fixed number of mantissa decimals
    Exponent,
}

/// A `.{precision}{kind}` number format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloatFormat {
    pub precision: usize,
    pub kind: FloatKind,
}

impl Default for FloatFormat {
    fn default() -> Self {
        Self {
            precision: 15,
            kind: FloatKind::General,
        }
    }
}

impl FromStr for FloatFormat {
    type Err = ConfigError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidFloatFormat {
            spec: spec.to_string(),
        };
        let trimmed = spec.trim();
        let (body, kind) = match trimmed.chars().last() {
            Some('g') | Some('G') => (&trimmed[..trimmed.len() - 1], FloatKind::General),
            Some('f') | Some('F') => (&trimmed[..trimmed.len() - 1], FloatKind::Fixed),
            Some('e') | Some('E') => (&trimmed[..trimmed.len() - 1], FloatKind::Exponent),
            _ => return Err(invalid()),
        };
        let precision = match body {
            "" => 6,
            _ => body
                .strip_prefix('.')
                .ok_or_else(invalid)?
                .parse::<usize>()
                .map_err(|_| invalid())?,
        };
        Ok(Self { precision, kind })
    }
}

impl fmt::Display for FloatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            FloatKind::General => 'g',
            FloatKind::Fixed => 'f',
            FloatKind::Exponent => 'e',
        };
        write!(f, ".{}{}", self.precision, kind)
    }
}

impl FloatFormat {
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "nan".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "inf" } else { "-inf" }.to_string();
        }
        match self.kind {
            FloatKind::Fixed => format!("{:.*}", self.precision, value),
            FloatKind::Exponent => {
                let raw = format!("{:.*e}", self.precision, value);
                let (mantissa, exp) = split_exponent(&raw);
                format!("{mantissa}e{}", exponent_suffix(exp))
            }
            FloatKind::General => format_general(value, self.precision.max(1)),
        }
    }
}

fn split_exponent(raw: &str) -> (&str, i32) {
    match raw.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

fn exponent_suffix(exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{sign}{:02}", exp.abs())
}

fn strip_trailing_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

fn format_general(value: f64, precision: usize) -> String {
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = split_exponent(&sci);
    if exp < -4 || exp >= precision as i32 {
        format!("{}e{}", strip_trailing_zeros(mantissa), exponent_suffix(exp))
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Print integral floats without a fractional part, everything else with `ff`.
pub fn try_f2i(value: f64, ff: &FloatFormat) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        ff.format(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g15(x: f64) -> String {
        FloatFormat::default().format(x)
    }

    #[test]
    fn general_format_matches_python_repr_for_common_values() {
        assert_eq!(g15(0.0), "0");
        assert_eq!(g15(1.0), "1");
        assert_eq!(g15(-2.5), "-2.5");
        assert_eq!(g15(0.1), "0.1");
        assert_eq!(g15(100.0), "100");
        assert_eq!(g15(1e-5), "1e-05");
        assert_eq!(g15(1.5e20), "1.5e+20");
        assert_eq!(g15(0.0001), "0.0001");
    }

    #[test]
    fn general_format_special_values() {
        assert_eq!(g15(f64::NAN), "nan");
        assert_eq!(g15(f64::INFINITY), "inf");
        assert_eq!(g15(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn short_precision_rounds() {
        let ff: FloatFormat = ".3g".parse().unwrap();
        assert_eq!(ff.format(3.14159), "3.14");
        assert_eq!(ff.format(12345.0), "1.23e+04");
    }

    #[test]
    fn fixed_and_exponent_kinds() {
        let fixed: FloatFormat = ".2f".parse().unwrap();
        assert_eq!(fixed.format(1.0), "1.00");
        let exp: FloatFormat = ".1e".parse().unwrap();
        assert_eq!(exp.format(1234.0), "1.2e+03");
        assert_eq!(exp.format(0.05), "5.0e-02");
    }

    #[test]
    fn bad_format_specs_are_config_errors() {
        assert!("15".parse::<FloatFormat>().is_err());
        assert!(".xg".parse::<FloatFormat>().is_err());
        assert!("".parse::<FloatFormat>().is_err());
        assert_eq!("g".parse::<FloatFormat>().unwrap().precision, 6);
    }

    #[test]
    fn format_spec_displays_back() {
        let ff: FloatFormat = ".4f".parse().unwrap();
        assert_eq!(ff.to_string(), ".4f");
    }

    #[test]
    fn integral_values_print_without_fraction() {
        let ff = FloatFormat::default();
        assert_eq!(try_f2i(10.0, &ff), "10");
        assert_eq!(try_f2i(2.5, &ff), "2.5");
    }

    #[test]
    fn rgb255_rounds_channels() {
        let c = Rgba::rgb(31.0 / 255.0, 119.0 / 255.0, 180.0 / 255.0);
        assert_eq!(c.to_rgb255(), [31, 119, 180]);
        assert_eq!(Rgba::rgb(0.5, 0.5, 0.5).to_rgb255(), [128, 128, 128]);
    }
}
