//! Color specifications as they appear on artists.
//!
//! A [`ColorSpec`] is resolved to an [`Rgba`] once, at compile time. Named
//! colors cover the single-letter base colors, the `C0`..`C9` property-cycle
//! colors, the `tab:` palette and the CSS4 names in [`WEB_COLORS`].

use crate::errors::RenderError;
use crate::types::Rgba;

/// Color as given by the plotting host
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ColorSpec {
    /// Fully transparent; the artist draws nothing with this color
    #[default]
    None,
    Rgb([f64; 3]),
    Rgba([f64; 4]),
    /// Gray level in `[0, 1]`
    Gray(f64),
    /// `#rrggbb` or `#rrggbbaa`
    Hex(String),
    Named(String),
}

impl ColorSpec {
    pub fn named(name: impl Into<String>) -> Self {
        ColorSpec::Named(name.into())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ColorSpec::None)
            || matches!(self, ColorSpec::Named(n) if n.eq_ignore_ascii_case("none"))
    }

    pub fn to_rgba(&self) -> Result<Rgba, RenderError> {
        let unknown = || RenderError::UnknownColor {
            spec: format!("{self:?}"),
        };
        match self {
            ColorSpec::None => Ok(Rgba::TRANSPARENT),
            ColorSpec::Rgb([r, g, b]) => Ok(Rgba::rgb(*r, *g, *b)),
            ColorSpec::Rgba([r, g, b, a]) => Ok(Rgba::new(*r, *g, *b, *a)),
            ColorSpec::Gray(level) => Ok(Rgba::rgb(*level, *level, *level)),
            ColorSpec::Hex(hex) => parse_hex(hex).ok_or_else(unknown),
            ColorSpec::Named(name) => lookup_name(name).ok_or_else(unknown),
        }
    }

    /// Resolve and override the alpha channel when one is given.
    pub fn to_rgba_with_alpha(&self, alpha: Option<f64>) -> Result<Rgba, RenderError> {
        let rgba = self.to_rgba()?;
        Ok(match alpha {
            Some(a) if !self.is_none() => rgba.with_alpha(a),
            _ => rgba,
        })
    }
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.starts_with('#') {
            ColorSpec::Hex(trimmed.to_string())
        } else if trimmed.eq_ignore_ascii_case("none") {
            ColorSpec::None
        } else if let Ok(level) = trimmed.parse::<f64>() {
            ColorSpec::Gray(level)
        } else {
            ColorSpec::Named(trimmed.to_string())
        }
    }
}

impl From<[f64; 3]> for ColorSpec {
    fn from(c: [f64; 3]) -> Self {
        ColorSpec::Rgb(c)
    }
}

impl From<[f64; 4]> for ColorSpec {
    fn from(c: [f64; 4]) -> Self {
        ColorSpec::Rgba(c)
    }
}

impl From<Rgba> for ColorSpec {
    fn from(c: Rgba) -> Self {
        ColorSpec::Rgba([c.r, c.g, c.b, c.a])
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let digits = hex.strip_prefix('#')?;
    let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    match digits.len() {
        6 => Some(Rgba::from_rgb8(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::from_rgb8(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)? as f64 / 255.0)),
        3 => {
            let nibble = |i: usize| {
                let v = u8::from_str_radix(digits.get(i..i + 1)?, 16).ok()?;
                Some(v * 17)
            };
            Some(Rgba::from_rgb8(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => None,
    }
}

fn lookup_name(name: &str) -> Option<Rgba> {
    let lower = name.trim().to_ascii_lowercase();
    if lower == "none" {
        return Some(Rgba::TRANSPARENT);
    }
    if let Some(rgba) = base_color(&lower) {
        return Some(rgba);
    }
    if let Some(index) = lower.strip_prefix('c').and_then(|d| d.parse::<usize>().ok()) {
        let name = TAB10[index % TAB10.len()];
        return tableau(name);
    }
    if let Some(tab) = lower.strip_prefix("tab:") {
        return tableau(tab);
    }
    let canonical = match lower.as_str() {
        "aqua" => "cyan".to_string(),
        "fuchsia" => "magenta".to_string(),
        other => other.replace("grey", "gray"),
    };
    WEB_COLORS
        .iter()
        .find(|(n, _)| *n == canonical)
        .map(|(_, [r, g, b])| Rgba::from_rgb8(*r, *g, *b))
}

fn base_color(name: &str) -> Option<Rgba> {
    Some(match name {
        "b" => Rgba::rgb(0.0, 0.0, 1.0),
        "g" => Rgba::rgb(0.0, 0.5, 0.0),
        "r" => Rgba::rgb(1.0, 0.0, 0.0),
        "c" => Rgba::rgb(0.0, 0.75, 0.75),
        "m" => Rgba::rgb(0.75, 0.0, 0.75),
        "y" => Rgba::rgb(0.75, 0.75, 0.0),
        "k" => Rgba::rgb(0.0, 0.0, 0.0),
        "w" => Rgba::rgb(1.0, 1.0, 1.0),
        _ => return None,
    })
}

/// Names of the default property cycle, indexed by `C0`..`C9`.
const TAB10: [&str; 10] = [
    "blue", "orange", "green", "red", "purple", "brown", "pink", "gray", "olive", "cyan",
];

fn tableau(name: &str) -> Option<Rgba> {
    let [r, g, b] = match name {
        "blue" => [0x1f, 0x77, 0xb4],
        "orange" => [0xff, 0x7f, 0x0e],
        "green" => [0x2c, 0xa0, 0x2c],
        "red" => [0xd6, 0x27, 0x28],
        "purple" => [0x94, 0x67, 0xbd],
        "brown" => [0x8c, 0x56, 0x4b],
        "pink" => [0xe3, 0x77, 0xc2],
        "gray" | "grey" => [0x7f, 0x7f, 0x7f],
        "olive" => [0xbc, 0xbd, 0x22],
        "cyan" => [0x17, 0xbe, 0xcf],
        _ => return None,
    };
    Some(Rgba::from_rgb8(r, g, b))
}

/// CSS4 color names without aliases, in alphabetical order.
///
/// The order matters: nearest-name searches keep the first best match.
#[rustfmt::skip]
pub const WEB_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]), ("antiquewhite", [250, 235, 215]),
    ("aquamarine", [127, 255, 212]), ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]), ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]), ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]), ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]), ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]), ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]), ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]), ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]), ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]), ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]), ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]), ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]), ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]), ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]), ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]), ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]), ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]), ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]), ("dimgray", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]), ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]), ("forestgreen", [34, 139, 34]),
    ("gainsboro", [220, 220, 220]), ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]), ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]), ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]), ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]), ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]), ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]), ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]), ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]), ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]), ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]), ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]), ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]), ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]), ("lightslategray", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]), ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]), ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]), ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]), ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]), ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]), ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]), ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]), ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]), ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]), ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]), ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]), ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]), ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]), ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]), ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]), ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]), ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]), ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]), ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]), ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]), ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]), ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]), ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]), ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]), ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]), ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]), ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]), ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]), ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]), ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]), ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]), ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]), ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_colors_resolve_to_tableau() {
        let c0 = ColorSpec::named("C0").to_rgba().unwrap();
        assert_eq!(c0.to_rgb255(), [31, 119, 180]);
        let c11 = ColorSpec::named("C11").to_rgba().unwrap();
        assert_eq!(c11.to_rgb255(), [255, 127, 14]);
    }

    #[test]
    fn string_conversion_picks_the_right_variant() {
        assert_eq!(ColorSpec::from("0.8"), ColorSpec::Gray(0.8));
        assert_eq!(ColorSpec::from("#ff0000"), ColorSpec::Hex("#ff0000".into()));
        assert_eq!(ColorSpec::from("None"), ColorSpec::None);
        assert_eq!(ColorSpec::from("k"), ColorSpec::Named("k".into()));
    }

    #[test]
    fn hex_forms() {
        let short = ColorSpec::from("#f00").to_rgba().unwrap();
        assert_eq!(short, Rgba::rgb(1.0, 0.0, 0.0));
        let with_alpha = ColorSpec::from("#00000080").to_rgba().unwrap();
        assert!((with_alpha.a - 128.0 / 255.0).abs() < 1e-12);
        assert!(ColorSpec::from("#12").to_rgba().is_err());
    }

    #[test]
    fn aliases_resolve_to_canonical_names() {
        let grey = ColorSpec::named("darkgrey").to_rgba().unwrap();
        assert_eq!(grey.to_rgb255(), [169, 169, 169]);
        let aqua = ColorSpec::named("Aqua").to_rgba().unwrap();
        assert_eq!(aqua.to_rgb255(), [0, 255, 255]);
    }

    #[test]
    fn unknown_names_are_errors() {
        assert!(matches!(
            ColorSpec::named("not-a-color").to_rgba(),
            Err(RenderError::UnknownColor { .. })
        ));
    }

    #[test]
    fn alpha_override_leaves_none_transparent() {
        let none = ColorSpec::None.to_rgba_with_alpha(Some(0.5)).unwrap();
        assert_eq!(none.a, 0.0);
        let red = ColorSpec::named("r").to_rgba_with_alpha(Some(0.5)).unwrap();
        assert_eq!(red.a, 0.5);
    }

    #[test]
    fn web_colors_are_sorted_and_unique() {
        for pair in WEB_COLORS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} !< {}", pair[0].0, pair[1].0);
        }
    }
}
