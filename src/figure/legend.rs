//! Axes legends.

use glam::DVec2;

use super::color::ColorSpec;
use super::text::HAlign;
use crate::types::Bbox;

/// Placement codes: 0 best, 1 upper right, 2 upper left, 3 lower left,
/// 4 lower right, 5 right, 6 center left, 7 center right, 8 lower center,
/// 9 upper center, 10 center
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LegendLoc(pub u8);

impl LegendLoc {
    pub const BEST: LegendLoc = LegendLoc(0);
    pub const UPPER_RIGHT: LegendLoc = LegendLoc(1);
    pub const UPPER_LEFT: LegendLoc = LegendLoc(2);
    pub const LOWER_LEFT: LegendLoc = LegendLoc(3);
    pub const LOWER_RIGHT: LegendLoc = LegendLoc(4);
    pub const CENTER: LegendLoc = LegendLoc(10);
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    /// Label of the artist this entry describes
    pub handle_label: String,
    /// Text shown in the legend
    pub text: String,
    pub ha: HAlign,
}

impl LegendEntry {
    /// Entry whose text is the handle's label.
    pub fn for_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            handle_label: label.clone(),
            text: label,
            ha: HAlign::Left,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub loc: LegendLoc,
    /// Upper-right anchor in axes fractions; overrides `loc` positioning
    pub bbox_to_anchor: Option<DVec2>,
    pub frame_on: bool,
    pub edgecolor: ColorSpec,
    pub facecolor: ColorSpec,
    pub frame_alpha: Option<f64>,
    pub ncols: usize,
    /// Rendered legend frame in display pixels, when the host measured it
    pub window_extent: Option<Bbox>,
    pub visible: bool,
    pub zorder: f64,
}

impl Legend {
    pub fn new(entries: Vec<LegendEntry>) -> Self {
        Self {
            entries,
            loc: LegendLoc::BEST,
            bbox_to_anchor: None,
            frame_on: true,
            edgecolor: ColorSpec::Gray(0.8),
            facecolor: ColorSpec::named("white"),
            frame_alpha: Some(0.8),
            ncols: 1,
            window_extent: None,
            visible: true,
            zorder: 5.0,
        }
    }

    pub fn for_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(labels.into_iter().map(LegendEntry::for_label).collect())
    }

    pub fn with_loc(mut self, loc: LegendLoc) -> Self {
        self.loc = loc;
        self
    }

    /// Displayed text for an artist label.
    pub fn text_for(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.handle_label == label)
            .map(|e| e.text.as_str())
    }
}
