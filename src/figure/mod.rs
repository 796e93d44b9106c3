//! In-memory figure tree handed to the compiler.
//!
//! A [`Figure`] owns [`Artist`]s; an [`Axes`] is itself an artist whose
//! children are the plotted primitives. Every artist exposes the common
//! [`ArtistNode`] surface (z-order, label, visibility, children) through
//! enum dispatch.

pub mod axes;
pub mod collection;
pub mod color;
pub mod colormap;
pub mod raster;
pub mod legend;
pub mod line;
pub mod markers;
pub mod patch;
pub mod path;
pub mod text;

use enum_dispatch::enum_dispatch;
use glam::DVec2;

pub use axes::*;
pub use collection::*;
pub use color::ColorSpec;
pub use colormap::{Anchor, Colormap, ListedColormap, SegmentedColormap};
pub use raster::*;
pub use legend::*;
pub use line::*;
pub use patch::*;
pub use path::*;
pub use text::*;

use crate::types::Bbox;

/// Stable identity of an axes within its figure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxesId(pub u32);

/// Surface shared by every node of the tree
#[enum_dispatch]
pub trait ArtistNode {
    fn zorder(&self) -> f64;

    fn label(&self) -> &str {
        ""
    }

    fn visible(&self) -> bool {
        true
    }

    fn children(&self) -> &[Artist] {
        &[]
    }
}

#[enum_dispatch(ArtistNode)]
#[derive(Clone, Debug, PartialEq)]
pub enum Artist {
    Axes(Axes),
    Line(Line2D),
    Patch(Patch),
    PatchCollection(PatchCollection),
    LineCollection(LineCollection),
    PathCollection(PathCollection),
    Image(AxesImage),
    QuadMesh(QuadMesh),
    Text(Text),
    Annotation(Annotation),
    Legend(Legend),
    Spine(Spine),
    Axis(AxisArtist),
    Unknown(UnknownArtist),
}

/// Axes frame line; carries no data
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Spine {
    pub side: String,
}

/// The x or y axis object itself (ticks and label live on [`AxisInfo`])
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AxisArtist {
    pub name: String,
}

/// Artist type the compiler has no emitter for
#[derive(Clone, Debug, PartialEq, Default)]
pub struct UnknownArtist {
    pub type_name: String,
    pub zorder: f64,
}

macro_rules! artist_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ArtistNode for $ty {
                fn zorder(&self) -> f64 {
                    self.zorder
                }

                fn label(&self) -> &str {
                    &self.label
                }

                fn visible(&self) -> bool {
                    self.visible
                }
            }
        )*
    };
}

artist_node!(
    Line2D,
    Patch,
    PatchCollection,
    LineCollection,
    PathCollection,
    AxesImage,
    QuadMesh,
);

impl ArtistNode for Axes {
    fn zorder(&self) -> f64 {
        self.zorder
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn children(&self) -> &[Artist] {
        &self.children
    }
}

impl ArtistNode for Text {
    fn zorder(&self) -> f64 {
        self.zorder
    }

    fn label(&self) -> &str {
        &self.text
    }

    fn visible(&self) -> bool {
        self.visible
    }
}

impl ArtistNode for Annotation {
    fn zorder(&self) -> f64 {
        self.text.zorder
    }

    fn label(&self) -> &str {
        &self.text.text
    }

    fn visible(&self) -> bool {
        self.text.visible
    }
}

impl ArtistNode for Legend {
    fn zorder(&self) -> f64 {
        self.zorder
    }

    fn visible(&self) -> bool {
        self.visible
    }
}

impl ArtistNode for Spine {
    fn zorder(&self) -> f64 {
        2.5
    }
}

impl ArtistNode for AxisArtist {
    fn zorder(&self) -> f64 {
        2.5
    }
}

impl ArtistNode for UnknownArtist {
    fn zorder(&self) -> f64 {
        self.zorder
    }
}

/// Root of the tree
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub size_inches: DVec2,
    pub dpi: f64,
    pub children: Vec<Artist>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(6.4, 4.8)
    }
}

/// Default subplot margins and spacing in figure fractions
const SUBPLOT_LEFT: f64 = 0.125;
const SUBPLOT_RIGHT: f64 = 0.9;
const SUBPLOT_BOTTOM: f64 = 0.11;
const SUBPLOT_TOP: f64 = 0.88;
const SUBPLOT_WSPACE: f64 = 0.2;
const SUBPLOT_HSPACE: f64 = 0.2;

impl Figure {
    pub fn new(width_inches: f64, height_inches: f64) -> Self {
        Self {
            size_inches: DVec2::new(width_inches, height_inches),
            dpi: 100.0,
            children: Vec::new(),
        }
    }

    /// Figure with a single axes spanning the default plot area.
    pub fn with_axes(axes: Axes) -> Self {
        let mut figure = Self::default();
        figure.children.push(Artist::Axes(axes));
        figure
    }

    /// Figure with an `nrows x ncols` grid of empty subplots.
    pub fn subplots(nrows: usize, ncols: usize) -> Self {
        let mut figure = Self::default();
        let cell_w = (SUBPLOT_RIGHT - SUBPLOT_LEFT) / (ncols as f64 + SUBPLOT_WSPACE * (ncols as f64 - 1.0));
        let cell_h = (SUBPLOT_TOP - SUBPLOT_BOTTOM) / (nrows as f64 + SUBPLOT_HSPACE * (nrows as f64 - 1.0));
        for index in 0..nrows * ncols {
            let (row, col) = (index / ncols, index % ncols);
            let x0 = SUBPLOT_LEFT + col as f64 * cell_w * (1.0 + SUBPLOT_WSPACE);
            let y1 = SUBPLOT_TOP - row as f64 * cell_h * (1.0 + SUBPLOT_HSPACE);
            let mut axes = Axes::new(AxesId(index as u32));
            axes.position = Bbox::new(x0, y1 - cell_h, x0 + cell_w, y1);
            axes.subplot = Some(SubplotSpec {
                nrows,
                ncols,
                index,
            });
            figure.children.push(Artist::Axes(axes));
        }
        figure
    }

    pub fn push(&mut self, artist: impl Into<Artist>) {
        self.children.push(artist.into());
    }

    pub fn axes(&self) -> impl Iterator<Item = &Axes> {
        self.children.iter().filter_map(|c| match c {
            Artist::Axes(a) => Some(a),
            _ => None,
        })
    }

    pub fn axes_mut(&mut self) -> impl Iterator<Item = &mut Axes> {
        self.children.iter_mut().filter_map(|c| match c {
            Artist::Axes(a) => Some(a),
            _ => None,
        })
    }

    pub fn axes_by_id(&self, id: AxesId) -> Option<&Axes> {
        self.axes().find(|a| a.id == id)
    }

    pub fn axes_by_id_mut(&mut self, id: AxesId) -> Option<&mut Axes> {
        self.axes_mut().find(|a| a.id == id)
    }

    /// Canvas size in pixels at the figure's own dpi.
    pub fn size_pixels(&self) -> DVec2 {
        self.size_inches * self.dpi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_dispatch_reaches_the_variant() {
        let line: Artist = Line2D::new(vec![0.0], vec![1.0]).with_zorder(4.0).into();
        assert_eq!(line.zorder(), 4.0);
        assert_eq!(line.label(), "_nolegend_");
        let spine: Artist = Spine::default().into();
        assert!(spine.children().is_empty());
    }

    #[test]
    fn subplots_are_laid_out_row_major() {
        let fig = Figure::subplots(2, 2);
        let axes: Vec<_> = fig.axes().collect();
        assert_eq!(axes.len(), 4);
        assert!(axes[0].position.y0 > axes[2].position.y0);
        assert!(axes[0].position.x0 < axes[1].position.x0);
        assert_eq!(axes[3].subplot.map(|s| s.index), Some(3));
        assert!((axes[1].position.x1 - SUBPLOT_RIGHT).abs() < 1e-12);
    }

    #[test]
    fn axes_lookup_by_id() {
        let mut fig = Figure::subplots(1, 2);
        fig.axes_by_id_mut(AxesId(1)).unwrap().title = "right".into();
        assert_eq!(fig.axes_by_id(AxesId(1)).unwrap().title, "right");
        assert!(fig.axes_by_id(AxesId(9)).is_none());
    }

    #[test]
    fn containers_record_member_indices() {
        let mut axes = Axes::new(AxesId(0));
        axes.push(Line2D::default());
        axes.push_container(
            ContainerKind::Bar,
            "series",
            vec![
                Patch::bar(0.0, 0.0, 0.8, 1.0, "C0").into(),
                Patch::bar(1.0, 0.0, 0.8, 2.0, "C0").into(),
            ],
        );
        assert_eq!(axes.containers[0].members, vec![1, 2]);
    }
}
