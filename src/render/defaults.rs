//! Fixed constants of the PGFPlots lowering

/// Distance of a placed legend from the axes frame, in axes fractions
pub const LEGEND_PAD: f64 = 0.03;
/// Granularity of custom colormap positions
pub const COLORMAP_MAX_STEPS: f64 = 1000.0;
/// Below this, two colormap positions are treated as commensurable
pub const COLORMAP_GCD_TOLERANCE: f64 = 1e-5;
/// Aspect ratio beyond which a tick-less axes is taken for a colorbar
pub const COLORBAR_ASPECT_THRESHOLD: f64 = 5.0;
/// Absolute and relative tolerance when comparing tick labels to positions
pub const TICK_TOLERANCE: f64 = 1e-10;
/// Marker path comparison tolerance
pub const MARKER_TOLERANCE: f64 = 1e-10;
/// Conversion from host line widths (pt) to the non-strict TikZ scale
pub const LINEWIDTH_SCALE: f64 = 0.4;
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Sidecar kind names
pub const IMAGE_KIND: &str = "img";
pub const TABLE_KIND: &str = "table";
