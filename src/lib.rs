//! # RGB Analyzer
//!
//! Pixel-level color statistics for raster images.
//!
//! Given a decoded image and a selection, this library reports:
//! - Mean, median and standard deviation per channel in RGB, HSV and Lab
//! - R, G, B histograms and a frequency table of every distinct color
//! - Intensity profiles sampled along a line segment
//! - Per-cell statistics over a regular grid, with an annotated map image
//! - Deltas between the same selection on a base and an overlay image
//!
//! All statistics functions are pure: they take a [`PixelGrid`] and a
//! geometry value and return a fresh result. Selections that clip to
//! nothing produce `None` rather than an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rgb_analyzer::{compute_region_stats, load_image, ColorSpaceSelection, SelectionRect};
//! use std::path::Path;
//!
//! let grid = load_image(Path::new("photo.png"))?;
//! if let Some(stats) = compute_region_stats(&grid, SelectionRect::new(10, 10, 50, 50), ColorSpaceSelection::all()) {
//!     println!("Mean RGB: {:?}", stats.rgb.means());
//!     println!("{}", stats.command_string());
//! }
//! # Ok::<(), rgb_analyzer::AnalysisError>(())
//! ```

pub mod analysis;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod geometry;
pub mod image_loader;
pub mod pixels;
pub mod render;
pub mod session;

pub use analysis::{analyze_grid, profile_line, GridAnalyzer, GridCell, LineProfile};
pub use color::{
    compare_regions, compute_region_stats, ChannelStats, ColorConverter, ColorCount, ColorSpace,
    ColorSpaceSelection, Histogram, NormalizedRgb, RegionAnalyzer, RegionComparison, RegionStats,
    StatsDelta,
};
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use export::{ExportFormat, GridExport};
pub use geometry::{ClippedRect, LineSegment, SelectionRect};
pub use image_loader::load_image;
pub use pixels::PixelGrid;
pub use render::{annotate_map, AnnotationStyle, MapAnnotator};
pub use session::Session;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_stats_serialization() {
        let grid = PixelGrid::from_fn(3, 3, |x, y| [x as u8 * 50, y as u8 * 50, 200]);
        let stats = compute_region_stats(&grid, SelectionRect::new(0, 0, 3, 3), ColorSpaceSelection::all())
            .unwrap();

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: RegionStats = serde_json::from_str(&json).unwrap();

        assert_eq!(stats, deserialized);
    }

    #[test]
    fn test_grid_cell_serialization() {
        let cells = analyze_grid(&PixelGrid::solid(4, 4, [1, 2, 3]), 2);
        let json = serde_json::to_string(&cells).unwrap();
        let deserialized: Vec<GridCell> = serde_json::from_str(&json).unwrap();
        assert_eq!(cells, deserialized);
    }
}
