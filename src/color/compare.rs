//! Overlay-vs-base region comparison
//!
//! Samples the same selection on two images (for example a reference frame
//! and a processed copy) and reports how much each statistic moved.
//! Each image is clipped against its own bounds.

use serde::{Deserialize, Serialize};

use crate::color::conversion::{ColorSpace, ColorSpaceSelection};
use crate::color::region::{ColorSpaceStats, RegionAnalyzer, RegionStats};
use crate::geometry::SelectionRect;
use crate::pixels::PixelGrid;

/// Change of one channel, `overlay - base`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelDelta {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}

/// Channel deltas of one color space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceDelta {
    pub space: ColorSpace,
    pub channels: [ChannelDelta; 3],
}

impl SpaceDelta {
    fn between(base: &ColorSpaceStats, overlay: &ColorSpaceStats) -> Self {
        let channels = std::array::from_fn(|i| {
            let (b, o) = (base.channels[i], overlay.channels[i]);
            ChannelDelta {
                mean: o.mean - b.mean,
                median: o.median - b.median,
                std: o.std - b.std,
            }
        });
        Self {
            space: base.space,
            channels,
        }
    }

    pub fn mean_deltas(&self) -> [f64; 3] {
        self.channels.map(|c| c.mean)
    }
}

/// Differences between two region statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsDelta {
    pub rgb: SpaceDelta,
    /// Present only when both sides computed HSV
    pub hsv: Option<SpaceDelta>,
    /// Present only when both sides computed Lab
    pub lab: Option<SpaceDelta>,
    /// Change of `R/G`
    pub norm_r: f64,
    /// Change of `B/G`
    pub norm_b: f64,
    pub base_pixels: usize,
    pub overlay_pixels: usize,
}

impl StatsDelta {
    pub fn between(base: &RegionStats, overlay: &RegionStats) -> Self {
        let pair = |space: ColorSpace| match (base.space(space), overlay.space(space)) {
            (Some(b), Some(o)) => Some(SpaceDelta::between(b, o)),
            _ => None,
        };
        let (nb, no) = (base.normalized(), overlay.normalized());

        Self {
            rgb: SpaceDelta::between(&base.rgb, &overlay.rgb),
            hsv: pair(ColorSpace::Hsv),
            lab: pair(ColorSpace::Lab),
            norm_r: no.r - nb.r,
            norm_b: no.b - nb.b,
            base_pixels: base.pixel_count,
            overlay_pixels: overlay.pixel_count,
        }
    }
}

/// Statistics of both sides plus their difference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionComparison {
    pub base: RegionStats,
    pub overlay: RegionStats,
    pub delta: StatsDelta,
}

/// Compare `rect` on `base` and `overlay`
///
/// Returns `None` if the selection is empty on either image.
pub fn compare_regions(
    base: &PixelGrid,
    overlay: &PixelGrid,
    rect: SelectionRect,
    spaces: ColorSpaceSelection,
) -> Option<RegionComparison> {
    let analyzer = RegionAnalyzer::with_color_spaces(spaces);
    let base_stats = analyzer.compute(base, rect)?;
    let overlay_stats = analyzer.compute(overlay, rect)?;
    let delta = StatsDelta::between(&base_stats, &overlay_stats);

    Some(RegionComparison {
        base: base_stats,
        overlay: overlay_stats,
        delta,
    })
}
