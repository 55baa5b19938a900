//! Rectangular region statistics
//!
//! Computes aggregate color statistics over a clipped rectangular crop:
//! - Mean, median and population standard deviation per channel in RGB,
//!   and optionally in HSV and Lab
//! - Frequency table of every distinct color, most frequent first
//! - 256-bin R, G, B intensity histograms
//!
//! An empty selection after clipping yields `None`.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::conversion::{ColorConverter, ColorSpace, ColorSpaceSelection};
use crate::color::histogram::{ChannelStats, Histogram};
use crate::geometry::{ClippedRect, SelectionRect};
use crate::pixels::PixelGrid;

/// One distinct color of a crop and how often it occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCount {
    pub color: [u8; 3],
    pub count: usize,
}

/// Channel statistics of one color space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSpaceStats {
    pub space: ColorSpace,
    pub channels: [ChannelStats; 3],
}

impl ColorSpaceStats {
    pub fn means(&self) -> [f64; 3] {
        self.channels.map(|c| c.mean)
    }

    pub fn medians(&self) -> [f64; 3] {
        self.channels.map(|c| c.median)
    }

    pub fn stds(&self) -> [f64; 3] {
        self.channels.map(|c| c.std)
    }
}

/// Per-channel RGB histograms of a crop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbHistograms {
    pub red: Histogram,
    pub green: Histogram,
    pub blue: Histogram,
}

/// R and B means expressed relative to the G mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl NormalizedRgb {
    /// Normalize so that G = 1.0; both ratios are 0 when the G mean is 0
    pub fn from_means(means: [f64; 3]) -> Self {
        let [r, g, b] = means;
        if g == 0.0 {
            return Self { r: 0.0, g: 1.0, b: 0.0 };
        }
        Self {
            r: r / g,
            g: 1.0,
            b: b / g,
        }
    }

    /// Two-value summary for pasting into other tools, e.g. `R,B 1.05,0.93`
    pub fn command_string(&self) -> String {
        format!("R,B {:.2},{:.2}", self.r, self.b)
    }
}

/// Statistics of one rectangular crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    /// Selection after clipping to the image
    pub region: ClippedRect,
    pub pixel_count: usize,
    pub rgb: ColorSpaceStats,
    pub hsv: Option<ColorSpaceStats>,
    pub lab: Option<ColorSpaceStats>,
    /// Every distinct color, sorted by descending count
    pub unique_colors: Vec<ColorCount>,
    pub histograms: RgbHistograms,
}

impl RegionStats {
    pub fn normalized(&self) -> NormalizedRgb {
        NormalizedRgb::from_means(self.rgb.means())
    }

    pub fn command_string(&self) -> String {
        self.normalized().command_string()
    }

    /// Statistics for `space`, if it was computed
    pub fn space(&self, space: ColorSpace) -> Option<&ColorSpaceStats> {
        match space {
            ColorSpace::Rgb => Some(&self.rgb),
            ColorSpace::Hsv => self.hsv.as_ref(),
            ColorSpace::Lab => self.lab.as_ref(),
        }
    }

    /// The first `limit` rows of the color table and whether rows were hidden
    pub fn top_colors(&self, limit: usize) -> (&[ColorCount], bool) {
        let shown = self.unique_colors.len().min(limit);
        (&self.unique_colors[..shown], self.unique_colors.len() > limit)
    }
}

/// Region statistics calculator
#[derive(Debug, Clone, Default)]
pub struct RegionAnalyzer {
    converter: ColorConverter,
    spaces: ColorSpaceSelection,
}

impl RegionAnalyzer {
    /// Create a region analyzer reporting RGB only
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a region analyzer that also reports the selected color spaces
    pub fn with_color_spaces(spaces: ColorSpaceSelection) -> Self {
        Self {
            converter: ColorConverter::new(),
            spaces,
        }
    }

    /// Compute statistics over `rect` clipped to the grid
    ///
    /// # Returns
    ///
    /// `None` if nothing of `rect` lies inside the image
    pub fn compute(&self, grid: &PixelGrid, rect: SelectionRect) -> Option<RegionStats> {
        let Some(region) = rect.clip(grid.width(), grid.height()) else {
            debug!("Selection {:?} is empty after clipping", rect);
            return None;
        };

        let unique_colors = count_unique_colors(grid, region);

        let mut histograms = RgbHistograms {
            red: Histogram::new(),
            green: Histogram::new(),
            blue: Histogram::new(),
        };
        for entry in &unique_colors {
            let n = entry.count as u64;
            histograms.red.add_n(entry.color[0], n);
            histograms.green.add_n(entry.color[1], n);
            histograms.blue.add_n(entry.color[2], n);
        }

        let rgb = ColorSpaceStats {
            space: ColorSpace::Rgb,
            channels: [
                histograms.red.channel_stats()?,
                histograms.green.channel_stats()?,
                histograms.blue.channel_stats()?,
            ],
        };
        let hsv = if self.spaces.hsv {
            Some(self.converted_stats(ColorSpace::Hsv, &unique_colors)?)
        } else {
            None
        };
        let lab = if self.spaces.lab {
            Some(self.converted_stats(ColorSpace::Lab, &unique_colors)?)
        } else {
            None
        };

        Some(RegionStats {
            region,
            pixel_count: region.area(),
            rgb,
            hsv,
            lab,
            unique_colors,
            histograms,
        })
    }

    /// Each distinct color is converted once and weighted by its count,
    /// which equals converting every pixel of the crop.
    fn converted_stats(&self, space: ColorSpace, colors: &[ColorCount]) -> Option<ColorSpaceStats> {
        let mut hists = [Histogram::new(), Histogram::new(), Histogram::new()];
        for entry in colors {
            let converted = self.converter.convert(space, entry.color);
            for (hist, value) in hists.iter_mut().zip(converted) {
                hist.add_n(value, entry.count as u64);
            }
        }

        let [h0, h1, h2] = &hists;
        Some(ColorSpaceStats {
            space,
            channels: [h0.channel_stats()?, h1.channel_stats()?, h2.channel_stats()?],
        })
    }
}

/// Count distinct colors in scan order, then sort by descending count.
///
/// The sort is stable, so equal counts keep the order in which the colors
/// were first met scanning rows top to bottom.
fn count_unique_colors(grid: &PixelGrid, region: ClippedRect) -> Vec<ColorCount> {
    let mut index: HashMap<[u8; 3], usize> = HashMap::new();
    let mut colors: Vec<ColorCount> = Vec::new();

    for y in region.y1..region.y2 {
        for px in grid.row_span(y, region.x1, region.x2).chunks_exact(3) {
            let color = [px[0], px[1], px[2]];
            match index.get(&color) {
                Some(&i) => colors[i].count += 1,
                None => {
                    index.insert(color, colors.len());
                    colors.push(ColorCount { color, count: 1 });
                }
            }
        }
    }

    colors.sort_by(|a, b| b.count.cmp(&a.count));
    colors
}

/// Compute region statistics for `rect`; see [`RegionAnalyzer::compute`]
pub fn compute_region_stats(
    grid: &PixelGrid,
    rect: SelectionRect,
    spaces: ColorSpaceSelection,
) -> Option<RegionStats> {
    RegionAnalyzer::with_color_spaces(spaces).compute(grid, rect)
}
