//! Color conversion and region statistics

pub mod compare;
pub mod conversion;
pub mod histogram;
pub mod region;

pub use compare::{compare_regions, RegionComparison, StatsDelta};
pub use conversion::{ColorConverter, ColorSpace, ColorSpaceSelection};
pub use histogram::{ChannelMoments, ChannelStats, Histogram};
pub use region::{compute_region_stats, ColorCount, NormalizedRgb, RegionAnalyzer, RegionStats};
