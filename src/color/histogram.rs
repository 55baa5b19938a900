//! Per-channel distribution statistics for 8-bit values
//!
//! Every channel in every supported color space lives on 0-255, so one
//! 256-bin histogram per channel is enough to derive mean, median and
//! standard deviation exactly. Sums are kept as integers; only the final
//! ratios are computed in floating point.

use serde::{Deserialize, Serialize};

use crate::constants::bins::HISTOGRAM_BINS;

/// Arithmetic mean, median and population standard deviation of a channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}

/// Running count, sum and sum of squares over 8-bit samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelMoments {
    count: u64,
    sum: u64,
    sum_sq: u64,
}

impl ChannelMoments {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, value: u8) {
        self.push_n(value, 1);
    }

    /// Add `n` samples of the same value
    #[inline]
    pub fn push_n(&mut self, value: u8, n: u64) {
        let v = u64::from(value);
        self.count += n;
        self.sum += v * n;
        self.sum_sq += v * v * n;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Arithmetic mean, 0 for an empty channel
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum as f64 / self.count as f64
    }

    /// Population standard deviation (divides by N), 0 for an empty channel
    pub fn std_dev(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        // N * sum(x^2) - sum(x)^2 is non-negative and exact in integers
        let n = u128::from(self.count);
        let numerator = n * u128::from(self.sum_sq) - u128::from(self.sum) * u128::from(self.sum);
        let variance = numerator as f64 / (n * n) as f64;
        variance.sqrt()
    }
}

/// 256-bin histogram of one 8-bit channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    bins: Vec<u64>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self {
            bins: vec![0; HISTOGRAM_BINS],
        }
    }

    /// Build a histogram from a sequence of samples
    pub fn from_values<I: IntoIterator<Item = u8>>(values: I) -> Self {
        let mut hist = Self::new();
        for v in values {
            hist.add(v);
        }
        hist
    }

    #[inline]
    pub fn add(&mut self, value: u8) {
        self.bins[usize::from(value)] += 1;
    }

    /// Add `n` samples of the same value
    #[inline]
    pub fn add_n(&mut self, value: u8, n: u64) {
        self.bins[usize::from(value)] += n;
    }

    /// Counts indexed by channel value
    pub fn bins(&self) -> &[u64] {
        &self.bins
    }

    /// Number of samples recorded
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    pub fn moments(&self) -> ChannelMoments {
        let mut moments = ChannelMoments::new();
        for (value, &count) in self.bins.iter().enumerate() {
            if count > 0 {
                moments.push_n(value as u8, count);
            }
        }
        moments
    }

    /// Value of the `k`-th smallest sample (0-based)
    fn kth(&self, k: u64) -> Option<u8> {
        let mut seen = 0u64;
        for (value, &count) in self.bins.iter().enumerate() {
            seen += count;
            if seen > k {
                return Some(value as u8);
            }
        }
        None
    }

    /// Median, averaging the two middle samples for an even count
    pub fn median(&self) -> Option<f64> {
        let n = self.total();
        if n == 0 {
            return None;
        }
        let upper = f64::from(self.kth(n / 2)?);
        if n % 2 == 1 {
            Some(upper)
        } else {
            let lower = f64::from(self.kth(n / 2 - 1)?);
            Some((lower + upper) / 2.0)
        }
    }

    /// Mean, median and standard deviation, `None` for an empty histogram
    pub fn channel_stats(&self) -> Option<ChannelStats> {
        let median = self.median()?;
        let moments = self.moments();
        Some(ChannelStats {
            mean: moments.mean(),
            median,
            std: moments.std_dev(),
        })
    }
}
