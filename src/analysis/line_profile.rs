//! Intensity profile along a line segment
//!
//! Samples one pixel per unit of Euclidean length using nearest-neighbour
//! lookup. Sample coordinates are clamped to the image, so a line running
//! off the image repeats the edge pixels instead of failing.

use serde::{Deserialize, Serialize};

use crate::geometry::LineSegment;
use crate::pixels::PixelGrid;

/// Channel values sampled along a line, index-aligned with `points`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineProfile {
    /// Clamped pixel coordinate of every sample, start to end
    pub points: Vec<(u32, u32)>,
    pub red: Vec<u8>,
    pub green: Vec<u8>,
    pub blue: Vec<u8>,
}

impl LineProfile {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Sample `line` over `grid`
///
/// The sample count is the line length truncated to an integer; samples are
/// evenly spaced and include both endpoints. A single sample sits on the
/// start point. The profile holds one entry per sample, so memory grows with
/// the segment length rather than the image size; text input is bounded by
/// `MAX_LINE_LENGTH`.
///
/// # Returns
///
/// `None` for a line shorter than one pixel or an empty grid
pub fn profile_line(grid: &PixelGrid, line: LineSegment) -> Option<LineProfile> {
    if grid.is_empty() {
        return None;
    }

    let n = line.length() as usize;
    if n == 0 {
        return None;
    }

    let (x1, y1) = (f64::from(line.x1), f64::from(line.y1));
    let (dx, dy) = (f64::from(line.x2) - x1, f64::from(line.y2) - y1);
    let max_x = f64::from(grid.width() - 1);
    let max_y = f64::from(grid.height() - 1);

    let mut profile = LineProfile {
        points: Vec::with_capacity(n),
        red: Vec::with_capacity(n),
        green: Vec::with_capacity(n),
        blue: Vec::with_capacity(n),
    };

    for i in 0..n {
        let t = if n == 1 {
            0.0
        } else {
            i as f64 / (n - 1) as f64
        };
        let px = (x1 + t * dx).round().clamp(0.0, max_x) as u32;
        let py = (y1 + t * dy).round().clamp(0.0, max_y) as u32;

        let [r, g, b] = grid.pixel(px, py);
        profile.points.push((px, py));
        profile.red.push(r);
        profile.green.push(g);
        profile.blue.push(b);
    }

    Some(profile)
}
