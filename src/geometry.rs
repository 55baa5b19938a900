//! Selection geometry in image-pixel coordinates
//!
//! Selections come from an interactive editor and may extend past the image
//! edges. Rectangles are clipped once here; lines are clamped per sample by
//! the line profiler.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::defaults::MAX_LINE_LENGTH;
use crate::AnalysisError;

/// Rectangular selection `(x, y, w, h)`, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Half-open pixel bounds `[x1, x2) x [y1, y2)` known to lie inside an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClippedRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

/// Line segment between two integer endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl SelectionRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Clip against a `width x height` image.
    ///
    /// Returns `None` when nothing of the selection remains inside.
    pub fn clip(&self, width: u32, height: u32) -> Option<ClippedRect> {
        let x1 = i64::from(self.x).max(0);
        let y1 = i64::from(self.y).max(0);
        let x2 = (i64::from(self.x) + i64::from(self.w)).min(i64::from(width));
        let y2 = (i64::from(self.y) + i64::from(self.h)).min(i64::from(height));

        if x1 >= x2 || y1 >= y2 {
            return None;
        }

        // All four values are now within [0, u32::MAX]
        Some(ClippedRect {
            x1: x1 as u32,
            y1: y1 as u32,
            x2: x2 as u32,
            y2: y2 as u32,
        })
    }
}

impl ClippedRect {
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

impl LineSegment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        let dx = f64::from(self.x2) - f64::from(self.x1);
        let dy = f64::from(self.y2) - f64::from(self.y1);
        dx.hypot(dy)
    }

    pub fn is_degenerate(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }
}

/// Parse a comma-separated list of exactly `N` integers
fn parse_ints<const N: usize>(name: &str, s: &str) -> Result<[i32; N], AnalysisError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(AnalysisError::invalid_parameter(name, s));
    }

    let mut out = [0i32; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|_| AnalysisError::invalid_parameter(name, s))?;
    }
    Ok(out)
}

impl FromStr for SelectionRect {
    type Err = AnalysisError;

    /// Parse `"x,y,w,h"`; negative sizes are rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x, y, w, h] = parse_ints::<4>("rect", s)?;
        if w < 0 || h < 0 {
            return Err(AnalysisError::invalid_parameter("rect", s));
        }
        Ok(Self::new(x, y, w, h))
    }
}

impl FromStr for LineSegment {
    type Err = AnalysisError;

    /// Parse `"x1,y1,x2,y2"`; segments longer than `MAX_LINE_LENGTH` are rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x1, y1, x2, y2] = parse_ints::<4>("line", s)?;
        let line = Self::new(x1, y1, x2, y2);
        if line.length() > MAX_LINE_LENGTH {
            return Err(AnalysisError::invalid_parameter("line", s));
        }
        Ok(line)
    }
}
