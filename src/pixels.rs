//! In-memory RGB pixel grid
//!
//! Every statistics routine reads from a [`PixelGrid`]: a row-major grid of
//! 8-bit RGB triples produced once by the image loader and never mutated
//! afterwards.

use image::{Rgb, RgbImage};

/// Immutable 8-bit RGB pixel grid (row-major, origin top-left)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    image: RgbImage,
}

impl PixelGrid {
    /// Wrap a decoded RGB image
    pub fn from_rgb_image(image: RgbImage) -> Self {
        Self { image }
    }

    /// Build a grid by evaluating `f(x, y)` for every pixel
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 3],
    {
        Self {
            image: RgbImage::from_fn(width, height, |x, y| Rgb(f(x, y))),
        }
    }

    /// Grid filled with a single color
    pub fn solid(width: u32, height: u32, color: [u8; 3]) -> Self {
        Self::from_fn(width, height, |_, _| color)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True when the grid has no pixels
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// RGB triple at `(x, y)`; caller guarantees the coordinate is in bounds
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }

    /// Raw interleaved bytes of row `y` restricted to columns `x1..x2`
    #[inline]
    pub fn row_span(&self, y: u32, x1: u32, x2: u32) -> &[u8] {
        let stride = self.width() as usize * 3;
        let start = y as usize * stride + x1 as usize * 3;
        let end = y as usize * stride + x2 as usize * 3;
        &self.image.as_raw()[start..end]
    }

    /// Borrow the underlying image buffer
    pub fn as_rgb_image(&self) -> &RgbImage {
        &self.image
    }

    /// Consume the grid, returning the underlying image buffer
    pub fn into_rgb_image(self) -> RgbImage {
        self.image
    }
}

impl From<RgbImage> for PixelGrid {
    fn from(image: RgbImage) -> Self {
        Self::from_rgb_image(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_is_row_major() {
        let grid = PixelGrid::from_fn(3, 2, |x, y| [x as u8, y as u8, 7]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.pixel(2, 1), [2, 1, 7]);
        assert_eq!(grid.row_span(1, 1, 3), &[1, 1, 7, 2, 1, 7]);
    }

    #[test]
    fn test_empty_grid() {
        assert!(PixelGrid::solid(0, 5, [0, 0, 0]).is_empty());
        assert!(!PixelGrid::solid(1, 1, [0, 0, 0]).is_empty());
    }
}
