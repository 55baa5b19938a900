//! Whole-image grid statistics
//!
//! Tiles the image into `cell_size x cell_size` squares from the top-left
//! corner and reports RGB mean and standard deviation per cell. Cells that
//! would cross the right or bottom edge are skipped rather than clipped so
//! every reported cell covers the same pixel count.

use log::info;
use serde::{Deserialize, Serialize};

use crate::color::histogram::ChannelMoments;
use crate::color::region::NormalizedRgb;
use crate::pixels::PixelGrid;

/// Statistics of one full grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Left edge of the cell
    pub x: u32,
    /// Top edge of the cell
    pub y: u32,
    /// Mean R, G, B
    pub mean: [f64; 3],
    /// Population standard deviation of R, G, B
    pub std: [f64; 3],
}

impl GridCell {
    pub fn normalized(&self) -> NormalizedRgb {
        NormalizedRgb::from_means(self.mean)
    }
}

/// Grid analyzer for a fixed cell size
#[derive(Debug, Clone, Copy)]
pub struct GridAnalyzer {
    cell_size: i32,
}

impl GridAnalyzer {
    pub fn new(cell_size: i32) -> Self {
        Self { cell_size }
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Analyze every full cell in scan order: rows top to bottom, columns
    /// left to right.
    ///
    /// Returns an empty list for a non-positive cell size or when the image
    /// is smaller than one cell.
    pub fn analyze(&self, grid: &PixelGrid) -> Vec<GridCell> {
        if self.cell_size <= 0 {
            return Vec::new();
        }

        let size = self.cell_size as u32;
        let cols = grid.width() / size;
        let rows = grid.height() / size;

        let mut cells = Vec::with_capacity(cols as usize * rows as usize);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(cell_stats(grid, col * size, row * size, size));
            }
        }

        info!(
            "Grid {}px over {}x{}: {} full cells ({} cols x {} rows), edge remainder {}x{} px dropped",
            size,
            grid.width(),
            grid.height(),
            cells.len(),
            cols,
            rows,
            grid.width() % size,
            grid.height() % size
        );
        cells
    }
}

fn cell_stats(grid: &PixelGrid, x: u32, y: u32, size: u32) -> GridCell {
    let mut moments = [ChannelMoments::new(); 3];
    for row in y..y + size {
        for px in grid.row_span(row, x, x + size).chunks_exact(3) {
            for (m, &v) in moments.iter_mut().zip(px) {
                m.push(v);
            }
        }
    }

    GridCell {
        x,
        y,
        mean: moments.map(|m| m.mean()),
        std: moments.map(|m| m.std_dev()),
    }
}

/// Analyze `grid` with square cells of `cell_size`; see [`GridAnalyzer::analyze`]
pub fn analyze_grid(grid: &PixelGrid, cell_size: i32) -> Vec<GridCell> {
    GridAnalyzer::new(cell_size).analyze(grid)
}
