//! Caller-side image cache for interactive use
//!
//! An interactive viewer keeps one image open and recomputes statistics as
//! the selection moves. [`Session`] owns the decoded grid for that image and
//! remembers the last region result so that repeated requests with the same
//! selection do not rescan the crop. The statistics functions it wraps stay
//! pure.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::analysis::grid::{GridAnalyzer, GridCell};
use crate::analysis::line_profile::{profile_line, LineProfile};
use crate::color::compare::{compare_regions, RegionComparison};
use crate::color::conversion::ColorSpaceSelection;
use crate::color::region::{RegionAnalyzer, RegionStats};
use crate::error::Result;
use crate::geometry::{LineSegment, SelectionRect};
use crate::image_loader::load_image;
use crate::pixels::PixelGrid;

type RegionKey = (SelectionRect, ColorSpaceSelection);

/// One open image plus memoized region statistics
#[derive(Debug, Default)]
pub struct Session {
    image: Option<(PathBuf, PixelGrid)>,
    spaces: ColorSpaceSelection,
    last_region: Option<(RegionKey, Option<RegionStats>)>,
    computations: usize,
}

impl Session {
    pub fn new(spaces: ColorSpaceSelection) -> Self {
        Self {
            spaces,
            ..Self::default()
        }
    }

    /// Decode `path` and make it the open image.
    ///
    /// On failure the previously open image stays open.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let grid = load_image(path)?;
        info!(
            "Opened {} ({}x{})",
            path.display(),
            grid.width(),
            grid.height()
        );
        self.open_grid(path.to_path_buf(), grid);
        Ok(())
    }

    /// Make an already decoded grid the open image
    pub fn open_grid(&mut self, path: PathBuf, grid: PixelGrid) {
        self.image = Some((path, grid));
        self.last_region = None;
    }

    pub fn close(&mut self) {
        self.image = None;
        self.last_region = None;
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image.as_ref().map(|(p, _)| p.as_path())
    }

    pub fn grid(&self) -> Option<&PixelGrid> {
        self.image.as_ref().map(|(_, g)| g)
    }

    pub fn color_spaces(&self) -> ColorSpaceSelection {
        self.spaces
    }

    pub fn set_color_spaces(&mut self, spaces: ColorSpaceSelection) {
        self.spaces = spaces;
    }

    /// Number of region scans actually performed
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Region statistics for `rect` on the open image
    ///
    /// Returns `None` when no image is open or the selection is empty.
    pub fn region_stats(&mut self, rect: SelectionRect) -> Option<&RegionStats> {
        let (_, grid) = self.image.as_ref()?;
        let key = (rect, self.spaces);

        let cached = matches!(&self.last_region, Some((k, _)) if *k == key);
        if cached {
            debug!("Reusing region statistics for {:?}", rect);
        } else {
            let stats = RegionAnalyzer::with_color_spaces(self.spaces).compute(grid, rect);
            self.computations += 1;
            self.last_region = Some((key, stats));
        }

        self.last_region.as_ref().and_then(|(_, stats)| stats.as_ref())
    }

    pub fn line_profile(&self, line: LineSegment) -> Option<LineProfile> {
        profile_line(self.grid()?, line)
    }

    pub fn grid_cells(&self, cell_size: i32) -> Vec<GridCell> {
        match self.grid() {
            Some(grid) => GridAnalyzer::new(cell_size).analyze(grid),
            None => Vec::new(),
        }
    }

    /// Compare `rect` on the open image (base) against `overlay`
    pub fn compare_with(&self, overlay: &PixelGrid, rect: SelectionRect) -> Option<RegionComparison> {
        compare_regions(self.grid()?, overlay, rect, self.spaces)
    }
}
