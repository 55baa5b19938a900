//! Annotated grid map rendering
//!
//! Draws every analyzed grid cell onto a copy of the source image: an
//! outlined box plus the cell origin as two centered label lines (`x:..`
//! and `y:..`) with a drop shadow so the text stays readable on any
//! background.

use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::grid::GridCell;
use crate::constants::drawing::{
    LABEL_COLOR, LINE_GAP, OUTLINE_COLOR, OUTLINE_THICKNESS, PIXELS_PER_LABEL_SCALE, SHADOW_COLOR,
};
use crate::error::{AnalysisError, Result};
use crate::image_loader::load_image;
use crate::pixels::PixelGrid;
use crate::render::glyphs::{draw_text, text_height, text_width};

/// Colors and sizes used when drawing the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    pub outline: [u8; 3],
    pub outline_thickness: u32,
    pub label: [u8; 3],
    pub shadow: [u8; 3],
    /// Glyph pixel size; derived from the cell size when unset
    pub label_scale: Option<u32>,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            outline: OUTLINE_COLOR,
            outline_thickness: OUTLINE_THICKNESS,
            label: LABEL_COLOR,
            shadow: SHADOW_COLOR,
            label_scale: None,
        }
    }
}

/// Grid map renderer
#[derive(Debug, Clone, Default)]
pub struct MapAnnotator {
    style: AnnotationStyle,
}

impl MapAnnotator {
    pub fn new(style: AnnotationStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &AnnotationStyle {
        &self.style
    }

    /// Render `cells` over a copy of `grid`
    ///
    /// An empty cell list returns an unmodified copy of the source.
    pub fn annotate(&self, grid: &PixelGrid, cells: &[GridCell], cell_size: i32) -> RgbImage {
        let mut canvas = grid.as_rgb_image().clone();
        if cell_size <= 0 {
            return canvas;
        }

        let size = cell_size as u32;
        let scale = self
            .style
            .label_scale
            .unwrap_or_else(|| (size / PIXELS_PER_LABEL_SCALE).max(1));

        for cell in cells {
            if cell.x >= canvas.width() || cell.y >= canvas.height() {
                continue;
            }
            let w = size.min(canvas.width() - cell.x);
            let h = size.min(canvas.height() - cell.y);
            self.draw_outline(&mut canvas, cell.x, cell.y, w, h);
            self.draw_label(&mut canvas, cell, w, h, scale);
        }

        debug!("Annotated {} cells at label scale {}", cells.len(), scale);
        canvas
    }

    /// Reload the image at `path` and render `cells` over it
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::RenderError` if the image cannot be reloaded
    pub fn annotate_file(&self, path: &Path, cells: &[GridCell], cell_size: i32) -> Result<RgbImage> {
        let grid = load_image(path).map_err(|e| {
            AnalysisError::render(format!("Failed to reload base image: {}", path.display()), e)
        })?;
        Ok(self.annotate(&grid, cells, cell_size))
    }

    fn draw_outline(&self, canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32) {
        let color = Rgb(self.style.outline);
        for t in 0..self.style.outline_thickness {
            if w <= 2 * t || h <= 2 * t {
                break;
            }
            let rect = Rect::at((x + t) as i32, (y + t) as i32).of_size(w - 2 * t, h - 2 * t);
            draw_hollow_rect_mut(canvas, rect, color);
        }
    }

    fn draw_label(&self, canvas: &mut RgbImage, cell: &GridCell, w: u32, h: u32, scale: u32) {
        let lines = [format!("x:{}", cell.x), format!("y:{}", cell.y)];
        let line_h = text_height(scale) as i32;
        let gap = (LINE_GAP * scale) as i32;
        let block_h = 2 * line_h + gap;

        let cx = (cell.x + w / 2) as i32;
        let top = (cell.y + h / 2) as i32 - block_h / 2;
        let shadow_offset = scale as i32;

        for (i, text) in lines.iter().enumerate() {
            let left = cx - text_width(text, scale) as i32 / 2;
            let ty = top + i as i32 * (line_h + gap);
            draw_text(canvas, left + shadow_offset, ty + shadow_offset, scale, Rgb(self.style.shadow), text);
            draw_text(canvas, left, ty, scale, Rgb(self.style.label), text);
        }
    }
}

/// Render `cells` over `grid` with `style`; see [`MapAnnotator::annotate`]
pub fn annotate_map(
    grid: &PixelGrid,
    cells: &[GridCell],
    cell_size: i32,
    style: &AnnotationStyle,
) -> RgbImage {
    MapAnnotator::new(style.clone()).annotate(grid, cells, cell_size)
}

/// Save a rendered map, choosing the encoder from the file extension
pub fn save_map(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .map_err(|e| AnalysisError::render(format!("Failed to save map: {}", path.display()), e))?;
    debug!("Saved grid map to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::grid::analyze_grid;

    #[test]
    fn test_empty_cells_is_identity() {
        let grid = PixelGrid::from_fn(9, 7, |x, y| [x as u8, y as u8, 3]);
        let map = MapAnnotator::default().annotate(&grid, &[], 4);
        assert_eq!(&map, grid.as_rgb_image());
    }

    #[test]
    fn test_outline_drawn_on_cell_border() {
        let grid = PixelGrid::solid(80, 80, [0, 0, 128]);
        let cells = analyze_grid(&grid, 40);
        assert_eq!(cells.len(), 4);

        let map = MapAnnotator::default().annotate(&grid, &cells, 40);
        assert_eq!(map.dimensions(), (80, 80));
        // Outer and inner outline rings of the second cell
        assert_eq!(map.get_pixel(40, 10).0, OUTLINE_COLOR);
        assert_eq!(map.get_pixel(41, 10).0, OUTLINE_COLOR);
        assert_eq!(map.get_pixel(79, 79).0, OUTLINE_COLOR);
        // Interior away from outline and label stays untouched
        assert_eq!(map.get_pixel(45, 5).0, [0, 0, 128]);
    }

    #[test]
    fn test_label_drawn_near_center() {
        let grid = PixelGrid::solid(100, 100, [60, 60, 60]);
        let cells = analyze_grid(&grid, 100);
        let style = AnnotationStyle {
            label_scale: Some(2),
            ..AnnotationStyle::default()
        };
        let map = annotate_map(&grid, &cells, 100, &style);

        let (mut label, mut shadow) = (0, 0);
        for (x, y, px) in map.enumerate_pixels() {
            if px.0 == LABEL_COLOR {
                label += 1;
                assert!((25..75).contains(&x) && (25..75).contains(&y));
            } else if px.0 == SHADOW_COLOR {
                shadow += 1;
            }
        }
        assert!(label > 0);
        assert!(shadow > 0);
    }

    #[test]
    fn test_box_sizes_clamped_to_image() {
        let grid = PixelGrid::solid(10, 10, [0, 0, 0]);
        let cell = GridCell {
            x: 8,
            y: 8,
            mean: [0.0; 3],
            std: [0.0; 3],
        };
        let style = AnnotationStyle {
            outline_thickness: 1,
            ..AnnotationStyle::default()
        };
        let map = annotate_map(&grid, &[cell], 5, &style);
        assert_eq!(map.get_pixel(9, 9).0, OUTLINE_COLOR);

        let outside = GridCell { x: 20, ..cell };
        let untouched = annotate_map(&grid, &[outside], 5, &style);
        assert_eq!(&untouched, grid.as_rgb_image());
    }

    #[test]
    fn test_annotate_missing_file_is_render_error() {
        let err = MapAnnotator::default()
            .annotate_file(Path::new("no/such/base.png"), &[], 10)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::RenderError { .. }));
    }
}
