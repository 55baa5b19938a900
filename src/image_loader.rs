//! Unified image loading with support for multiple formats
//!
//! This module provides a single entry point for decoding raster files into
//! a [`PixelGrid`]. Decoding is delegated to the `image` crate; whatever the
//! source layout (grayscale, RGBA, 16-bit) the result is always 8-bit
//! 3-channel RGB. Grayscale is expanded and alpha is dropped.
//!
//! ## Supported Formats
//!
//! Whatever the `image` crate recognizes from the file extension and has a
//! decoder compiled in for: JPEG, PNG, GIF (first frame), WebP, TIFF, BMP and
//! the other default codecs.

use crate::error::{AnalysisError, Result};
use crate::pixels::PixelGrid;
use image::{DynamicImage, ImageReader};
use log::debug;
use std::path::Path;

/// Check if a file extension names a format the decoder can read
pub fn is_supported_extension(ext: &str) -> bool {
    image::ImageFormat::from_extension(ext).is_some_and(|format| format.reading_enabled())
}

/// Load an image from disk and convert it to an RGB [`PixelGrid`]
///
/// # Errors
///
/// Returns `AnalysisError::UnsupportedFormat` for an unknown extension and
/// `AnalysisError::ImageLoadError` if the file cannot be opened or decoded.
///
/// # Example
///
/// ```rust,no_run
/// use rgb_analyzer::image_loader::load_image;
/// use std::path::Path;
///
/// let grid = load_image(Path::new("photo.png"))?;
/// println!("Loaded image: {}x{}", grid.width(), grid.height());
/// # Ok::<(), rgb_analyzer::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<PixelGrid> {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(is_supported_extension);
    if !supported {
        return Err(AnalysisError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let reader = ImageReader::open(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let img: DynamicImage = reader.decode().map_err(|e| {
        AnalysisError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    let grid = PixelGrid::from_rgb_image(img.to_rgb8());
    debug!(
        "Decoded {} ({}x{})",
        path.display(),
        grid.width(),
        grid.height()
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("jpg"));
        assert!(is_supported_extension("PNG"));
        assert!(is_supported_extension("tif"));
        assert!(is_supported_extension("JPEG"));
        assert!(is_supported_extension("bmp"));
        assert!(!is_supported_extension("heic"));
        assert!(!is_supported_extension("doc"));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load_image(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, AnalysisError::ImageLoadError { .. }));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = load_image(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedFormat { .. }));
        let err = load_image(Path::new("noext")).unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_grayscale_expanded_to_rgb() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(2, 2, Luma([77])).save(&path).unwrap();

        let grid = load_image(&path).unwrap();
        assert_eq!(grid.pixel(1, 1), [77, 77, 77]);
    }

    #[test]
    fn test_alpha_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rgba.png");
        RgbaImage::from_pixel(3, 1, Rgba([10, 20, 30, 0])).save(&path).unwrap();

        let grid = load_image(&path).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 1));
        assert_eq!(grid.pixel(2, 0), [10, 20, 30]);
    }

    #[test]
    fn test_uppercase_extension_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("SHOUT.PNG");
        GrayImage::from_pixel(1, 1, Luma([5])).save_with_format(&path, image::ImageFormat::Png).unwrap();
        assert_eq!(load_image(&path).unwrap().pixel(0, 0), [5, 5, 5]);
    }
}
