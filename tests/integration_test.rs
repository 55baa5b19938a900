//! Integration tests for the load -> sample -> export workflow
//!
//! These tests write small synthetic images into a temporary directory and
//! validate:
//! - Image loading and error handling for missing or unsupported files
//! - Region, line and grid statistics on decoded images
//! - CSV export, spreadsheet fallback and grid map output
//! - Session caching across repeated selections

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use rgb_analyzer::export::{
    export_grid_with_fallback, export_region_with_fallback, map_path_for, GRID_HEADER,
};
use rgb_analyzer::{
    analyze_grid, compare_regions, compute_region_stats, load_image, profile_line, AnalysisError,
    AnnotationStyle, ColorSpaceSelection, LineSegment, MapAnnotator, SelectionRect, Session,
};
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Left half red, right half blue
fn write_red_blue(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_load_missing_file() {
    init_logging();
    let err = load_image(Path::new("nonexistent_file.png")).unwrap_err();
    assert!(matches!(err, AnalysisError::ImageLoadError { .. }));
}

#[test]
fn test_load_empty_path() {
    assert!(load_image(Path::new("")).is_err());
}

#[test]
fn test_load_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    fs::write(&path, b"this is not a png").unwrap();

    let err = load_image(&path).unwrap_err();
    assert!(matches!(err, AnalysisError::ImageLoadError { .. }));
    assert!(!err.user_message().is_empty());
}

#[test]
fn test_load_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, b"hello").unwrap();
    assert!(matches!(
        load_image(&path).unwrap_err(),
        AnalysisError::UnsupportedFormat { .. }
    ));
}

// ============================================================================
// Statistics on decoded images
// ============================================================================

#[test]
fn test_white_png_region() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("white.png");
    RgbImage::from_pixel(4, 4, Rgb([255, 255, 255])).save(&path).unwrap();

    let grid = load_image(&path).unwrap();
    let stats = compute_region_stats(&grid, SelectionRect::new(0, 0, 4, 4), ColorSpaceSelection::all())
        .unwrap();

    assert_eq!(stats.pixel_count, 16);
    assert_eq!(stats.rgb.means(), [255.0; 3]);
    assert_eq!(stats.rgb.medians(), [255.0; 3]);
    assert_eq!(stats.rgb.stds(), [0.0; 3]);
    assert_eq!(stats.unique_colors.len(), 1);
    assert_eq!(stats.unique_colors[0].color, [255, 255, 255]);
    assert_eq!(stats.unique_colors[0].count, 16);
    assert_eq!(stats.histograms.red.bins()[255], 16);
    assert_eq!(stats.command_string(), "R,B 1.00,1.00");
}

#[test]
fn test_region_outside_image() {
    let dir = TempDir::new().unwrap();
    let grid = load_image(&write_red_blue(dir.path(), "rb.png", 8, 4)).unwrap();
    assert!(compute_region_stats(&grid, SelectionRect::new(8, 0, 4, 4), ColorSpaceSelection::rgb_only())
        .is_none());
    assert!(compute_region_stats(&grid, SelectionRect::new(-4, -4, 4, 4), ColorSpaceSelection::rgb_only())
        .is_none());
}

#[test]
fn test_grid_on_red_blue_png() {
    let dir = TempDir::new().unwrap();
    let grid = load_image(&write_red_blue(dir.path(), "rb.png", 8, 4)).unwrap();

    let cells = analyze_grid(&grid, 4);
    assert_eq!(cells.len(), 2);
    assert_eq!((cells[0].x, cells[0].y), (0, 0));
    assert_eq!(cells[0].mean, [255.0, 0.0, 0.0]);
    assert_eq!((cells[1].x, cells[1].y), (4, 0));
    assert_eq!(cells[1].mean, [0.0, 0.0, 255.0]);
}

#[test]
fn test_grid_drops_remainder() {
    let dir = TempDir::new().unwrap();
    let grid = load_image(&write_red_blue(dir.path(), "rb.png", 10, 10)).unwrap();
    assert_eq!(analyze_grid(&grid, 4).len(), 4);
}

#[test]
fn test_line_across_boundary() {
    let dir = TempDir::new().unwrap();
    let grid = load_image(&write_red_blue(dir.path(), "rb.png", 20, 4)).unwrap();

    let profile = profile_line(&grid, LineSegment::new(0, 1, 19, 1)).unwrap();
    assert_eq!(profile.len(), 19);
    assert_eq!(profile.red[0], 255);
    assert_eq!(profile.blue[0], 0);
    assert_eq!(*profile.red.last().unwrap(), 0);
    assert_eq!(*profile.blue.last().unwrap(), 255);
}

#[test]
fn test_compare_loaded_images() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("base.png");
    let overlay = dir.path().join("overlay.png");
    RgbImage::from_pixel(6, 6, Rgb([100, 100, 100])).save(&base).unwrap();
    RgbImage::from_pixel(6, 6, Rgb([100, 120, 100])).save(&overlay).unwrap();

    let cmp = compare_regions(
        &load_image(&base).unwrap(),
        &load_image(&overlay).unwrap(),
        SelectionRect::new(0, 0, 6, 6),
        ColorSpaceSelection::rgb_only(),
    )
    .unwrap();
    assert_eq!(cmp.delta.rgb.mean_deltas(), [0.0, 20.0, 0.0]);
    assert!(cmp.delta.norm_r < 0.0);
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_region_csv_export() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let grid = load_image(&write_red_blue(dir.path(), "rb.png", 8, 4)).unwrap();
    let stats = compute_region_stats(&grid, SelectionRect::new(0, 0, 8, 4), ColorSpaceSelection::rgb_only())
        .unwrap();

    let out = dir.path().join("stats.csv");
    let written = export_region_with_fallback(&out, &stats).unwrap();
    assert_eq!(written, out);

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Statistic,R,G,B");
    assert_eq!(lines[1], "Mean,127.5,0,127.5");
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "R,G,B,Count");
    assert_eq!(lines[6], "255,0,0,16");
    assert_eq!(lines[7], "0,0,255,16");
}

#[test]
fn test_spreadsheet_request_falls_back_to_csv() {
    let dir = TempDir::new().unwrap();
    let grid = load_image(&write_red_blue(dir.path(), "rb.png", 8, 4)).unwrap();
    let stats = compute_region_stats(&grid, SelectionRect::new(0, 0, 8, 4), ColorSpaceSelection::rgb_only())
        .unwrap();

    let requested = dir.path().join("stats.xlsx");
    let written = export_region_with_fallback(&requested, &stats).unwrap();
    assert_eq!(written, dir.path().join("stats.csv"));
    assert!(written.exists());
    assert!(!requested.exists());
}

#[test]
fn test_grid_export_writes_table_and_map() {
    let dir = TempDir::new().unwrap();
    let grid = load_image(&write_red_blue(dir.path(), "rb.png", 80, 40)).unwrap();
    let cells = analyze_grid(&grid, 40);

    let out = dir.path().join("cells.csv");
    let written =
        export_grid_with_fallback(&out, &grid, &cells, 40, &AnnotationStyle::default()).unwrap();
    assert_eq!(written.table, out);
    assert_eq!(written.map, map_path_for(&out));

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], GRID_HEADER.join(","));
    assert!(lines[1].starts_with("0,0,255,0,0,"));
    assert!(lines[2].starts_with("40,0,0,0,255,"));

    let map = load_image(&written.map).unwrap();
    assert_eq!((map.width(), map.height()), (80, 40));
    // Left edge of the blue cell carries the outline
    assert_eq!(map.pixel(40, 20), AnnotationStyle::default().outline);
}

#[test]
fn test_grid_export_map_failure_leaves_no_table() {
    let dir = TempDir::new().unwrap();
    let grid = load_image(&write_red_blue(dir.path(), "rb.png", 8, 4)).unwrap();
    let cells = analyze_grid(&grid, 4);

    let out = dir.path().join("cells.csv");
    // A directory squatting on the map path makes the PNG write fail
    fs::create_dir(map_path_for(&out)).unwrap();

    let result = export_grid_with_fallback(&out, &grid, &cells, 4, &AnnotationStyle::default());
    assert!(matches!(result, Err(AnalysisError::RenderError { .. })));
    assert!(!out.exists());
}

#[test]
fn test_annotate_reloads_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_red_blue(dir.path(), "rb.png", 8, 8);
    let annotator = MapAnnotator::default();

    let unchanged = annotator.annotate_file(&path, &[], 4).unwrap();
    assert_eq!(unchanged.get_pixel(0, 0).0, [255, 0, 0]);

    let missing = annotator.annotate_file(&dir.path().join("gone.png"), &[], 4);
    assert!(matches!(missing, Err(AnalysisError::RenderError { .. })));
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_session_open_and_memoize() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = write_red_blue(dir.path(), "rb.png", 8, 4);

    let mut session = Session::new(ColorSpaceSelection::rgb_only());
    session.open(&path).unwrap();
    assert_eq!(session.image_path(), Some(path.as_path()));

    let rect = SelectionRect::new(0, 0, 4, 4);
    assert_eq!(session.region_stats(rect).unwrap().rgb.means(), [255.0, 0.0, 0.0]);
    assert_eq!(session.region_stats(rect).unwrap().pixel_count, 16);
    assert_eq!(session.computations(), 1);
}
