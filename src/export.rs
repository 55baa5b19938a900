//! Tabular export of region and grid statistics
//!
//! Region exports hold a summary block (`Statistic,R,G,B` with mean, median
//! and standard deviation rows), a blank separator row and then the full
//! unique-color table. Grid exports hold one row per cell and come with the
//! rendered grid map saved as a PNG next to the table.
//!
//! Only delimited text is compiled in. Asking for a spreadsheet returns
//! `ExportDependencyError`; the `*_with_fallback` entry points recover from
//! that by writing CSV instead.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use log::{info, warn};

use crate::analysis::grid::GridCell;
use crate::color::region::RegionStats;
use crate::constants::export::{CSV_EXTENSION, MAP_SUFFIX};
use crate::error::{AnalysisError, Result};
use crate::pixels::PixelGrid;
use crate::render::annotate::{save_map, AnnotationStyle, MapAnnotator};

/// Grid table header
pub const GRID_HEADER: [&str; 10] = [
    "X",
    "Y",
    "MeanR",
    "MeanG",
    "MeanB",
    "NormR(G=1)",
    "NormB(G=1)",
    "StdR",
    "StdG",
    "StdB",
];

/// Output table format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated text
    Csv,
    /// Office spreadsheet (`.xlsx`)
    Spreadsheet,
}

impl ExportFormat {
    /// Pick the format from the destination extension, CSV by default
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("xlsx") | Some("xls") => ExportFormat::Spreadsheet,
            _ => ExportFormat::Csv,
        }
    }

    fn ensure_available(&self) -> Result<()> {
        match self {
            ExportFormat::Csv => Ok(()),
            ExportFormat::Spreadsheet => Err(AnalysisError::ExportDependencyError {
                format: "spreadsheet".to_string(),
                hint: "Save as .csv instead; it opens in any spreadsheet application.".to_string(),
            }),
        }
    }
}

/// Files written by a grid export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridExport {
    pub table: PathBuf,
    pub map: PathBuf,
}

fn csv_err(e: csv::Error) -> AnalysisError {
    AnalysisError::export("Failed to write CSV record", e)
}

fn create(path: &Path) -> Result<File> {
    File::create(path)
        .map_err(|e| AnalysisError::export(format!("Failed to create {}", path.display()), e))
}

/// Write the summary and unique-color tables of `stats`
pub fn write_region_csv<W: Write>(writer: W, stats: &RegionStats) -> Result<()> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);

    wtr.write_record(["Statistic", "R", "G", "B"]).map_err(csv_err)?;
    let rows = [
        ("Mean", stats.rgb.means()),
        ("Median", stats.rgb.medians()),
        ("StdDev", stats.rgb.stds()),
    ];
    for (label, values) in rows {
        let mut record = vec![label.to_string()];
        record.extend(values.iter().map(f64::to_string));
        wtr.write_record(&record).map_err(csv_err)?;
    }
    // A zero-field record still serializes as `""`, so the blank line goes
    // straight to the underlying writer.
    let mut inner = wtr.into_inner().map_err(|e| {
        AnalysisError::export("Failed to write table separator", e.into_error())
    })?;
    inner
        .write_all(b"\n")
        .map_err(|e| AnalysisError::export("Failed to write table separator", e))?;
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(inner);

    wtr.write_record(["R", "G", "B", "Count"]).map_err(csv_err)?;
    for entry in &stats.unique_colors {
        let [r, g, b] = entry.color;
        wtr.write_record([r.to_string(), g.to_string(), b.to_string(), entry.count.to_string()])
            .map_err(csv_err)?;
    }

    wtr.flush()
        .map_err(|e| AnalysisError::export("Failed to flush CSV output", e))
}

/// Write one row per grid cell in scan order
pub fn write_grid_csv<W: Write>(writer: W, cells: &[GridCell]) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(GRID_HEADER).map_err(csv_err)?;

    for cell in cells {
        let norm = cell.normalized();
        let record = [
            cell.x.to_string(),
            cell.y.to_string(),
            cell.mean[0].to_string(),
            cell.mean[1].to_string(),
            cell.mean[2].to_string(),
            norm.r.to_string(),
            norm.b.to_string(),
            cell.std[0].to_string(),
            cell.std[1].to_string(),
            cell.std[2].to_string(),
        ];
        wtr.write_record(&record).map_err(csv_err)?;
    }

    wtr.flush()
        .map_err(|e| AnalysisError::export("Failed to flush CSV output", e))
}

/// Path of the grid map image belonging to table `path`
pub fn map_path_for(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("grid");
    path.with_file_name(format!("{}{}.png", stem, MAP_SUFFIX))
}

/// Export region statistics to `path` in `format`
pub fn export_region(path: &Path, stats: &RegionStats, format: ExportFormat) -> Result<PathBuf> {
    format.ensure_available()?;
    write_region_csv(create(path)?, stats)?;
    info!("Exported region statistics to {}", path.display());
    Ok(path.to_path_buf())
}

/// Export grid statistics and the annotated map next to `path`
pub fn export_grid(
    path: &Path,
    grid: &PixelGrid,
    cells: &[GridCell],
    cell_size: i32,
    style: &AnnotationStyle,
    format: ExportFormat,
) -> Result<GridExport> {
    format.ensure_available()?;

    // Map first so a render failure never leaves an orphaned table
    let map = map_path_for(path);
    let image = MapAnnotator::new(style.clone()).annotate(grid, cells, cell_size);
    save_map(&image, &map)?;

    write_grid_csv(create(path)?, cells)?;

    info!(
        "Exported {} grid cells to {} with map {}",
        cells.len(),
        path.display(),
        map.display()
    );
    Ok(GridExport {
        table: path.to_path_buf(),
        map,
    })
}

fn csv_fallback(path: &Path, err: &AnalysisError) -> PathBuf {
    let fallback = path.with_extension(CSV_EXTENSION);
    warn!("{}; writing {} instead", err, fallback.display());
    fallback
}

/// Export region statistics, falling back to CSV if the format is unavailable
pub fn export_region_with_fallback(path: &Path, stats: &RegionStats) -> Result<PathBuf> {
    match export_region(path, stats, ExportFormat::from_path(path)) {
        Err(err @ AnalysisError::ExportDependencyError { .. }) => {
            export_region(&csv_fallback(path, &err), stats, ExportFormat::Csv)
        }
        other => other,
    }
}

/// Export grid statistics, falling back to CSV if the format is unavailable
pub fn export_grid_with_fallback(
    path: &Path,
    grid: &PixelGrid,
    cells: &[GridCell],
    cell_size: i32,
    style: &AnnotationStyle,
) -> Result<GridExport> {
    match export_grid(path, grid, cells, cell_size, style, ExportFormat::from_path(path)) {
        Err(err @ AnalysisError::ExportDependencyError { .. }) => export_grid(
            &csv_fallback(path, &err),
            grid,
            cells,
            cell_size,
            style,
            ExportFormat::Csv,
        ),
        other => other,
    }
}
