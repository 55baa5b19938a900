//! Command-line interface for rgb_analyzer
//!
//! Prints results as JSON on stdout and a short human summary on stderr.
//!
//! ```text
//! cargo run --example cli -- region photo.png --rect 10,10,50,50 --lab
//! cargo run --example cli -- grid photo.png --cell 64 --csv cells.csv
//! ```

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;

use rgb_analyzer::export::{export_grid_with_fallback, export_region_with_fallback};
use rgb_analyzer::render::save_map;
use rgb_analyzer::{
    analyze_grid, compare_regions, compute_region_stats, load_image, profile_line, AnalysisError,
    AnalyzerConfig, LineSegment, MapAnnotator, RegionStats, Result, SelectionRect,
};

#[derive(Parser, Debug)]
#[command(name = "rgb-analyzer", about = "Sample color statistics from raster images")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Statistics of a rectangular region
    Region {
        image: PathBuf,
        /// Selection as x,y,w,h
        #[arg(long)]
        rect: SelectionRect,
        /// Also report HSV
        #[arg(long)]
        hsv: bool,
        /// Also report Lab
        #[arg(long)]
        lab: bool,
        /// Export the summary and color table
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Channel values sampled along a line
    Line {
        image: PathBuf,
        /// Segment as x1,y1,x2,y2
        #[arg(long)]
        line: LineSegment,
    },
    /// Statistics of every full grid cell
    Grid {
        image: PathBuf,
        /// Cell size in pixels (default from config)
        #[arg(long)]
        cell: Option<i32>,
        /// Export the cell table and grid map
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Save only the annotated grid map
        #[arg(long)]
        map: Option<PathBuf>,
    },
    /// Delta between the same region on two images
    Compare {
        base: PathBuf,
        overlay: PathBuf,
        /// Selection as x,y,w,h
        #[arg(long)]
        rect: SelectionRect,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("Analysis failed: {}", error);
        eprintln!("{}", error.user_message());
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AnalyzerConfig::from_json_file(path)?,
        None => AnalyzerConfig::default(),
    };

    match cli.command {
        Command::Region {
            image,
            rect,
            hsv,
            lab,
            csv,
        } => {
            let grid = load_image(&image)?;
            let mut spaces = config.color_spaces;
            spaces.hsv |= hsv;
            spaces.lab |= lab;

            let Some(stats) = compute_region_stats(&grid, rect, spaces) else {
                eprintln!("Selection {:?} does not overlap the image", rect);
                return Ok(());
            };
            print_json(&stats)?;
            print_region_summary(&stats, config.display.max_table_rows);

            if let Some(path) = csv {
                let written = export_region_with_fallback(&path, &stats)?;
                eprintln!("Saved {}", written.display());
            }
        }
        Command::Line { image, line } => {
            let grid = load_image(&image)?;
            match profile_line(&grid, line) {
                Some(profile) => {
                    print_json(&profile)?;
                    eprintln!("{} samples along {:?}", profile.len(), line);
                }
                None => eprintln!("Line {:?} has zero length", line),
            }
        }
        Command::Grid {
            image,
            cell,
            csv,
            map,
        } => {
            let grid = load_image(&image)?;
            let cell_size = cell.unwrap_or(config.grid.cell_size);
            let cells = analyze_grid(&grid, cell_size);
            print_json(&cells)?;
            eprintln!("{} full cells of {}px", cells.len(), cell_size);

            if let Some(path) = csv {
                let written =
                    export_grid_with_fallback(&path, &grid, &cells, cell_size, &config.annotation)?;
                eprintln!("Saved {} and {}", written.table.display(), written.map.display());
            }
            if let Some(path) = map {
                save_standalone_map(&image, &path, &cells, cell_size, &config)?;
            }
        }
        Command::Compare {
            base,
            overlay,
            rect,
        } => {
            let base_grid = load_image(&base)?;
            let overlay_grid = load_image(&overlay)?;
            match compare_regions(&base_grid, &overlay_grid, rect, config.color_spaces) {
                Some(cmp) => {
                    print_json(&cmp)?;
                    let [dr, dg, db] = cmp.delta.rgb.mean_deltas();
                    eprintln!("Mean delta: R={:+.2}, G={:+.2}, B={:+.2}", dr, dg, db);
                    eprintln!(
                        "Normalized delta: R={:+.4}, B={:+.4}",
                        cmp.delta.norm_r, cmp.delta.norm_b
                    );
                }
                None => eprintln!("Selection {:?} is empty on one of the images", rect),
            }
        }
    }
    Ok(())
}

fn save_standalone_map(
    image: &Path,
    out: &Path,
    cells: &[rgb_analyzer::GridCell],
    cell_size: i32,
    config: &AnalyzerConfig,
) -> Result<()> {
    let annotator = MapAnnotator::new(config.annotation.clone());
    let rendered = annotator.annotate_file(image, cells, cell_size)?;
    save_map(&rendered, out)?;
    eprintln!("Saved {}", out.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AnalysisError::export("Failed to serialize result", e))?;
    println!("{}", json);
    Ok(())
}

fn print_region_summary(stats: &RegionStats, max_rows: usize) {
    let [r, g, b] = stats.rgb.means();
    let [mr, mg, mb] = stats.rgb.medians();
    let [sr, sg, sb] = stats.rgb.stds();
    let norm = stats.normalized();

    eprintln!();
    eprintln!("Region Summary:");
    eprintln!("  Mean RGB:   R={:.1}, G={:.1}, B={:.1}", r, g, b);
    eprintln!("  Median:     R={:.1}, G={:.1}, B={:.1}", mr, mg, mb);
    eprintln!("  StdDev:     R={:.2}, G={:.2}, B={:.2}", sr, sg, sb);
    eprintln!(
        "  Normalized: R={:.4}, G={:.4}, B={:.4}",
        norm.r, norm.g, norm.b
    );
    eprintln!("  Command:    {}", stats.command_string());
    eprintln!("  Pixels:     {}", stats.pixel_count);
    eprintln!("  Unique:     {}", stats.unique_colors.len());

    let (rows, truncated) = stats.top_colors(max_rows.min(5));
    for entry in rows {
        let [cr, cg, cb] = entry.color;
        eprintln!("    ({:3}, {:3}, {:3})  x{}", cr, cg, cb, entry.count);
    }
    if truncated {
        eprintln!(
            "    ... showing top {} of {} colors",
            rows.len(),
            stats.unique_colors.len()
        );
    }
}
