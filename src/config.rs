//! Configuration for the rgb_analyzer front ends.
//!
//! The statistics functions themselves take plain arguments; this structure
//! bundles the choices an interactive or command-line caller makes once and
//! reuses: which color spaces to report, the grid cell size, how many
//! unique-color rows to show and how the grid map is drawn.
//!
//! ```no_run
//! use rgb_analyzer::AnalyzerConfig;
//! use std::path::Path;
//!
//! let config = AnalyzerConfig::from_json_file(Path::new("analyzer.json"))?;
//! # Ok::<(), rgb_analyzer::AnalysisError>(())
//! ```
//!
//! Every field is optional in the JSON file; missing values take their
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::conversion::ColorSpaceSelection;
use crate::constants::defaults::{GRID_CELL_SIZE, MAX_TABLE_ROWS};
use crate::error::{AnalysisError, Result};
use crate::render::annotate::AnnotationStyle;

/// Complete analyzer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Optional color spaces reported next to RGB
    pub color_spaces: ColorSpaceSelection,

    /// Grid analysis settings
    pub grid: GridConfig,

    /// Result table display limits
    pub display: DisplayConfig,

    /// Grid map drawing style
    pub annotation: AnnotationStyle,
}

/// Grid analysis parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cell side length in pixels
    pub cell_size: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: GRID_CELL_SIZE,
        }
    }
}

/// Display limits for result tables.
///
/// Large crops can contain hundreds of thousands of distinct colors; the
/// front end shows only the most frequent rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub max_table_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_table_rows: MAX_TABLE_ROWS,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read {}", path.display()), e)
        })?;
        serde_json::from_str(&content)
            .map_err(|e| AnalysisError::config(format!("Failed to parse {}", path.display()), e))
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("Failed to write {}", path.display()), e)
        })
    }
}
