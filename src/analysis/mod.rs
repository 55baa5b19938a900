//! Line and grid sampling over a whole image

pub mod grid;
pub mod line_profile;

pub use grid::{analyze_grid, GridAnalyzer, GridCell};
pub use line_profile::{profile_line, LineProfile};
