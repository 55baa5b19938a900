//! Grid map rendering

pub mod annotate;
pub mod glyphs;

pub use annotate::{annotate_map, save_map, AnnotationStyle, MapAnnotator};
