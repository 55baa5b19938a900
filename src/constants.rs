//! Fixed values shared by the statistics, rendering and export modules

/// Histogram and quantization parameters
pub mod bins {
    /// One bin per 8-bit channel value
    pub const HISTOGRAM_BINS: usize = 256;

    /// Largest representable channel value in every color space
    pub const CHANNEL_MAX: u8 = 255;

    /// Hue range in degrees before rescaling onto the 8-bit channel scale
    pub const HUE_DEGREES: f32 = 360.0;

    /// Offset applied to CIE a*/b* when quantizing to 8 bits
    pub const LAB_AB_OFFSET: f32 = 128.0;

    /// CIE L* upper bound
    pub const LAB_L_MAX: f32 = 100.0;
}

/// Defaults used by the interactive collaborator
pub mod defaults {
    /// Grid cell side length in pixels
    pub const GRID_CELL_SIZE: i32 = 100;

    /// Maximum unique-color rows shown in a results table
    pub const MAX_TABLE_ROWS: usize = 10_000;

    /// Longest line segment accepted from text input, in pixels
    pub const MAX_LINE_LENGTH: f64 = 1_000_000.0;
}

/// Map annotation drawing parameters
pub mod drawing {
    /// Outline color of grid cells
    pub const OUTLINE_COLOR: [u8; 3] = [255, 0, 0];

    /// Outline thickness in pixels
    pub const OUTLINE_THICKNESS: u32 = 2;

    /// Label text color
    pub const LABEL_COLOR: [u8; 3] = [255, 255, 255];

    /// Label drop-shadow color
    pub const SHADOW_COLOR: [u8; 3] = [0, 0, 0];

    /// Cell size covered by one unit of label scale
    pub const PIXELS_PER_LABEL_SCALE: u32 = 40;

    /// Blank rows between the two label lines, in glyph pixels
    pub const LINE_GAP: u32 = 2;
}

/// File naming used by the exporter
pub mod export {
    /// Suffix appended to the table stem for the rendered grid map
    pub const MAP_SUFFIX: &str = "_map";

    /// Extension used for delimited-text output
    pub const CSV_EXTENSION: &str = "csv";
}
