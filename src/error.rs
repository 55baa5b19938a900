//! Error types for the rgb_analyzer library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rgb_analyzer operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for image sampling, rendering and export operations.
///
/// Empty or out-of-bounds selections are not errors: the statistics
/// routines report them as `None`.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image file could not be opened or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File extension is not a known raster format
    #[error("Unsupported image format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Annotated map image could not be produced or saved
    #[error("Render error: {message}")]
    RenderError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Requested export format needs a writer that is not compiled in
    #[error("Export format {format} unavailable: {hint}")]
    ExportDependencyError { format: String, hint: String },

    /// Writing an export table failed
    #[error("Export failed: {message}")]
    ExportError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a render error with context
    pub fn render<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::RenderError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an export error with context
    pub fn export<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ExportError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// A missing spreadsheet writer can always be worked around with a
    /// delimited-text export.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalysisError::ExportDependencyError { .. })
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageLoadError { .. } | AnalysisError::UnsupportedFormat { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            AnalysisError::RenderError { .. } => {
                "Could not create the annotated grid map.".to_string()
            }
            AnalysisError::ExportDependencyError { hint, .. } => {
                format!("Spreadsheet export is unavailable. {}", hint)
            }
            AnalysisError::ExportError { .. } => {
                "Could not save the file. Please check the destination and try again.".to_string()
            }
            AnalysisError::ConfigError { .. } => {
                "Could not read the configuration file.".to_string()
            }
            AnalysisError::InvalidParameter { parameter, value } => {
                format!("Invalid value '{}' for {}.", value, parameter)
            }
        }
    }
}
