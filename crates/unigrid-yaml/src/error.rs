//! Error types for scene and layout configuration.

use std::path::PathBuf;

use thiserror::Error;
use unigrid_layout::LayoutError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing or serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The scene file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A value was out of range or malformed
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },

    /// A box index past the end of the scene
    #[error("No box at index {index} (scene has {len})")]
    NoSuchBox {
        /// Requested index
        index: usize,
        /// Number of boxes
        len: usize,
    },

    /// The layout rejected a value, e.g. a negative inset
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
