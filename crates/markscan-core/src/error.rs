//! Error types for markscan

use thiserror::Error;

/// Main error type for markscan operations
#[derive(Error, Debug)]
pub enum MarkscanError {
    /// IO error while reading input or configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A window whose bounds do not fit its data
    #[error("Invalid window: {start}..{end} over {len} bytes")]
    Window {
        /// Requested start offset
        start: usize,
        /// Requested end offset
        end: usize,
        /// Length of the underlying data
        len: usize,
    },

    /// Invalid command input (e.g. a delimiter argument that is not one byte)
    #[error("Input error: {0}")]
    Input(String),
}

/// Result type alias for markscan operations
pub type Result<T> = std::result::Result<T, MarkscanError>;
