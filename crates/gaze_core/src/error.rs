//! Error types for calibration persistence.

use thiserror::Error;

/// Errors raised while saving or loading calibration records.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Resolution mismatch: record is {found_width}x{found_height}, expected {expected_width}x{expected_height}")]
    ResolutionMismatch {
        found_width: u32,
        found_height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("Calibration file not found: {path}")]
    FileNotFound { path: String },
}

impl StoreError {
    /// Whether the caller can recover by recalibrating for the current screen.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoreError::FileNotFound { .. } | StoreError::ResolutionMismatch { .. }
        )
    }
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
