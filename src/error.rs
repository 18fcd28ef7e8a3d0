//! Centralized error handling for metrics-overlay

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for overlay operations
#[derive(Debug, Error)]
pub enum OverlayError {
    /// I/O errors (file reading, command execution)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Pseudo-file content was not ASCII
    #[error("Encoding error: {} is not ASCII", .0.display())]
    Encoding(PathBuf),
    /// Filesystem access is not available on this platform
    #[error("Unavailable: {}", .0.display())]
    Unavailable(PathBuf),
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
    /// Malformed config file
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Device detection errors
    #[error("Detection error: {0}")]
    Detection(String),
    /// The external performance-level service refused or failed a call
    #[error("Performance level error: {0}")]
    PerformanceLevel(String),
}

/// Type alias for Results in metrics-overlay
pub type Result<T> = std::result::Result<T, OverlayError>;
