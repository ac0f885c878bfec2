//! Error types for blocklog
//!
//! Provides a unified error type for all operations.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Result type alias using BlockLogError
pub type Result<T> = std::result::Result<T, BlockLogError>;

/// Unified error type for blocklog operations
#[derive(Debug, Error)]
pub enum BlockLogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // -------------------------------------------------------------------------
    // Device Errors
    // -------------------------------------------------------------------------
    #[error("Failed to open device {}: {source}", .path.display())]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Device read failed at offset {offset}: {source}")]
    DeviceRead {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// Raised by the background writer and kept on the handle, so every
    /// later call reports the same failure.
    #[error("Device write failed at offset {offset}: {source}")]
    DeviceWrite {
        offset: u64,
        #[source]
        source: Arc<io::Error>,
    },

    // -------------------------------------------------------------------------
    // Resource Errors
    // -------------------------------------------------------------------------
    #[error("Allocation of {size} bytes aligned to {align} failed")]
    Allocation { size: usize, align: usize },

    #[error("Failed to start writer thread: {0}")]
    ThreadStart(#[source] io::Error),

    #[error("Writer thread panicked")]
    WriterPanicked,

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("Read of {len} bytes at offset {offset} exceeds appended length {appended}")]
    OutOfRange { offset: u64, len: usize, appended: u64 },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
