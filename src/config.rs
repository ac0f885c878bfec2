//! Configuration for blocklog
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{BlockLogError, Result};

/// Main configuration for a blocklog handle
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Configuration
    // -------------------------------------------------------------------------
    /// Path of the file backing the device (only used by `BlockLog::open`)
    pub device_path: PathBuf,

    /// Block size in bytes for file-backed devices. Must be a power of two.
    pub block_size: usize,

    // -------------------------------------------------------------------------
    // Write Buffer Configuration
    // -------------------------------------------------------------------------
    /// Capacity of the write ring, in blocks
    pub write_buffer_blocks: usize,

    /// Name given to the background writer thread
    pub writer_thread_name: String,

    // -------------------------------------------------------------------------
    // Read Cache Configuration
    // -------------------------------------------------------------------------
    /// Number of direct-mapped cache lines
    pub read_cache_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_path: PathBuf::from("./blocklog.dev"),
            block_size: 4096,
            write_buffer_blocks: 32,
            writer_thread_name: "blocklog-writer".to_string(),
            read_cache_lines: 256,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the buffer and cache sizing. `block_size` is checked when a
    /// file device is opened, since other devices report their own.
    pub fn validate(&self) -> Result<()> {
        if self.write_buffer_blocks == 0 {
            return Err(BlockLogError::Config(
                "write_buffer_blocks must be at least 1".to_string(),
            ));
        }
        if self.read_cache_lines == 0 {
            return Err(BlockLogError::Config(
                "read_cache_lines must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Block sizes double as allocation alignments, so they must be powers of two.
pub(crate) fn validate_block_size(block_size: usize) -> Result<()> {
    if block_size == 0 || !block_size.is_power_of_two() {
        return Err(BlockLogError::Config(format!(
            "invalid block_size={block_size} (must be a power of two)"
        )));
    }
    Ok(())
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the path of the backing file
    pub fn device_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.device_path = path.into();
        self
    }

    /// Set the block size used for file-backed devices
    pub fn block_size(mut self, size: usize) -> Self {
        self.config.block_size = size;
        self
    }

    /// Set the write ring capacity (in blocks)
    pub fn write_buffer_blocks(mut self, blocks: usize) -> Self {
        self.config.write_buffer_blocks = blocks;
        self
    }

    /// Set the number of read cache lines
    pub fn read_cache_lines(mut self, lines: usize) -> Self {
        self.config.read_cache_lines = lines;
        self
    }

    /// Set the writer thread name
    pub fn writer_thread_name(mut self, name: impl Into<String>) -> Self {
        self.config.writer_thread_name = name.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
