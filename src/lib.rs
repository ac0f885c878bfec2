//! # blocklog
//!
//! A write-behind, log-structured storage layer over a raw block device:
//! - Sequential append, acknowledged once buffered in memory
//! - Point reads with read-your-writes consistency
//! - Background persistence of whole blocks, strictly in order
//! - Direct-mapped read cache kept coherent with the writer
//! - Explicit close that guarantees durability
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        BlockLog                              │
//! │          append / read / flush / close (callers)             │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │ append                           │ read
//!            ▼                                  ▼
//!   ┌─────────────────┐   flush barrier   ┌─────────────┐
//!   │   Write Ring    │◄──────────────────│ Read Cache  │
//!   │ (32 blocks)     │                   │ (256 lines) │
//!   └────────┬────────┘                   └──────┬──────┘
//!            │ whole blocks                      │ misses
//!            ▼                                   │
//!   ┌─────────────────┐   invalidate             │
//!   │ Writer Thread   │──────────────────────────┤
//!   └────────┬────────┘                          │
//!            ▼                                   ▼
//!   ┌─────────────────────────────────────────────────────────┐
//!   │                     Block Device                         │
//!   └─────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod device;
pub mod buffer;
pub mod cache;
pub mod log;
pub mod stats;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BlockLogError, Result};
pub use config::Config;
pub use device::{BlockDevice, FileDevice, MemDevice};
pub use log::BlockLog;
pub use stats::LogStats;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of blocklog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
