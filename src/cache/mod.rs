//! Read Cache Module
//!
//! Keeps recently read device blocks in memory.
//!
//! ## Responsibilities
//! - Serve repeated reads of the same block without touching the device
//! - Drop entries the background writer is about to overwrite
//!
//! ## Data Structure Choice
//! A fixed array of block-aligned lines, indexed by `block_id % lines`.
//! Lines are allocated once and reused for the life of the log.

mod line;
mod read_cache;

pub use line::CacheLine;
pub use read_cache::ReadCache;
