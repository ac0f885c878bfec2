//! Shared log state
//!
//! Everything the caller threads and the background writer both touch,
//! behind one lock and three condition variables.

use std::io;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::buffer::WriteRing;
use crate::cache::ReadCache;
use crate::device::BlockDevice;
use crate::error::{BlockLogError, Result};
use crate::stats::LogStats;

/// State shared between a `BlockLog` and its writer thread
pub(crate) struct Shared<D> {
    pub(crate) device: D,
    pub(crate) block_size: usize,
    pub(crate) state: Mutex<State>,

    /// Raised when the writer frees a block, or a flush finishes
    pub(crate) space_available: Condvar,

    /// Raised when bytes are appended or padded, or on shutdown
    pub(crate) data_available: Condvar,

    /// Raised when the ring empties, a flush finishes, or the writer fails
    pub(crate) drained: Condvar,
}

impl<D: BlockDevice> Shared<D> {
    pub(crate) fn new(device: D, ring: WriteRing, cache: ReadCache) -> Self {
        Self {
            block_size: ring.block_size(),
            device,
            state: Mutex::new(State {
                ring,
                cache,
                logical_offset: 0,
                appended: 0,
                shutdown: false,
                flushing: false,
                failure: None,
                blocks_written: 0,
                flushes: 0,
                padded_flushes: 0,
            }),
            space_available: Condvar::new(),
            data_available: Condvar::new(),
            drained: Condvar::new(),
        }
    }
}

/// Lock-protected part of the log
pub(crate) struct State {
    pub(crate) ring: WriteRing,
    pub(crate) cache: ReadCache,

    /// Device offset of the block at the ring's tail
    pub(crate) logical_offset: u64,

    /// Bytes ever accepted by `append`
    pub(crate) appended: u64,

    pub(crate) shutdown: bool,

    /// A flush barrier owns the ring's head; appends and other flushes wait
    pub(crate) flushing: bool,

    /// Set once by the writer; every later call fails with it
    pub(crate) failure: Option<WriteFailure>,

    pub(crate) blocks_written: u64,
    pub(crate) flushes: u64,
    pub(crate) padded_flushes: u64,
}

impl State {
    /// Fail with the recorded writer error, if any.
    pub(crate) fn check(&self) -> Result<()> {
        match &self.failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    pub(crate) fn stats(&self) -> LogStats {
        LogStats {
            bytes_appended: self.appended,
            blocks_written: self.blocks_written,
            flushes: self.flushes,
            padded_flushes: self.padded_flushes,
            cache_hits: self.cache.hits(),
            cache_misses: self.cache.misses(),
        }
    }
}

/// Device write error recorded by the writer thread
#[derive(Debug, Clone)]
pub(crate) struct WriteFailure {
    pub(crate) offset: u64,
    pub(crate) source: Arc<io::Error>,
}

impl WriteFailure {
    pub(crate) fn to_error(&self) -> BlockLogError {
        BlockLogError::DeviceWrite {
            offset: self.offset,
            source: Arc::clone(&self.source),
        }
    }
}
