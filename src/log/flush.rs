//! Flush barrier
//!
//! Pushes every buffered byte, including a trailing partial block, to the
//! device without moving the append cursor.
//!
//! ## Protocol
//! 1. Wait for any running flush to finish
//! 2. Zero-pad the ring up to the next block boundary
//! 3. Wake the writer and wait until the ring drains
//! 4. Step the ring and `logical_offset` back over the padded block, so
//!    the next appends keep filling it and the writer rewrites it in place

use crate::device::BlockDevice;
use crate::error::Result;

use super::state::{Shared, State};

impl<D: BlockDevice> Shared<D> {
    /// Run the barrier. Returns the number of bytes appended as of its
    /// completion, all of which are then readable from the device.
    pub(crate) fn barrier(&self) -> Result<u64> {
        let mut state = self.state.lock();
        state.check()?;

        while state.flushing {
            self.drained.wait(&mut state);
            state.check()?;
        }

        if state.ring.is_empty() {
            return Ok(state.appended);
        }

        state.flushing = true;
        let pad = state.ring.pad_to_block();
        self.data_available.notify_one();

        while !state.ring.is_empty() && state.failure.is_none() {
            self.drained.wait(&mut state);
        }

        if let Err(e) = state.check() {
            self.end_flush(&mut state);
            return Err(e);
        }

        if pad > 0 {
            state.ring.rewind_padding(pad);
            state.logical_offset -= self.block_size as u64;
            state.padded_flushes += 1;
        }
        state.flushes += 1;
        debug_assert_eq!(
            state.logical_offset + state.ring.pending() as u64,
            state.appended
        );

        tracing::debug!(
            "Flushed (appended={}, pad={}, logical_offset={})",
            state.appended,
            pad,
            state.logical_offset
        );

        self.end_flush(&mut state);
        Ok(state.appended)
    }

    fn end_flush(&self, state: &mut State) {
        state.flushing = false;
        self.space_available.notify_all();
        self.drained.notify_all();
    }
}
