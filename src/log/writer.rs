//! Background writer
//!
//! Drains whole blocks from the ring to the device, strictly in order.
//! Runs from `BlockLog::open` until `close` joins it, or until the first
//! device write error.

use std::sync::Arc;

use crate::device::BlockDevice;

use super::state::{Shared, WriteFailure};

/// Writer thread body
pub(crate) fn run<D: BlockDevice>(shared: &Shared<D>) {
    let block_size = shared.block_size as u64;
    let mut state = shared.state.lock();

    tracing::debug!("Writer started (block_size={})", block_size);

    loop {
        while !state.ring.has_block() && !state.shutdown {
            shared.data_available.wait(&mut state);
        }

        // Shutdown with no whole block left
        if !state.ring.has_block() {
            break;
        }

        let offset = state.logical_offset;
        let block_id = offset / block_size;

        // A cached copy of this block is about to go stale
        if state.cache.invalidate(block_id) {
            tracing::trace!("Invalidated cached block {}", block_id);
        }

        let written = shared.device.write(state.ring.front_block(), offset);
        if let Err(e) = written {
            tracing::error!("Device write failed at offset {}: {}", offset, e);
            state.failure = Some(WriteFailure {
                offset,
                source: Arc::new(e),
            });
            shared.space_available.notify_all();
            shared.drained.notify_all();
            break;
        }

        state.ring.consume_block();
        state.logical_offset += block_size;
        state.blocks_written += 1;
        tracing::trace!("Persisted block {} (pending={})", block_id, state.ring.pending());

        shared.space_available.notify_all();
        if state.ring.is_empty() {
            shared.drained.notify_all();
        }
    }

    tracing::debug!(
        "Writer exiting (logical_offset={}, blocks_written={})",
        state.logical_offset,
        state.blocks_written
    );
}
