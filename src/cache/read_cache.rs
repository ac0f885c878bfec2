//! Direct-mapped read cache
//!
//! Block `id` always lives in slot `id % lines`. Two ids that alias evict
//! each other; there is no replacement policy beyond that.

use std::io;

use crate::error::Result;

use super::CacheLine;

/// Direct-mapped cache of device blocks
#[derive(Debug)]
pub struct ReadCache {
    lines: Vec<CacheLine>,
    block_size: usize,
    hits: u64,
    misses: u64,
}

impl ReadCache {
    /// Allocate `lines` invalid cache lines of `block_size` bytes each.
    pub fn new(block_size: usize, lines: usize) -> Result<Self> {
        let lines = (0..lines)
            .map(|_| CacheLine::new(block_size))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            lines,
            block_size,
            hits: 0,
            misses: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Slot index for a block id
    pub fn slot(&self, block_id: u64) -> usize {
        (block_id % self.lines.len() as u64) as usize
    }

    pub fn line(&self, slot: usize) -> &CacheLine {
        &self.lines[slot]
    }

    /// Whether `block_id` is currently cached
    pub fn contains(&self, block_id: u64) -> bool {
        self.lines[self.slot(block_id)].holds(block_id)
    }

    /// Drop `block_id` from the cache if its slot carries that tag.
    /// Returns whether a valid entry was discarded.
    pub fn invalidate(&mut self, block_id: u64) -> bool {
        let slot = self.slot(block_id);
        let line = &mut self.lines[slot];
        if line.tag() != block_id {
            return false;
        }
        let was_valid = line.is_valid();
        line.invalidate();
        was_valid
    }

    /// Return the cached bytes of `block_id`, filling the slot through
    /// `fill` on a miss. A failed fill leaves the slot invalid.
    pub fn load<F>(&mut self, block_id: u64, fill: F) -> io::Result<&[u8]>
    where
        F: FnOnce(&mut [u8]) -> io::Result<()>,
    {
        let slot = self.slot(block_id);
        let line = &mut self.lines[slot];

        if line.holds(block_id) {
            self.hits += 1;
        } else {
            self.misses += 1;
            line.invalidate();
            fill(line.data_mut())?;
            line.set(block_id);
        }

        Ok(line.data())
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
