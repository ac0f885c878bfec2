//! Cache line
//!
//! One block-sized, block-aligned slot of the read cache.

use crate::buffer::AlignedBuf;
use crate::error::Result;

/// A single direct-mapped slot
#[derive(Debug)]
pub struct CacheLine {
    valid: bool,
    /// Block id owning the slot; meaningless while `valid` is false
    tag: u64,
    data: AlignedBuf,
}

impl CacheLine {
    pub(crate) fn new(block_size: usize) -> Result<Self> {
        Ok(Self {
            valid: false,
            tag: 0,
            data: AlignedBuf::zeroed(block_size, block_size)?,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn tag(&self) -> u64 {
        self.tag
    }

    /// Valid and owned by `block_id`
    pub fn holds(&self, block_id: u64) -> bool {
        self.valid && self.tag == block_id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub(crate) fn set(&mut self, block_id: u64) {
        self.tag = block_id;
        self.valid = true;
    }

    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
    }
}
