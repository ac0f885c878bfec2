//! Write Ring
//!
//! Circular byte buffer of `blocks * block_size` bytes holding appended
//! bytes until the background writer persists them.
//!
//! ## Invariants
//! - `pending == (head - tail) mod capacity`, `0 <= pending <= capacity`
//! - `tail` is always a multiple of `block_size`, so the block at `tail`
//!   never straddles the wrap point
//!
//! The ring does no locking of its own; the log handle guards it.

use crate::error::Result;

use super::AlignedBuf;

/// Fixed-capacity circular buffer drained in whole blocks
#[derive(Debug)]
pub struct WriteRing {
    buf: AlignedBuf,
    block_size: usize,
    head: usize,
    tail: usize,
    pending: usize,
}

impl WriteRing {
    /// Allocate a ring of `blocks` blocks, aligned to `block_size`.
    pub fn new(block_size: usize, blocks: usize) -> Result<Self> {
        let buf = AlignedBuf::zeroed(block_size * blocks, block_size)?;
        Ok(Self {
            buf,
            block_size,
            head: 0,
            tail: 0,
            pending: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Bytes buffered and not yet persisted
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn free(&self) -> usize {
        self.capacity() - self.pending
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn tail(&self) -> usize {
        self.tail
    }

    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }

    pub fn is_full(&self) -> bool {
        self.pending == self.capacity()
    }

    /// Whether a whole block is ready for the writer
    pub fn has_block(&self) -> bool {
        self.pending >= self.block_size
    }

    /// Copy as much of `data` as fits at `head`. Returns the bytes taken.
    pub fn push(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.free());
        if n == 0 {
            return 0;
        }

        let cap = self.capacity();
        let first = n.min(cap - self.head);
        self.buf[self.head..self.head + first].copy_from_slice(&data[..first]);
        if first < n {
            self.buf[..n - first].copy_from_slice(&data[first..n]);
        }

        self.head = (self.head + n) % cap;
        self.pending += n;
        n
    }

    /// The block at `tail`. Only meaningful when `has_block()`.
    pub fn front_block(&self) -> &[u8] {
        &self.buf[self.tail..self.tail + self.block_size]
    }

    /// Release the block at `tail` after it reached the device.
    pub fn consume_block(&mut self) {
        debug_assert!(self.has_block());
        self.tail = (self.tail + self.block_size) % self.capacity();
        self.pending -= self.block_size;
    }

    /// Zero-fill from `head` to the next block boundary and count the fill
    /// as pending, so the writer sees a whole block. Returns the pad length
    /// (zero when `head` is already aligned).
    pub fn pad_to_block(&mut self) -> usize {
        let partial = self.head % self.block_size;
        if partial == 0 {
            return 0;
        }

        let pad = self.block_size - partial;
        self.buf[self.head..self.head + pad].fill(0);
        self.head = (self.head + pad) % self.capacity();
        self.pending += pad;
        pad
    }

    /// Undo `pad_to_block` once the ring has drained: `head` steps back over
    /// the padding, and the now-persisted partial block becomes pending again
    /// so later appends keep filling it.
    pub fn rewind_padding(&mut self, pad: usize) {
        debug_assert!(self.is_empty());
        debug_assert!(pad > 0 && pad < self.block_size);

        let cap = self.capacity();
        self.head = (self.head + cap - pad) % cap;
        let partial = self.head % self.block_size;
        self.tail = self.head - partial;
        self.pending = partial;
    }
}
