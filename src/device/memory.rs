//! In-memory block device
//!
//! Grows on write. Keeps a trace of write offsets and read counts, and can
//! be told to fail, which is what the test suite and benchmarks lean on.

use std::io;

use parking_lot::Mutex;

use super::{check_aligned, BlockDevice};

/// Block device backed by a `Vec<u8>`
#[derive(Debug)]
pub struct MemDevice {
    block_size: usize,
    inner: Mutex<MemInner>,
}

#[derive(Debug, Default)]
struct MemInner {
    data: Vec<u8>,
    /// Offset of every successful write, in order
    writes: Vec<u64>,
    reads: u64,
    /// Remaining writes allowed before every write fails
    write_budget: Option<usize>,
    fail_reads: bool,
}

impl MemDevice {
    /// Create an empty device. `block_size` must be a power of two.
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            inner: Mutex::new(MemInner::default()),
        }
    }

    /// Let `count` more writes succeed, then fail all of them.
    pub fn fail_writes_after(&self, count: usize) {
        self.inner.lock().write_budget = Some(count);
    }

    /// Make every read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().fail_reads = fail;
    }

    /// Copy of everything written so far
    pub fn contents(&self) -> Vec<u8> {
        self.inner.lock().data.clone()
    }

    /// Offsets of all successful writes, in the order they happened
    pub fn write_offsets(&self) -> Vec<u64> {
        self.inner.lock().writes.clone()
    }

    /// Number of successful writes
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes.len()
    }

    /// Number of successful reads
    pub fn read_count(&self) -> u64 {
        self.inner.lock().reads
    }
}

impl BlockDevice for MemDevice {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn read(&self, dst: &mut [u8], offset: u64) -> io::Result<()> {
        check_aligned(self.block_size, offset, dst.len())?;
        let mut inner = self.inner.lock();
        if inner.fail_reads {
            return Err(io::Error::new(io::ErrorKind::Other, "injected read failure"));
        }

        let start = offset as usize;
        let end = start + dst.len();
        if end > inner.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("read past end: end={end} len={}", inner.data.len()),
            ));
        }
        dst.copy_from_slice(&inner.data[start..end]);
        inner.reads += 1;
        Ok(())
    }

    fn write(&self, src: &[u8], offset: u64) -> io::Result<()> {
        check_aligned(self.block_size, offset, src.len())?;
        let mut inner = self.inner.lock();
        if let Some(left) = inner.write_budget.as_mut() {
            if *left == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "injected write failure"));
            }
            *left -= 1;
        }

        let start = offset as usize;
        let end = start + src.len();
        if end > inner.data.len() {
            inner.data.resize(end, 0);
        }
        inner.data[start..end].copy_from_slice(src);
        inner.writes.push(offset);
        Ok(())
    }
}
