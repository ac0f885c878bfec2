//! Block Device Module
//!
//! The fixed-size block I/O primitive the log sits on.
//!
//! ## Contract
//! - `block_size()` is a positive power of two, constant for the device's life
//! - `read`/`write` offsets and lengths are multiples of `block_size()`
//! - Buffers handed to the device are aligned to `block_size()`
//! - Dropping the device releases it
//!
//! ## Implementations
//! - `FileDevice`: positional I/O on a regular file (or raw device node)
//! - `MemDevice`: in-memory, with write tracing and fault injection

mod file;
mod memory;

use std::io;
use std::sync::Arc;

pub use file::FileDevice;
pub use memory::MemDevice;

/// Block-addressed I/O interface.
pub trait BlockDevice: Send + Sync {
    /// Device block size in bytes.
    fn block_size(&self) -> usize;

    /// Read `dst.len()` bytes starting at byte `offset`.
    fn read(&self, dst: &mut [u8], offset: u64) -> io::Result<()>;

    /// Write all of `src` starting at byte `offset`.
    fn write(&self, src: &[u8], offset: u64) -> io::Result<()>;

    /// Flush pending writes to stable storage.
    fn sync(&self) -> io::Result<()> {
        Ok(())
    }
}

impl<D: BlockDevice + ?Sized> BlockDevice for Arc<D> {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn read(&self, dst: &mut [u8], offset: u64) -> io::Result<()> {
        (**self).read(dst, offset)
    }

    fn write(&self, src: &[u8], offset: u64) -> io::Result<()> {
        (**self).write(src, offset)
    }

    fn sync(&self) -> io::Result<()> {
        (**self).sync()
    }
}

/// Reject requests that break the alignment contract.
pub(crate) fn check_aligned(block_size: usize, offset: u64, len: usize) -> io::Result<()> {
    if offset % block_size as u64 != 0 || len % block_size != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("misaligned block request: offset={offset} len={len} block_size={block_size}"),
        ));
    }
    Ok(())
}
