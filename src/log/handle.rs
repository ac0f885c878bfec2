//! BlockLog handle
//!
//! Public open / append / read / flush / close over a block device.

use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use bytes::{Bytes, BytesMut};

use crate::buffer::WriteRing;
use crate::cache::ReadCache;
use crate::config::{validate_block_size, Config};
use crate::device::{BlockDevice, FileDevice};
use crate::error::{BlockLogError, Result};
use crate::stats::LogStats;

use super::state::Shared;
use super::writer;

/// A write-behind log over one block device
///
/// ## Concurrency Model
///
/// - **Appends** copy into the write ring under the handle lock and return
///   once buffered. A full ring, or a flush in progress, suspends the caller.
/// - **Reads** run the flush barrier first, then serve each block from the
///   read cache or the device, holding the lock per block.
/// - **One writer thread** per handle persists whole blocks in order.
///
/// Reads may come from many threads; appends are meant to form a single
/// logical stream.
///
/// A device write error stops the writer and is returned by every later
/// call on the handle.
pub struct BlockLog<D: BlockDevice + 'static = FileDevice> {
    shared: Arc<Shared<D>>,
    writer: Option<JoinHandle<()>>,
}

impl BlockLog<FileDevice> {
    /// Open a log on the file named by `config.device_path`
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        let device = FileDevice::open(&config.device_path, config.block_size)?;
        Self::with_device(device, &config)
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified device path
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().device_path(path.as_ref()).build();
        Self::open(config)
    }
}

impl<D: BlockDevice + 'static> BlockLog<D> {
    /// Open a log over an already opened device
    ///
    /// On open:
    /// 1. Read the device block size
    /// 2. Allocate the aligned write ring and cache lines
    /// 3. Start the background writer
    pub fn with_device(device: D, config: &Config) -> Result<Self> {
        config.validate()?;

        let block_size = device.block_size();
        validate_block_size(block_size)?;

        let ring = WriteRing::new(block_size, config.write_buffer_blocks)?;
        let cache = ReadCache::new(block_size, config.read_cache_lines)?;
        let shared = Arc::new(Shared::new(device, ring, cache));

        let writer = {
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name(config.writer_thread_name.clone())
                .spawn(move || writer::run(&shared))
                .map_err(BlockLogError::ThreadStart)?
        };

        tracing::debug!(
            "Opened log (block_size={}, buffer={} blocks, cache={} lines)",
            block_size,
            config.write_buffer_blocks,
            config.read_cache_lines
        );

        Ok(Self {
            shared,
            writer: Some(writer),
        })
    }

    /// Append bytes to the end of the log
    ///
    /// Returns once every byte is buffered; persistence happens in the
    /// background. Blocks while the write ring is full.
    pub fn append(&self, data: &[u8]) -> Result<()> {
        let shared = &*self.shared;
        let mut state = shared.state.lock();
        state.check()?;

        let mut copied = 0;
        while copied < data.len() {
            while state.ring.is_full() || state.flushing {
                shared.space_available.wait(&mut state);
                state.check()?;
            }

            let n = state.ring.push(&data[copied..]);
            copied += n;
            state.appended += n as u64;
            shared.data_available.notify_one();
        }

        Ok(())
    }

    /// Read `buf.len()` bytes starting at log offset `offset`
    ///
    /// Sees every byte appended before the call, persisted or not. The
    /// range must lie within what has been appended.
    pub fn read(&self, buf: &mut [u8], offset: u64) -> Result<()> {
        let len = buf.len();
        let appended = self.shared.barrier()?;

        let end = offset
            .checked_add(len as u64)
            .filter(|&end| end <= appended)
            .ok_or(BlockLogError::OutOfRange {
                offset,
                len,
                appended,
            })?;

        let block_size = self.shared.block_size;
        let device = &self.shared.device;
        let mut pos = offset;
        let mut copied = 0;

        while pos < end {
            let block_id = pos / block_size as u64;
            let block_offset = block_id * block_size as u64;
            let within = (pos - block_offset) as usize;
            let n = (block_size - within).min(len - copied);

            let mut state = self.shared.state.lock();
            let data = state
                .cache
                .load(block_id, |dst| device.read(dst, block_offset))
                .map_err(|source| {
                    tracing::warn!("Device read failed at offset {}: {}", block_offset, source);
                    BlockLogError::DeviceRead {
                        offset: block_offset,
                        source,
                    }
                })?;
            buf[copied..copied + n].copy_from_slice(&data[within..within + n]);

            copied += n;
            pos += n as u64;
        }

        Ok(())
    }

    /// Read `len` bytes at `offset` into a fresh buffer
    pub fn read_bytes(&self, offset: u64, len: usize) -> Result<Bytes> {
        let mut buf = BytesMut::zeroed(len);
        self.read(&mut buf, offset)?;
        Ok(buf.freeze())
    }

    /// Push every buffered byte to the device and sync it
    pub fn flush(&self) -> Result<()> {
        self.shared.barrier()?;
        self.shared.device.sync()?;
        Ok(())
    }

    /// Close the log gracefully
    ///
    /// Flushes, stops the writer, syncs the device and releases the
    /// buffers. Resources are released even when an error is returned.
    pub fn close(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        let Some(writer) = self.writer.take() else {
            return Ok(());
        };

        let flushed = self.shared.barrier();

        self.shared.state.lock().shutdown = true;
        self.shared.data_available.notify_one();

        let joined = writer.join().map_err(|_| BlockLogError::WriterPanicked);
        let synced = self.shared.device.sync();

        let stats = self.stats();
        tracing::info!(
            "Closed log: {} bytes appended, {} blocks written, {} flushes",
            stats.bytes_appended,
            stats.blocks_written,
            stats.flushes
        );

        flushed?;
        joined?;
        synced?;
        self.shared.state.lock().check()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Device block size
    pub fn block_size(&self) -> usize {
        self.shared.block_size
    }

    /// Write ring capacity in bytes
    pub fn capacity(&self) -> usize {
        self.shared.state.lock().ring.capacity()
    }

    /// Number of read cache lines
    pub fn cache_lines(&self) -> usize {
        self.shared.state.lock().cache.len()
    }

    /// Total bytes appended
    pub fn appended(&self) -> u64 {
        self.shared.state.lock().appended
    }

    /// Device offset the writer will persist next
    pub fn persisted_offset(&self) -> u64 {
        self.shared.state.lock().logical_offset
    }

    /// Bytes buffered and not yet persisted
    pub fn pending(&self) -> usize {
        self.shared.state.lock().ring.pending()
    }

    /// Whether a block is currently cached
    pub fn is_cached(&self, block_id: u64) -> bool {
        self.shared.state.lock().cache.contains(block_id)
    }

    /// The recorded writer failure, if the writer has stopped on one
    pub fn health(&self) -> Result<()> {
        self.shared.state.lock().check()
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> LogStats {
        self.shared.state.lock().stats()
    }

    /// The underlying device
    pub fn device(&self) -> &D {
        &self.shared.device
    }
}

impl<D: BlockDevice + 'static> Drop for BlockLog<D> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            tracing::warn!("Error while closing dropped log: {}", e);
        }
    }
}
