//! File-backed block device
//!
//! Uses positional reads and writes so a shared `&self` is enough.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};

use crate::config::validate_block_size;
use crate::error::{BlockLogError, Result};

use super::{check_aligned, BlockDevice};

/// Block device over a regular file or device node
#[derive(Debug)]
pub struct FileDevice {
    file: File,
    path: PathBuf,
    block_size: usize,
}

impl FileDevice {
    /// Open (creating if needed) the file at `path`.
    ///
    /// Existing contents are not truncated; the log overwrites them from
    /// offset zero.
    pub fn open(path: &Path, block_size: usize) -> Result<Self> {
        validate_block_size(block_size)?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| BlockLogError::DeviceOpen {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!("Opened file device {} (block_size={})", path.display(), block_size);

        Ok(Self {
            file,
            path: path.to_path_buf(),
            block_size,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlockDevice for FileDevice {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn read(&self, dst: &mut [u8], offset: u64) -> io::Result<()> {
        check_aligned(self.block_size, offset, dst.len())?;
        self.file.read_exact_at(dst, offset)
    }

    fn write(&self, src: &[u8], offset: u64) -> io::Result<()> {
        check_aligned(self.block_size, offset, src.len())?;
        self.file.write_all_at(src, offset)
    }

    fn sync(&self) -> io::Result<()> {
        self.file.sync_data()
    }
}
