//! blocklog CLI
//!
//! Drives a log over a file-backed device from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use blocklog::{BlockLog, Config, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// blocklog CLI
#[derive(Parser, Debug)]
#[command(name = "blocklog-cli")]
#[command(about = "Write-behind block log over a file or raw device")]
#[command(version)]
struct Args {
    /// Device file (created if missing)
    #[arg(short, long, default_value = "./blocklog.dev")]
    device: PathBuf,

    /// Device block size in bytes
    #[arg(short, long, default_value = "4096")]
    block_size: usize,

    /// Write buffer capacity in blocks
    #[arg(long, default_value = "32")]
    buffer_blocks: usize,

    /// Number of read cache lines
    #[arg(long, default_value = "256")]
    cache_lines: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Append the contents of a file to a fresh log
    Write {
        /// File to append
        input: PathBuf,
    },

    /// Append a file, read it back and compare checksums
    Verify {
        /// File to append and verify
        input: PathBuf,
    },

    /// Append a generated byte pattern
    Fill {
        /// Total bytes to append
        #[arg(short, long, default_value = "1048576")]
        len: usize,

        /// Bytes per append call
        #[arg(short, long, default_value = "1000")]
        chunk: usize,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,blocklog=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("blocklog v{}", blocklog::VERSION);
    tracing::info!("Device: {}", args.device.display());

    let config = Config::builder()
        .device_path(&args.device)
        .block_size(args.block_size)
        .write_buffer_blocks(args.buffer_blocks)
        .read_cache_lines(args.cache_lines)
        .build();

    let result = match args.command {
        Commands::Write { input } => write(config, &input),
        Commands::Verify { input } => verify(config, &input),
        Commands::Fill { len, chunk } => fill(config, len, chunk),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn write(config: Config, input: &Path) -> Result<()> {
    let data = fs::read(input)?;
    let log = BlockLog::open(config)?;
    log.append(&data)?;

    let stats = log.stats();
    log.close()?;

    println!("appended {} bytes", stats.bytes_appended);
    Ok(())
}

fn verify(config: Config, input: &Path) -> Result<()> {
    let data = fs::read(input)?;
    let log = BlockLog::open(config)?;
    log.append(&data)?;

    let read_back = log.read_bytes(0, data.len())?;
    let expected = crc32fast::hash(&data);
    let actual = crc32fast::hash(&read_back);

    let stats = log.stats();
    log.close()?;

    println!("crc32 appended={expected:08x} read={actual:08x}");
    println!(
        "blocks written={} cache hits={} misses={}",
        stats.blocks_written, stats.cache_hits, stats.cache_misses
    );

    if expected != actual {
        tracing::error!("Read-back mismatch for {}", input.display());
        std::process::exit(2);
    }
    Ok(())
}

fn fill(config: Config, len: usize, chunk: usize) -> Result<()> {
    let chunk = chunk.max(1);
    let log = BlockLog::open(config)?;

    let mut buf = vec![0u8; chunk];
    let mut done = 0;
    while done < len {
        let n = chunk.min(len - done);
        for (i, byte) in buf[..n].iter_mut().enumerate() {
            *byte = ((done + i) % 251) as u8;
        }
        log.append(&buf[..n])?;
        done += n;
    }

    log.flush()?;
    let stats = log.stats();
    log.close()?;

    println!(
        "appended {} bytes in {} blocks",
        stats.bytes_appended, stats.blocks_written
    );
    Ok(())
}
