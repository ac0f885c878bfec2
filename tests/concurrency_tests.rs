//! Concurrency tests for BlockLog
//!
//! These tests verify:
//! - Readers running alongside a single appender see a consistent prefix
//! - Concurrent flushes do not disturb the append cursor
//! - Back-pressure with a tiny ring does not deadlock

use std::sync::Arc;

use blocklog::{BlockLog, Config, MemDevice};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_log(block_size: usize, buffer_blocks: usize, cache_lines: usize) -> BlockLog<Arc<MemDevice>> {
    let device = Arc::new(MemDevice::new(block_size));
    let config = Config::builder()
        .write_buffer_blocks(buffer_blocks)
        .read_cache_lines(cache_lines)
        .build();
    BlockLog::with_device(device, &config).unwrap()
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 253) as u8).collect()
}

// =============================================================================
// Reader / Appender Tests
// =============================================================================

#[test]
fn test_readers_alongside_appender() {
    let log = setup_log(64, 4, 8);
    let data = pattern(10_000);

    crossbeam::scope(|s| {
        s.spawn(|_| {
            for chunk in data.chunks(50) {
                log.append(chunk).unwrap();
            }
        });

        for _ in 0..4 {
            s.spawn(|_| {
                for _ in 0..200 {
                    let appended = log.appended() as usize;
                    let start = appended.saturating_sub(300);
                    let bytes = log.read_bytes(start as u64, appended - start).unwrap();
                    assert_eq!(&bytes[..], &data[start..appended]);
                }
            });
        }
    })
    .unwrap();

    assert_eq!(log.appended(), 10_000);
    let bytes = log.read_bytes(0, 10_000).unwrap();
    assert_eq!(&bytes[..], &data[..]);
    log.close().unwrap();
}

#[test]
fn test_concurrent_flushes_keep_cursor() {
    let log = setup_log(64, 4, 4);
    let data = pattern(5_000);

    crossbeam::scope(|s| {
        s.spawn(|_| {
            for chunk in data.chunks(13) {
                log.append(chunk).unwrap();
            }
        });

        for _ in 0..3 {
            s.spawn(|_| {
                for _ in 0..100 {
                    log.flush().unwrap();
                }
            });
        }
    })
    .unwrap();

    log.flush().unwrap();
    assert_eq!(log.appended(), 5_000);
    assert_eq!(log.persisted_offset() + log.pending() as u64, 5_000);

    let bytes = log.read_bytes(0, 5_000).unwrap();
    assert_eq!(&bytes[..], &data[..]);
}

#[test]
fn test_tiny_ring_backpressure() {
    let log = setup_log(16, 1, 2);
    let data = pattern(4_096);

    crossbeam::scope(|s| {
        s.spawn(|_| log.append(&data).unwrap());
    })
    .unwrap();

    assert_eq!(&log.read_bytes(0, 4_096).unwrap()[..], &data[..]);
}
