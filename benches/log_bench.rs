//! Benchmarks for blocklog append and read paths

use std::sync::Arc;

use blocklog::{BlockLog, Config, MemDevice};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

const BLOCK_SIZE: usize = 4096;

fn open_log() -> BlockLog<Arc<MemDevice>> {
    let device = Arc::new(MemDevice::new(BLOCK_SIZE));
    BlockLog::with_device(device, &Config::default()).unwrap()
}

fn append_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    for chunk in [64usize, 1024, 16 * 1024] {
        let data = vec![0x5Au8; chunk];
        let total = 4 * 1024 * 1024;
        group.throughput(Throughput::Bytes(total as u64));
        group.bench_function(format!("sequential_{chunk}b"), |b| {
            b.iter_batched(
                open_log,
                |log| {
                    for _ in 0..total / chunk {
                        log.append(black_box(&data)).unwrap();
                    }
                    log.close().unwrap();
                },
                BatchSize::PerIteration,
            )
        });
    }

    group.finish();
}

fn read_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    let log = open_log();
    log.append(&vec![0xA5u8; 512 * BLOCK_SIZE]).unwrap();
    log.flush().unwrap();

    let mut buf = vec![0u8; 512];
    group.throughput(Throughput::Bytes(buf.len() as u64));

    // Stays inside one cached block
    group.bench_function("cached_block", |b| {
        b.iter(|| log.read(black_box(&mut buf), black_box(100)).unwrap())
    });

    // Walks blocks that alias in the cache
    let mut block = 0u64;
    group.bench_function("aliasing_blocks", |b| {
        b.iter(|| {
            block = (block + 256) % 512;
            log.read(&mut buf, block * BLOCK_SIZE as u64).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, append_benchmarks, read_benchmarks);
criterion_main!(benches);
