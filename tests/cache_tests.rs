//! Tests for the direct-mapped read cache
//!
//! These tests verify:
//! - Miss then hit on the same block
//! - Aliasing block ids evict each other
//! - Invalidation only touches the owning tag
//! - A failed fill leaves the slot invalid

use std::cell::Cell;
use std::io;

use blocklog::cache::ReadCache;

// =============================================================================
// Helper Functions
// =============================================================================

fn fill_with(value: u8, calls: &Cell<usize>) -> impl FnOnce(&mut [u8]) -> io::Result<()> + '_ {
    move |dst| {
        calls.set(calls.get() + 1);
        dst.fill(value);
        Ok(())
    }
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_new_cache_is_invalid() {
    let cache = ReadCache::new(64, 4).unwrap();

    assert_eq!(cache.len(), 4);
    assert_eq!(cache.block_size(), 64);
    for slot in 0..4 {
        assert!(!cache.line(slot).is_valid());
        assert_eq!(cache.line(slot).data().as_ptr() as usize % 64, 0);
    }
}

#[test]
fn test_miss_then_hit() {
    let mut cache = ReadCache::new(64, 4).unwrap();
    let calls = Cell::new(0);

    let data = cache.load(1, fill_with(0xAB, &calls)).unwrap();
    assert_eq!(data, &[0xAB; 64][..]);

    let data = cache.load(1, fill_with(0xCD, &calls)).unwrap();
    assert_eq!(data, &[0xAB; 64][..]);

    assert_eq!(calls.get(), 1);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 1);
    assert!(cache.contains(1));
    assert_eq!(cache.line(1).tag(), 1);
}

#[test]
fn test_aliasing_blocks_evict_each_other() {
    let mut cache = ReadCache::new(64, 4).unwrap();
    let calls = Cell::new(0);

    assert_eq!(cache.slot(1), cache.slot(5));

    cache.load(1, fill_with(1, &calls)).unwrap();
    cache.load(5, fill_with(5, &calls)).unwrap();
    assert!(!cache.contains(1));
    assert!(cache.contains(5));

    // Block 1 must come from a fresh fill, not the slot's previous tenant
    let data = cache.load(1, fill_with(11, &calls)).unwrap();
    assert_eq!(data[0], 11);
    assert_eq!(calls.get(), 3);
    assert_eq!(cache.misses(), 3);
}

// =============================================================================
// Invalidation Tests
// =============================================================================

#[test]
fn test_invalidate_matches_tag() {
    let mut cache = ReadCache::new(64, 4).unwrap();
    let calls = Cell::new(0);

    cache.load(2, fill_with(2, &calls)).unwrap();

    // Same slot, different owner
    assert!(!cache.invalidate(6));
    assert!(cache.contains(2));

    assert!(cache.invalidate(2));
    assert!(!cache.contains(2));
    assert!(!cache.invalidate(2));

    cache.load(2, fill_with(2, &calls)).unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_failed_fill_leaves_slot_invalid() {
    let mut cache = ReadCache::new(64, 4).unwrap();
    let calls = Cell::new(0);

    cache.load(7, fill_with(7, &calls)).unwrap();
    assert!(cache.contains(7));

    let result = cache.load(3, |_dst| Err(io::Error::new(io::ErrorKind::Other, "boom")));
    assert!(result.is_err());

    assert!(!cache.line(cache.slot(3)).is_valid());
    assert!(!cache.contains(7));
    assert!(!cache.contains(3));
}
