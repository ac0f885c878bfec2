//! Log statistics
//!
//! Counters are kept under the handle lock and copied out on request.

/// Point-in-time snapshot of a log's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogStats {
    /// Total bytes accepted by `append`
    pub bytes_appended: u64,

    /// Blocks persisted by the background writer (padded rewrites included)
    pub blocks_written: u64,

    /// Flush barriers that had buffered bytes to push out
    pub flushes: u64,

    /// Flushes that had to pad a partial block
    pub padded_flushes: u64,

    /// Read cache hits (per block)
    pub cache_hits: u64,

    /// Read cache misses (per block)
    pub cache_misses: u64,
}

impl LogStats {
    /// Fraction of block lookups served from the cache
    pub fn hit_ratio(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / total as f64
    }
}
