//! Log Module
//!
//! The write-behind log: a caller-facing handle, a background writer, and
//! the flush barrier tying them together.
//!
//! ## Responsibilities
//! - Buffer appends in the write ring, persisting whole blocks in order
//! - Keep the read cache coherent with blocks being overwritten
//! - Make buffered bytes readable (flush barrier) without skipping ahead
//! - Surface background write failures on the next call
//!
//! ## Device Layout
//! ```text
//! offset 0                                   logical_offset
//! │ block 0 │ block 1 │ ... │ block n-1 │      │ pending bytes (ring) │
//! └──────────── persisted ──────────────┘      └──── not yet written ─┘
//! ```
//! No header or metadata is written; the device holds the raw byte stream.

mod flush;
mod handle;
mod state;
mod writer;

pub use handle::BlockLog;
