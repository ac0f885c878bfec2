//! Buffer Module
//!
//! Memory the log keeps between the caller and the device.
//!
//! ## Responsibilities
//! - Block-aligned allocation (`AlignedBuf`)
//! - The circular write-behind buffer (`WriteRing`)

mod aligned;
mod ring;

pub use aligned::AlignedBuf;
pub use ring::WriteRing;
