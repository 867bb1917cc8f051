//! lanscan Core - Address records and output patterns
//!
//! This crate provides the types shared by the lanscan probes:
//! - Address and neighbor records extracted from utility output
//! - Pattern sets that parse `ifconfig`, `ping`, and `arp` output
//! - Dialect presets for Linux and BSD userland
//! - Broadcast address computation

pub mod pattern;
pub mod record;
pub mod subnet;

pub use pattern::{Dialect, PatternError, PatternSet, PatternSource};
pub use record::{AddressRecord, HostEntry, NeighborRecord};
pub use subnet::broadcast_address;
