//! lanscan Discovery - Host discovery by way of system utilities
//!
//! A scan runs three probes in order and stops at the first failure:
//! - interface listing (`ifconfig`) for the local address
//! - broadcast ping to populate the neighbor table
//! - neighbor table dump (`arp -a -n`) for every other host

pub mod address;
pub mod command;
pub mod error;
pub mod neighbor;
pub mod ping;
pub mod scanner;

#[cfg(test)]
mod testing;

pub use command::{CommandOutput, CommandRunner, CommandSet, CommandSpec, SystemRunner};
pub use error::DiscoveryError;
pub use ping::BroadcastReply;
pub use scanner::{DiscoveryReport, DiscoveryScanner, ScannerConfig};
