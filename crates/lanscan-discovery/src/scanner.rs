//! Discovery scanner that runs the three probes in order

use lanscan_core::{AddressRecord, Dialect, HostEntry, NeighborRecord, PatternSet};
use serde::Serialize;
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing::{debug, info};

use crate::address::probe_local_addresses;
use crate::command::{CommandRunner, CommandSet, SystemRunner, DEFAULT_PING_COUNT};
use crate::error::DiscoveryError;
use crate::neighbor::enumerate_neighbors;
use crate::ping::probe_broadcast;

/// Scanner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Which utilities to invoke
    pub dialect: Dialect,
    /// Echo requests sent to the broadcast address
    pub ping_count: u32,
    /// Kill any utility still running after this long
    pub command_timeout: Option<Duration>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            ping_count: DEFAULT_PING_COUNT,
            command_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Result of a successful scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    /// The interface the scan ran from
    pub host: AddressRecord,
    pub broadcast: Ipv4Addr,
    /// Replies to the broadcast ping
    pub received: u32,
    /// Neighbor table entries, in table order
    pub neighbors: Vec<NeighborRecord>,
}

impl DiscoveryReport {
    /// The local host followed by every neighbor.
    ///
    /// The neighbor table never lists the machine itself, so the host row is
    /// taken from the interface listing.
    pub fn entries(&self) -> Vec<HostEntry> {
        std::iter::once(HostEntry::from(&self.host))
            .chain(self.neighbors.iter().map(HostEntry::from))
            .collect()
    }
}

/// Discovery scanner service
pub struct DiscoveryScanner<R> {
    runner: R,
    commands: CommandSet,
    patterns: PatternSet,
}

impl DiscoveryScanner<SystemRunner> {
    /// Scanner that runs the host's utilities
    pub fn system(config: &ScannerConfig, patterns: PatternSet) -> Self {
        Self::new(SystemRunner::new(config.command_timeout), config, patterns)
    }
}

impl<R: CommandRunner> DiscoveryScanner<R> {
    pub fn new(runner: R, config: &ScannerConfig, patterns: PatternSet) -> Self {
        Self {
            runner,
            commands: CommandSet::for_dialect(config.dialect, config.ping_count),
            patterns,
        }
    }

    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    /// Run a single discovery scan, stopping at the first failed stage
    pub async fn scan_once(&self) -> Result<DiscoveryReport, DiscoveryError> {
        // Step 1: find our own address
        let host = probe_local_addresses(&self.runner, &self.commands.interfaces, &self.patterns)
            .await?
            .into_iter()
            .next()
            .ok_or(DiscoveryError::AddressNotFound)?;

        info!(
            interface = %host.interface,
            ip = %host.ip_address,
            "Scanning from local address"
        );

        // Step 2: wake up the segment so the neighbor table is populated
        let reply =
            probe_broadcast(&self.runner, &self.commands, &self.patterns, host.ip_address).await?;

        // Step 3: read back who answered
        let neighbors =
            enumerate_neighbors(&self.runner, &self.commands.neighbors, &self.patterns).await?;

        debug!(
            broadcast = %reply.broadcast,
            received = reply.received,
            neighbors = neighbors.len(),
            "Scan completed"
        );

        Ok(DiscoveryReport {
            host,
            broadcast: reply.broadcast,
            received: reply.received,
            neighbors,
        })
    }
}
