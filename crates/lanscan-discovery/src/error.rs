//! Discovery failure kinds

use std::net::Ipv4Addr;
use thiserror::Error;

/// The stage at which a scan stopped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// The interface listing could not be run or matched no interface
    #[error("failed to get local address")]
    AddressNotFound,

    /// The broadcast ping could not be run or reported an error
    #[error("failed to ping broadcast address {broadcast}: {reason}")]
    BroadcastPingFailed { broadcast: Ipv4Addr, reason: String },

    /// The broadcast ping ran but no host replied
    #[error("unsuccessful ping: 0 packets received for {0}")]
    PingUnsuccessful(Ipv4Addr),

    /// The neighbor table dump wrote to stderr or could not be run
    #[error("{0}")]
    NeighborDumpFailed(String),
}
