//! Address records extracted from utility output

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// A local interface matched in the interface listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Interface name or family prefix (e.g. "eth", "wlan0", "en0")
    pub interface: String,
    /// Link-layer address as printed by the utility
    pub hardware_address: String,
    /// IPv4 address of the interface
    pub ip_address: Ipv4Addr,
}

/// A neighbor-table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborRecord {
    pub ip_address: Ipv4Addr,
    pub hardware_address: String,
}

/// One row of the final host listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostEntry {
    pub ip_address: Ipv4Addr,
    pub hardware_address: String,
    /// True for the machine running the scan
    pub local: bool,
}

impl From<&AddressRecord> for HostEntry {
    fn from(record: &AddressRecord) -> Self {
        Self {
            ip_address: record.ip_address,
            hardware_address: record.hardware_address.clone(),
            local: true,
        }
    }
}

impl From<&NeighborRecord> for HostEntry {
    fn from(record: &NeighborRecord) -> Self {
        Self {
            ip_address: record.ip_address,
            hardware_address: record.hardware_address.clone(),
            local: false,
        }
    }
}
