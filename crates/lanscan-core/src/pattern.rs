//! Regular expressions that turn utility output into address records
//!
//! A [`PatternSet`] holds the three expressions the probes need. Each one is
//! compiled in multi-line mode and must expose its fields either as named
//! groups (`iface`, `hw`, `ip`, `received`) or, when it has no named groups
//! at all, positionally:
//!
//! - interface listing: 1 = interface, 2 = hardware address, 3 = IP
//! - ping summary: 1 = received count
//! - neighbor table: 1 = IP, 2 = hardware address

use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;
use tracing::{trace, warn};

use crate::record::{AddressRecord, NeighborRecord};

pub const IP_MAC_KEY: &str = "IpMacRegex";
pub const PING_STATUS_KEY: &str = "PingStatusRegex";
pub const ARP_KEY: &str = "ArpRegex";

const LINUX_IP_MAC: &str = r"^(?P<iface>(?:wlan|eth)\S*)\s+Link\s+encap:Ethernet\s+HWaddr\s+(?P<hw>[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5})\s*\n\s*inet\s+addr:(?P<ip>\d+\.\d+\.\d+\.\d+)";
const LINUX_ARP: &str = r"^\S+\s+\((?P<ip>\d+\.\d+\.\d+\.\d+)\)\s+at\s+(?P<hw>[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5})\s+\[";

const BSD_IP_MAC: &str = r"^(?P<iface>[a-z]+\d+):\s+flags=.*\n(?:[ \t]+.*\n)*?[ \t]+ether\s+(?P<hw>[0-9A-Fa-f]{1,2}(?::[0-9A-Fa-f]{1,2}){5})[ \t]*\n(?:[ \t]+.*\n)*?[ \t]+inet\s+(?P<ip>\d+\.\d+\.\d+\.\d+)";
const BSD_ARP: &str = r"^\S+\s+\((?P<ip>\d+\.\d+\.\d+\.\d+)\)\s+at\s+(?P<hw>[0-9A-Fa-f]{1,2}(?::[0-9A-Fa-f]{1,2}){5})\s+on\s";

// iputils prints "3 received", BSD ping prints "3 packets received"
const PING_STATUS: &str = r"(?P<received>\d+)\s*(?:packets\s+)?received";

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("pattern {key} is missing or empty")]
    Missing { key: &'static str },
    #[error("pattern {key} is not a valid regular expression: {source}")]
    Invalid {
        key: &'static str,
        source: regex::Error,
    },
    #[error("pattern {key} does not capture '{group}'")]
    MissingGroup {
        key: &'static str,
        group: &'static str,
    },
}

/// Platform whose utilities produce the output being parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// net-tools `ifconfig`, iputils `ping`, net-tools `arp`
    #[default]
    Linux,
    /// BSD and macOS userland
    Bsd,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Linux => "linux",
            Dialect::Bsd => "bsd",
        }
    }

    /// Built-in pattern sources for this dialect
    pub fn patterns(&self) -> PatternSource {
        let (ip_mac, arp) = match self {
            Dialect::Linux => (LINUX_IP_MAC, LINUX_ARP),
            Dialect::Bsd => (BSD_IP_MAC, BSD_ARP),
        };
        PatternSource {
            ip_mac_regex: Some(ip_mac.to_string()),
            ping_status_regex: Some(PING_STATUS.to_string()),
            arp_regex: Some(arp.to_string()),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Dialect::Linux),
            "bsd" | "macos" | "darwin" => Ok(Dialect::Bsd),
            other => Err(format!("unknown dialect '{}' (expected linux or bsd)", other)),
        }
    }
}

/// Uncompiled patterns as they appear in the `[Patterns]` config section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PatternSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_mac_regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ping_status_regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arp_regex: Option<String>,
}

/// One compiled pattern plus how to read its captures
#[derive(Debug, Clone)]
struct Extractor {
    key: &'static str,
    regex: Regex,
    named: bool,
}

impl Extractor {
    fn compile(
        key: &'static str,
        pattern: Option<&str>,
        required: &[(&'static str, usize)],
    ) -> Result<Self, PatternError> {
        let pattern = pattern
            .filter(|p| !p.trim().is_empty())
            .ok_or(PatternError::Missing { key })?;

        let regex = RegexBuilder::new(pattern)
            .multi_line(true)
            .build()
            .map_err(|source| PatternError::Invalid { key, source })?;

        let named = regex.capture_names().flatten().next().is_some();
        for &(group, position) in required {
            let present = if named {
                regex.capture_names().flatten().any(|name| name == group)
            } else {
                regex.captures_len() > position
            };
            if !present {
                return Err(PatternError::MissingGroup { key, group });
            }
        }

        Ok(Self { key, regex, named })
    }

    fn field<'h>(&self, caps: &Captures<'h>, name: &str, position: usize) -> Option<&'h str> {
        let m = if self.named {
            caps.name(name)
        } else {
            caps.get(position)
        };
        m.map(|m| m.as_str().trim())
    }
}

/// Compiled interface, ping, and neighbor patterns
#[derive(Debug, Clone)]
pub struct PatternSet {
    address: Extractor,
    ping: Extractor,
    neighbor: Extractor,
}

impl PatternSet {
    /// Compile all three patterns, failing on the first missing or invalid one
    pub fn compile(source: &PatternSource) -> Result<Self, PatternError> {
        Ok(Self {
            address: Extractor::compile(
                IP_MAC_KEY,
                source.ip_mac_regex.as_deref(),
                &[("hw", 2), ("ip", 3)],
            )?,
            ping: Extractor::compile(
                PING_STATUS_KEY,
                source.ping_status_regex.as_deref(),
                &[("received", 1)],
            )?,
            neighbor: Extractor::compile(
                ARP_KEY,
                source.arp_regex.as_deref(),
                &[("ip", 1), ("hw", 2)],
            )?,
        })
    }

    /// Built-in patterns for a dialect
    pub fn for_dialect(dialect: Dialect) -> Result<Self, PatternError> {
        Self::compile(&dialect.patterns())
    }

    /// Every interface block in an interface listing, in output order
    pub fn parse_addresses(&self, output: &str) -> Vec<AddressRecord> {
        let ex = &self.address;
        ex.regex
            .captures_iter(output)
            .filter_map(|caps| {
                trace!(key = ex.key, "Captured {:?}", caps);
                let hw = ex.field(&caps, "hw", 2)?;
                let ip = ex.field(&caps, "ip", 3)?;
                let Ok(ip_address) = ip.parse::<Ipv4Addr>() else {
                    warn!(ip = %ip, "Skipping interface with unparseable address");
                    return None;
                };
                Some(AddressRecord {
                    interface: ex.field(&caps, "iface", 1).unwrap_or_default().to_string(),
                    hardware_address: hw.to_string(),
                    ip_address,
                })
            })
            .collect()
    }

    /// Received reply count from a ping summary, if the summary is present
    pub fn parse_received(&self, output: &str) -> Option<u32> {
        let ex = &self.ping;
        let caps = ex.regex.captures(output)?;
        ex.field(&caps, "received", 1)?.parse().ok()
    }

    /// Every resolved entry of a neighbor table, in output order
    pub fn parse_neighbors(&self, output: &str) -> Vec<NeighborRecord> {
        let ex = &self.neighbor;
        ex.regex
            .captures_iter(output)
            .filter_map(|caps| {
                let ip = ex.field(&caps, "ip", 1)?;
                let hw = ex.field(&caps, "hw", 2)?;
                match ip.parse::<Ipv4Addr>() {
                    Ok(ip_address) => Some(NeighborRecord {
                        ip_address,
                        hardware_address: hw.to_string(),
                    }),
                    Err(_) => {
                        warn!(ip = %ip, "Skipping neighbor with unparseable address");
                        None
                    }
                }
            })
            .collect()
    }
}
