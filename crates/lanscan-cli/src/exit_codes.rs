//! Process exit codes, one per failure class

use lanscan_core::PatternError;
use lanscan_discovery::DiscoveryError;

use crate::config::ConfigError;

pub const SUCCESS: i32 = 0;
pub const GENERAL_ERROR: i32 = 1;
pub const CONFIG_ERROR: i32 = 2;
pub const ADDRESS_NOT_FOUND: i32 = 3;
pub const BROADCAST_PING_FAILED: i32 = 4;
pub const PING_UNSUCCESSFUL: i32 = 5;
pub const NEIGHBOR_DUMP_FAILED: i32 = 6;

/// Exit code for an error returned from `run`
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<DiscoveryError>() {
        return match e {
            DiscoveryError::AddressNotFound => ADDRESS_NOT_FOUND,
            DiscoveryError::BroadcastPingFailed { .. } => BROADCAST_PING_FAILED,
            DiscoveryError::PingUnsuccessful(_) => PING_UNSUCCESSFUL,
            DiscoveryError::NeighborDumpFailed(_) => NEIGHBOR_DUMP_FAILED,
        };
    }

    if err.downcast_ref::<ConfigError>().is_some() || err.downcast_ref::<PatternError>().is_some() {
        return CONFIG_ERROR;
    }

    GENERAL_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::net::Ipv4Addr;

    #[test]
    fn test_discovery_errors_are_distinct() {
        let codes: Vec<i32> = [
            DiscoveryError::AddressNotFound,
            DiscoveryError::BroadcastPingFailed {
                broadcast: Ipv4Addr::new(192, 168, 0, 255),
                reason: "ping: unknown host".to_string(),
            },
            DiscoveryError::PingUnsuccessful(Ipv4Addr::new(192, 168, 0, 255)),
            DiscoveryError::NeighborDumpFailed("arp: failed".to_string()),
        ]
        .into_iter()
        .map(|e| for_error(&anyhow::Error::from(e)))
        .collect();

        assert_eq!(codes, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_config_errors_through_context() {
        let result: Result<(), ConfigError> =
            Err(ConfigError::Invalid("probe.ping_count must be at least 1".to_string()));
        let err = result.context("failed to load lanscan.toml").unwrap_err();
        assert_eq!(for_error(&err), CONFIG_ERROR);

        let err = anyhow::Error::from(PatternError::Missing { key: "ArpRegex" });
        assert_eq!(for_error(&err), CONFIG_ERROR);
    }

    #[test]
    fn test_other_errors() {
        assert_eq!(for_error(&anyhow::anyhow!("stdout closed")), GENERAL_ERROR);
    }
}
