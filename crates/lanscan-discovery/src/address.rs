//! Local interface address probe

use lanscan_core::{AddressRecord, PatternSet};
use tracing::{debug, warn};

use crate::command::{CommandRunner, CommandSpec};
use crate::error::DiscoveryError;

/// Run the interface listing and return every matched interface.
///
/// The result is never empty; the first entry is the local address. A launch
/// failure is reported the same way as output with no match.
pub async fn probe_local_addresses<R: CommandRunner>(
    runner: &R,
    command: &CommandSpec,
    patterns: &PatternSet,
) -> Result<Vec<AddressRecord>, DiscoveryError> {
    let output = match runner.run(command).await {
        Ok(output) => output,
        Err(e) => {
            warn!(command = %command, error = %e, "Failed to run interface listing");
            return Err(DiscoveryError::AddressNotFound);
        }
    };

    let records = patterns.parse_addresses(&output.stdout);
    if records.is_empty() {
        warn!(command = %command, "No interface matched the address pattern");
        return Err(DiscoveryError::AddressNotFound);
    }

    debug!(
        interface = %records[0].interface,
        ip = %records[0].ip_address,
        mac = %records[0].hardware_address,
        "Found {} local address(es)",
        records.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedRunner, IFCONFIG};
    use lanscan_core::Dialect;
    use std::io;
    use std::net::Ipv4Addr;

    fn patterns() -> PatternSet {
        PatternSet::for_dialect(Dialect::Linux).unwrap()
    }

    #[tokio::test]
    async fn test_probe_extracts_first_interface() {
        let runner = ScriptedRunner::new().reply("ifconfig", IFCONFIG, "");
        let records = probe_local_addresses(&runner, &CommandSpec::new("ifconfig"), &patterns())
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hardware_address, "AA:BB:CC:DD:EE:FF");
        assert_eq!(records[0].ip_address, Ipv4Addr::new(192, 168, 0, 10));
    }

    #[tokio::test]
    async fn test_probe_without_match() {
        let output = "lo        Link encap:Local Loopback\n          inet addr:127.0.0.1\n";
        let runner = ScriptedRunner::new().reply("ifconfig", output, "");
        let err = probe_local_addresses(&runner, &CommandSpec::new("ifconfig"), &patterns())
            .await
            .unwrap_err();
        assert_eq!(err, DiscoveryError::AddressNotFound);
    }

    #[tokio::test]
    async fn test_probe_missing_binary() {
        let runner = ScriptedRunner::new().fail("ifconfig", io::ErrorKind::NotFound);
        let err = probe_local_addresses(&runner, &CommandSpec::new("ifconfig"), &patterns())
            .await
            .unwrap_err();
        assert_eq!(err, DiscoveryError::AddressNotFound);
    }
}
