//! Broadcast reachability probe

use lanscan_core::{broadcast_address, PatternSet};
use serde::Serialize;
use std::net::Ipv4Addr;
use tracing::{debug, info, warn};

use crate::command::{CommandRunner, CommandSet};
use crate::error::DiscoveryError;

/// Outcome of a broadcast ping that got at least one reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BroadcastReply {
    pub broadcast: Ipv4Addr,
    pub received: u32,
}

/// Ping the /24 broadcast address of `local` and require at least one reply.
pub async fn probe_broadcast<R: CommandRunner>(
    runner: &R,
    commands: &CommandSet,
    patterns: &PatternSet,
    local: Ipv4Addr,
) -> Result<BroadcastReply, DiscoveryError> {
    let broadcast = broadcast_address(local);
    let command = commands.ping_to(broadcast);

    let output = runner.run(&command).await.map_err(|e| {
        warn!(command = %command, error = %e, "Failed to run broadcast ping");
        DiscoveryError::BroadcastPingFailed {
            broadcast,
            reason: e.to_string(),
        }
    })?;

    if !is_benign_stderr(&output.stderr) {
        return Err(DiscoveryError::BroadcastPingFailed {
            broadcast,
            reason: output.stderr.trim().to_string(),
        });
    }
    if !output.stderr.is_empty() {
        debug!(stderr = %output.stderr.trim(), "Ignoring ping warning");
    }

    // ping exits non-zero when nobody answers, so only the summary counts
    match patterns.parse_received(&output.stdout) {
        Some(received) if received > 0 => {
            info!(broadcast = %broadcast, received, "Broadcast ping answered");
            Ok(BroadcastReply {
                broadcast,
                received,
            })
        }
        _ => Err(DiscoveryError::PingUnsuccessful(broadcast)),
    }
}

/// Broadcast pings routinely warn on stderr; anything else there is fatal
fn is_benign_stderr(stderr: &str) -> bool {
    stderr.is_empty() || stderr.contains("WARNING")
}
