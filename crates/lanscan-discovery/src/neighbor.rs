//! Neighbor table enumeration

use lanscan_core::{NeighborRecord, PatternSet};
use tracing::debug;

use crate::command::{CommandRunner, CommandSpec};
use crate::error::DiscoveryError;

/// Dump the neighbor table and return every resolved entry in table order
pub async fn enumerate_neighbors<R: CommandRunner>(
    runner: &R,
    command: &CommandSpec,
    patterns: &PatternSet,
) -> Result<Vec<NeighborRecord>, DiscoveryError> {
    let output = runner
        .run(command)
        .await
        .map_err(|e| DiscoveryError::NeighborDumpFailed(format!("{}: {}", command, e)))?;

    if !output.stderr.is_empty() {
        return Err(DiscoveryError::NeighborDumpFailed(
            output.stderr.trim().to_string(),
        ));
    }

    let neighbors = patterns.parse_neighbors(&output.stdout);
    debug!("Found {} neighbor entries", neighbors.len());
    Ok(neighbors)
}
