// SPDX-License-Identifier: MIT

//! Orphan sweeper: removes stray sandbox containers left behind by a
//! prior process crash, run at startup and on graceful shutdown. See
//! spec §4.9.

use std::sync::Arc;

use crate::container::ContainerEngine;

/// Sweep every container whose name contains `name_needle` — matching on
/// name rather than image, since a crashed process's containers are only
/// reliably distinguished by the naming convention this subsystem itself
/// imposes.
pub async fn sweep_orphans<E: ContainerEngine>(engine: &Arc<E>, name_needle: &str) -> usize {
    let names = match engine.list_names().await {
        Ok(names) => names,
        Err(err) => {
            tracing::error!(error = %err, "failed to list containers for orphan sweep");
            return 0;
        }
    };

    let mut swept = 0;
    for name in names.iter().filter(|n| n.contains(name_needle)) {
        match engine.delete(name).await {
            Ok(()) => {
                swept += 1;
                tracing::info!(container = %name, "swept orphaned sandbox container");
            }
            Err(err) => {
                tracing::warn!(container = %name, error = %err, "failed to sweep orphaned container");
            }
        }
    }
    swept
}

#[cfg(test)]
#[path = "orphan_sweep_tests.rs"]
mod tests;
