// SPDX-License-Identifier: MIT

//! `codebox sweep`: on-demand invocation of the orphan sweeper, for
//! operators who want to reclaim stray containers without waiting for
//! the next `submit` to run it implicitly at startup.

use std::sync::Arc;

use codebox_sandbox::config::SandboxConfig;
use codebox_sandbox::container::docker::DockerContainerEngine;
use codebox_sandbox::orphan_sweep;

use crate::exit_error::ExitError;

pub async fn run(
    config: Arc<SandboxConfig>,
    engine: Arc<DockerContainerEngine>,
) -> Result<i32, ExitError> {
    let swept = orphan_sweep::sweep_orphans(&engine, &config.image_name).await;
    println!("swept {swept} orphaned sandbox container(s)");
    Ok(0)
}
