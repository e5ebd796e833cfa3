// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `run` command.

use tracing::info;

use portal_api::{ApiConfig, ApiServerBuilder};

use crate::cli::{Cli, RunArgs};
use crate::error::BinResult;

/// Executes the `run` command to start the portal backend.
pub async fn run(cli: &Cli, args: RunArgs) -> BinResult<()> {
    info!("Starting InfoBio portal backend...");

    let mut config = ApiConfig::from_file(&cli.config)?;
    if let Some(port) = args.port {
        config = config.with_port(port);
    }

    let server = ApiServerBuilder::new().config(config).build()?;

    info!("Listening on {}", server.addr());

    server.run_with_shutdown(shutdown_signal()).await?;

    info!("Portal backend stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
