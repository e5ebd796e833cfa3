// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use portal_api::ApiConfig;

use crate::cli::{Cli, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Executes the `validate` command to validate configuration.
pub fn validate(cli: &Cli, args: ValidateArgs) -> BinResult<()> {
    let config_path = &cli.config;

    // Check if file exists
    if !config_path.exists() {
        return Err(BinError::Configuration(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    // Load and validate configuration
    let config = ApiConfig::from_file(config_path).map_err(|e| {
        BinError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    println!("✓ Configuration is valid: {}", config_path.display());
    println!();
    println!("Summary:");
    println!("  Listen:          {}", config.socket_addr());
    println!("  Directory:       {}", config.directory.endpoint);
    println!("  Allowed domain:  {}", config.auth.allowed_domain);
    println!(
        "  Active statuses: {}",
        config.auth.active_statuses.join(", ")
    );
    println!(
        "  Session TTL:     {}s",
        config.auth.session_ttl.as_secs()
    );
    println!(
        "  Trusted issuers: {}",
        config.auth.trusted_issuers.join(", ")
    );

    if args.show_config {
        println!();
        println!("Parsed configuration:");
        println!(
            "{}",
            serde_json::to_string_pretty(&config)
                .unwrap_or_else(|_| "(serialization error)".to_string())
        );
    }

    Ok(())
}
