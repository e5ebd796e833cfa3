// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! This module provides the command-line interface for the portal backend
//! using clap. It supports:
//!
//! - `run`: Start the portal backend (default)
//! - `validate`: Validate configuration file
//! - `version`: Show version information

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// InfoBio member portal backend.
///
/// Serves the session gate, RBAC guards and resource endpoints the portal
/// pages consume, backed by the organization's spreadsheet directory.
#[derive(Parser, Debug)]
#[command(
    name = "portal",
    author = "Sylvex <contact@sylvex.io>",
    version = portal_core::VERSION,
    about = "InfoBio member portal backend",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "portal.yaml",
        env = "PORTAL_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "info",
        env = "PORTAL_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json, compact)
    #[arg(long, default_value = "text", env = "PORTAL_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Enable quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the portal CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the portal backend
    ///
    /// This is the default command when no subcommand is specified.
    Run(RunArgs),

    /// Validate the configuration file
    ///
    /// Parses and validates the configuration file without starting the
    /// server. Useful for checking configuration before deployment.
    Validate(ValidateArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `run` command.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Override the listen port from the configuration
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Default, Clone)]
pub struct ValidateArgs {
    /// Show parsed configuration after validation
    #[arg(short, long)]
    pub show_config: bool,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Run` if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }

    /// Get the effective log level based on flags.
    pub fn effective_log_level(&self) -> &str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["portal"]);
        assert!(cli.command.is_none());
        assert!(matches!(cli.effective_command(), Commands::Run(_)));
    }

    #[test]
    fn test_run_with_port_override() {
        let cli = Cli::parse_from(["portal", "run", "-p", "9090"]);
        if let Some(Commands::Run(args)) = cli.command {
            assert_eq!(args.port, Some(9090));
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["portal", "validate", "--show-config"]);
        if let Some(Commands::Validate(args)) = cli.command {
            assert!(args.show_config);
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::parse_from(["portal", "-c", "/etc/portal/config.yaml"]);
        assert_eq!(cli.config, PathBuf::from("/etc/portal/config.yaml"));
    }

    #[test]
    fn test_quiet_and_verbose_levels() {
        let cli = Cli::parse_from(["portal", "-q"]);
        assert_eq!(cli.effective_log_level(), "warn");

        let cli = Cli::parse_from(["portal", "-v"]);
        assert_eq!(cli.effective_log_level(), "debug");
    }
}
