// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # portal-bin
//!
//! CLI binary for the InfoBio member portal backend.
//!
//! This crate provides the main binary entry point, including:
//!
//! - CLI argument parsing with clap
//! - Logging initialization
//! - Command implementations (run, validate, version)
//!
//! ## Usage
//!
//! ```bash
//! # Start the portal backend (default command)
//! portal
//!
//! # Start with custom config
//! portal -c /etc/portal/config.yaml
//!
//! # Validate configuration
//! portal validate
//!
//! # Show version
//! portal version
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
