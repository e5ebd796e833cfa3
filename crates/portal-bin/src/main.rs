// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Main binary entry point for the InfoBio portal backend.

use portal_bin::cli::Cli;
use portal_bin::error::report_error_and_exit;
use portal_bin::{commands, init_logging};

fn main() {
    let cli = Cli::parse_args();

    init_logging(cli.effective_log_level(), cli.log_format);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => report_error_and_exit(portal_bin::BinError::init(format!(
            "Failed to build async runtime: {}",
            e
        ))),
    };

    if let Err(e) = runtime.block_on(commands::execute(cli)) {
        report_error_and_exit(e);
    }
}
