// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! codegen - generation history and preferences from the terminal
//!
//! Entry point for the codegen CLI application.

use clap::Parser;

use codegen::cli::{commands, Cli};
use codegen::config::Config;
use codegen::error::Result;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on store diagnostics, `-vv` everything at debug.
    let directives: &[&str] = match cli.verbose {
        0 => &[],
        1 => &["codegen=debug"],
        _ => &["debug"],
    };
    for directive in directives {
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.data_dir.as_deref())?;
    tracing::debug!(home = %config.home.display(), "Loaded configuration");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, &config, &mut out)
}
