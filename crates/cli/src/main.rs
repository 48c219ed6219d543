// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Ethereum account, transaction, and market queries
//!
//! Results are written to stdout; logs and error messages go to stderr so
//! output stays pipeable.

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, exit_code, render, run};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            if let Some(hint) = render::hint(&error) {
                eprintln!("{hint}");
            }
            ExitCode::from(exit_code(&error))
        }
    }
}
