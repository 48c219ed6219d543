// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! The `ethq` command-line interface
//!
//! This crate provides the user-facing surface of `ethq`: argument parsing,
//! layered settings, plain-text rendering, and the mapping from query
//! failures to process exit codes. All query behavior lives in the
//! `orchestrator` crate; nothing here talks to the network directly.
//!
//! # Module Structure
//!
//! - [`args`]: clap command tree, one subcommand per query operation
//! - [`settings`]: endpoint and timeout settings with hierarchical loading
//! - [`app`]: dispatch from parsed arguments to engine calls
//! - [`render`]: plain-text output blocks, written to stdout by the dispatcher

pub mod app;
pub mod args;
pub mod render;
pub mod settings;

pub use app::{exit_code, run};
pub use args::Cli;
pub use settings::Settings;
