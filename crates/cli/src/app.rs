// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Command dispatch
//!
//! One query engine call per command. Results go to stdout through
//! [`crate::render`]; failures bubble up as [`QueryError`] for the exit-code
//! mapping in `main`.

use orchestrator::{QueryEngine, QueryError};
use tracing::debug;

use crate::{
    args::{AccountCommands, Cli, Commands, NetworkCommands, TxCommands},
    render,
    settings::Settings,
};

/// Run one parsed invocation to completion.
pub async fn run(cli: Cli) -> Result<(), QueryError> {
    let settings = Settings::load().map_err(|error| QueryError::Config(error.to_string()))?;
    let engine_config = settings
        .engine_config()
        .map_err(|error| QueryError::Config(format!("{error:#}")))?;
    debug!(?engine_config, "settings loaded");
    let engine = QueryEngine::new(engine_config)?;

    match cli.command {
        Commands::Account { action } => account(&engine, action).await,
        Commands::Network { action } => network(&engine, action).await,
        Commands::Tx { action } => tx(&engine, action).await,
    }
}

/// The process exit code for a failed invocation: 2 for user input, 3 for
/// retryable transient failures, 4 for everything a provider did wrong.
pub fn exit_code(error: &QueryError) -> u8 {
    if error.is_user_error() {
        2
    } else if error.is_retryable() {
        3
    } else {
        4
    }
}

async fn account(engine: &QueryEngine, action: AccountCommands) -> Result<(), QueryError> {
    match action {
        AccountCommands::Set(args) => {
            // An empty `set` reads back instead of writing, like `show`.
            if args.address.is_none() && args.node_key.is_none() && args.scan_key.is_none() {
                println!("{}", render::credential_status(&engine.credential_status()));
                return Ok(());
            }
            let status =
                engine.set_credentials(args.address.as_deref(), args.node_key, args.scan_key)?;
            println!("Credentials saved.");
            println!("{}", render::credential_status(&status));
        }
        AccountCommands::Show => {
            println!("{}", render::credential_status(&engine.credential_status()));
        }
        AccountCommands::Balance(args) => {
            let report = engine
                .balance(args.address.as_deref(), args.block.as_deref())
                .await?;
            println!("{}", render::balance(&report));
        }
        AccountCommands::Transactions(args) => {
            let report = engine
                .transaction_history(args.address.as_deref(), args.limit, args.sort.as_deref())
                .await?;
            println!("{}", render::history(&report));
        }
        AccountCommands::Nonce(args) => {
            let report = engine
                .nonce(args.address.as_deref(), args.block.as_deref())
                .await?;
            println!("{}", render::nonce(&report));
        }
    }
    Ok(())
}

async fn network(engine: &QueryEngine, action: NetworkCommands) -> Result<(), QueryError> {
    match action {
        NetworkCommands::Price(args) => {
            let quote = engine
                .spot_price(args.coin.as_deref(), args.currency.as_deref())
                .await?;
            println!("{}", render::price(&quote));
        }
        NetworkCommands::GasPrice => {
            let current = engine.gas_price().await?;
            println!("{}", render::gas_price(&current));
        }
        NetworkCommands::Block => {
            let summary = engine.latest_block().await?;
            println!("{}", render::block(&summary));
        }
    }
    Ok(())
}

async fn tx(engine: &QueryEngine, action: TxCommands) -> Result<(), QueryError> {
    match action {
        TxCommands::Status(args) => {
            let report = engine.transaction_status(&args.hash).await?;
            println!("{}", render::transaction_status(&report));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use provider_client::ProviderError;

    use super::*;

    #[test]
    fn exit_codes_partition_the_error_taxonomy() {
        let user = QueryError::MissingParameter {
            parameter: "address",
        };
        assert_eq!(exit_code(&user), 2);

        let config = QueryError::Config("timeout must be greater than 0".to_owned());
        assert_eq!(exit_code(&config), 2);

        let transient = QueryError::from(ProviderError::unavailable("connection refused"));
        assert_eq!(exit_code(&transient), 3);

        let rejected = QueryError::from(ProviderError::rejected("invalid API key"));
        assert_eq!(exit_code(&rejected), 4);

        let mismatch = QueryError::from(ProviderError::protocol_mismatch("body was not JSON"));
        assert_eq!(exit_code(&mismatch), 4);
    }
}
