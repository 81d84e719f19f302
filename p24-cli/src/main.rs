//! p24-cli: drive the Przelewy24 client from the command line.
//!
//! ```text
//! p24-cli <config.toml> register <transaction.json>
//! p24-cli <config.toml> verify <notification.json> [--check-sign]
//! ```
//!
//! Secrets are read from the environment variables named in the config
//! (`P24_API_KEY` and `P24_CRC` by default). Logging is controlled by
//! `RUST_LOG` and `LOG_FORMAT`.

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "a CLI reports its result on stdout and failures on stderr"
)]

mod observability;

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use przelewy24::{
    GatewayConfig, Przelewy24,
    model::{NotificationRequest, TransactionRequest},
};
use serde::de::DeserializeOwned;
use tracing::error;

use crate::observability::{LogFormat, init_observability};

#[derive(Debug, Parser)]
#[command(name = "p24-cli")]
#[command(about = "Register and verify Przelewy24 transactions", long_about = None)]
#[command(version)]
struct Cli {
    /// Gateway configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// Register a transaction and print the payer redirect URL
    Register {
        /// Transaction JSON file
        #[arg(value_name = "TRANSACTION")]
        transaction: PathBuf,
    },

    /// Confirm a notified payment with the gateway
    Verify {
        /// Notification JSON file, as posted by the gateway
        #[arg(value_name = "NOTIFICATION")]
        notification: PathBuf,

        /// Check the notification signature before confirming
        #[arg(long)]
        check_sign: bool,
    },
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let toml = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("failed to read {}", cli.config.display()))?;
    let config = GatewayConfig::from_toml(&toml)?;
    let client = Przelewy24::from_config(&config)?;

    match cli.command {
        Command::Register { transaction } => {
            let request: TransactionRequest = read_json(&transaction)?;
            let registered = client.register_transaction(request).await?;
            Ok(registered.redirect_url)
        }
        Command::Verify { notification, check_sign } => {
            let notification: NotificationRequest = read_json(&notification)?;
            if check_sign {
                client.verify_notification(&notification)?;
            }
            client.verify_transaction(&notification).await?;
            Ok("verified".to_owned())
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_observability(LogFormat::from_env());

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
