//! Main entry point for gtx-translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gtx_translator::cli::commands::{self, Commands};
use gtx_translator::TranslatorConfig;

/// gtx-translator - translate long text through the Google Translate web endpoint
#[derive(Parser, Debug)]
#[command(name = "gtx-translator", version, about, long_about = None)]
struct Args {
    /// JSON configuration file (defaults to environment variables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("gtx_translator={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::from_env()?,
    };

    // Execute command
    match args.command {
        Some(Commands::Translate {
            text,
            from,
            to,
            china,
            json,
            no_history,
            phrasebook,
        }) => {
            commands::handle_translate(config, text, from, to, china, json, no_history, phrasebook)
                .await?;
        }
        Some(Commands::History {
            limit,
            offset,
            delete,
            clear,
        }) => {
            commands::handle_history(config, limit, offset, delete, clear).await?;
        }
        Some(Commands::Phrasebook { limit, remove }) => {
            commands::handle_phrasebook(config, limit, remove).await?;
        }
        Some(Commands::Server { host, port }) => {
            commands::handle_server(config, host, port).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
