//! IPIZZA CLI - catalog seeding and inspection.
//!
//! # Usage
//!
//! ```bash
//! # Write the built-in default catalog to ./data
//! ipizza seed
//!
//! # Seed from a YAML catalog, replacing whatever is there
//! ipizza --data-dir /srv/ipizza seed --file crates/cli/seed/catalog.yaml --force
//!
//! # Is the store open right now?
//! ipizza status
//!
//! # List the menu
//! ipizza menu
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ipizza")]
#[command(author, version, about = "IPIZZA storefront tools")]
struct Cli {
    /// Directory holding the catalog JSON documents
    #[arg(long, env = "STOREFRONT_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a catalog into the data directory
    Seed {
        /// YAML catalog to load; the built-in default catalog when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Overwrite documents that already exist
        #[arg(long)]
        force: bool,
    },
    /// Evaluate the store's open/closed status for the current local time
    Status,
    /// List the menu by category
    Menu,
}

#[tokio::main]
async fn main() {
    // .env may carry STOREFRONT_DATA_DIR
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { file, force } => {
            commands::seed::catalog(&cli.data_dir, file.as_deref(), force).await?;
        }
        Commands::Status => commands::inspect::status(&cli.data_dir).await?,
        Commands::Menu => commands::inspect::menu(&cli.data_dir).await?,
    }
    Ok(())
}
