//! Frosteva CLI - back-office tools for the storefront API.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! frosteva-cli products list
//!
//! # List orders, newest first
//! frosteva-cli orders list
//!
//! # Move an order along
//! frosteva-cli orders status 0b9c3f1e-5f7a-4a53-9d55-4f5f4f1d2a10 shipped
//!
//! # Dashboard figures
//! frosteva-cli summary
//!
//! # Check a seed catalog before deploying it (offline)
//! frosteva-cli catalog validate crates/storefront/seed/catalog.json
//! ```
//!
//! # Environment Variables
//!
//! - `FROSTEVA_URL` - Storefront base URL (default: <http://127.0.0.1:3000>)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod client;
mod commands;
mod error;

use client::ApiClient;
use error::CliError;

#[derive(Parser)]
#[command(name = "frosteva-cli")]
#[command(author, version, about = "Frosteva storefront back-office tools")]
struct Cli {
    /// Storefront base URL
    #[arg(long, env = "FROSTEVA_URL", default_value = "http://127.0.0.1:3000", global = true)]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Inspect and update orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Show dashboard figures
    Summary,
    /// Work with seed catalog files
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List every product
    List,
}

#[derive(Subcommand)]
enum OrderAction {
    /// List every order, newest first
    List,
    /// Set an order's status
    Status {
        /// Order id
        id: String,
        /// New status (pending, processing, shipped, completed, cancelled)
        status: String,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Validate a seed catalog JSON file without contacting the server
    Validate {
        /// Path to the catalog file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "frosteva_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List => {
                let api = ApiClient::new(&cli.url)?;
                commands::products::list(&api, &mut out).await?;
            }
        },
        Commands::Orders { action } => {
            let api = ApiClient::new(&cli.url)?;
            match action {
                OrderAction::List => commands::orders::list(&api, &mut out).await?,
                OrderAction::Status { id, status } => {
                    commands::orders::set_status(&api, &id, &status, &mut out).await?;
                }
            }
        }
        Commands::Summary => {
            let api = ApiClient::new(&cli.url)?;
            commands::summary::show(&api, &mut out).await?;
        }
        Commands::Catalog { action } => match action {
            CatalogAction::Validate { file } => commands::catalog::validate(&file, &mut out)?,
        },
    }
    Ok(())
}
