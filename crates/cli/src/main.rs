//! Cartage CLI - drive the cart store from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! cartage show
//!
//! # Add one unit of product 5
//! cartage add 5
//!
//! # Set product 5's quantity to 3
//! cartage set 5 3
//!
//! # Remove product 5
//! cartage remove 5
//! ```
//!
//! # Environment Variables
//!
//! - `CARTAGE_API_BASE_URL` - Base URL of the inventory service (required)
//! - `CARTAGE_STORAGE_PATH` - Persisted cart path (default: cart.json)
//! - `CARTAGE_API_TOKEN` - Optional bearer token for the inventory service
//! - `CARTAGE_HTTP_TIMEOUT_SECS` - Remote lookup timeout (default: 10)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cartage")]
#[command(author, version, about = "Client-held shopping cart with remote stock validation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cart
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Product id
        id: i64,
    },
    /// Remove a product's line item from the cart
    Remove {
        /// Product id
        id: i64,
    },
    /// Set a product's in-cart quantity exactly
    Set {
        /// Product id
        id: i64,
        /// New quantity (0 and below are ignored)
        amount: i64,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before reading configuration
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = commands::cart::open_store().await?;

    match cli.command {
        Commands::Show => commands::cart::show(&store),
        Commands::Add { id } => commands::cart::add(&store, id).await?,
        Commands::Remove { id } => commands::cart::remove(&store, id).await?,
        Commands::Set { id, amount } => commands::cart::set(&store, id, amount).await?,
    }
    Ok(())
}
