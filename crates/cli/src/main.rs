//! Web Larek CLI - drive the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! larek catalog
//!
//! # Print the page with two products in the basket, basket open
//! larek render --add 854cef69-976d-4c2a-a18c-2aa45046c390 --open-basket
//!
//! # Place an order (use --dry-run to print it instead)
//! larek checkout --items 854cef69-976d-4c2a-a18c-2aa45046c390 \
//!     --payment card --address "Main St 1" \
//!     --email buyer@example.com --phone "+7 999 123 45 67"
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products and prices
//! - `render` - Print the rendered page as HTML
//! - `checkout` - Go through checkout and submit the order

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use web_larek_storefront::{LarekClient, StorefrontConfig};

mod commands;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "web_larek_storefront=info,larek=info";

#[derive(Parser)]
#[command(name = "larek")]
#[command(author, version, about = "Web Larek storefront CLI")]
struct Cli {
    /// Service origin, overriding `LAREK_API_ORIGIN`
    #[arg(long, global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    Catalog {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the rendered page as HTML
    Render {
        /// Product ids to put in the basket first
        #[arg(long, value_delimiter = ',')]
        add: Vec<String>,

        /// Open the basket before rendering
        #[arg(long)]
        open_basket: bool,
    },
    /// Check out and submit an order
    Checkout {
        /// Product ids to buy
        #[arg(long, value_delimiter = ',', required = true)]
        items: Vec<String>,

        /// Payment method (`card` or `cash`)
        #[arg(long, default_value = "card")]
        payment: String,

        /// Delivery address
        #[arg(long)]
        address: String,

        /// Contact email
        #[arg(long)]
        email: String,

        /// Contact phone
        #[arg(long)]
        phone: String,

        /// Print the order instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.origin {
        Some(origin) => StorefrontConfig::from_origin(origin)?,
        None => StorefrontConfig::from_env()?,
    };
    tracing::debug!(api = %config.api_url, cdn = %config.cdn_url, "configuration loaded");
    let api = LarekClient::new(&config)?;

    match cli.command {
        Commands::Catalog { json } => commands::catalog::list(&api, json).await?,
        Commands::Render { add, open_basket } => {
            commands::render::page(&api, &add, open_basket).await?;
        }
        Commands::Checkout {
            items,
            payment,
            address,
            email,
            phone,
            dry_run,
        } => {
            let details = commands::checkout::Details {
                items,
                payment,
                address,
                email,
                phone,
            };
            commands::checkout::run(&api, &details, dry_run).await?;
        }
    }
    Ok(())
}
