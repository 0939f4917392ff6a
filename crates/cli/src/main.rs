//! Checkout CLI - catalog checks, offline quotes and webhook test signatures.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog with checkout readiness
//! checkout-cli catalog --path public/products.json
//!
//! # Quote a cart without calling Stripe
//! checkout-cli quote --item soap-500g:2 --item honey-1kg
//! checkout-cli quote --item cake --pickup --json
//!
//! # Sign a payload for a local webhook delivery
//! checkout-cli sign-webhook --secret whsec_... --payload event.json
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
// Command output goes to stdout
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use checkout_core::CartLine;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "checkout-cli")]
#[command(author, version, about = "Checkout backend CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products and whether they can be checked out
    Catalog {
        /// Product catalog JSON file
        #[arg(long, env = "CATALOG_PATH", default_value = "public/products.json")]
        path: PathBuf,
    },
    /// Resolve a cart offline and show the checkout it would create
    Quote {
        /// Cart line as `id` or `id:qty` (repeatable)
        #[arg(short, long = "item", required = true, value_parser = commands::quote::parse_line)]
        items: Vec<CartLine>,

        /// Collect in store instead of shipping
        #[arg(long)]
        pickup: bool,

        /// Product catalog JSON file
        #[arg(long, env = "CATALOG_PATH", default_value = "public/products.json")]
        path: PathBuf,

        /// Public shop URL for the redirect pages
        #[arg(long, env = "FRONTEND_URL", default_value = "http://localhost:4242")]
        frontend_url: String,

        /// Print the resolved cart and session request as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a valid `Stripe-Signature` header for a payload file
    SignWebhook {
        /// Webhook signing secret
        #[arg(long, env = "STRIPE_WEBHOOK_SECRET", hide_env_values = true)]
        secret: String,

        /// File holding the exact request body
        #[arg(long)]
        payload: PathBuf,

        /// Unix timestamp to sign with (defaults to now)
        #[arg(long)]
        timestamp: Option<i64>,
    },
}

#[tokio::main]
async fn main() {
    // Pick up CATALOG_PATH, FRONTEND_URL and STRIPE_WEBHOOK_SECRET from .env
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
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
    match cli.command {
        Commands::Catalog { path } => commands::catalog::list(&path).await?,
        Commands::Quote {
            items,
            pickup,
            path,
            frontend_url,
            json,
        } => commands::quote::run(&items, pickup, &path, &frontend_url, json).await?,
        Commands::SignWebhook {
            secret,
            payload,
            timestamp,
        } => commands::webhook::sign(secret, &payload, timestamp).await?,
    }
    Ok(())
}
