//! TechStore CLI - catalog browsing and cart session tools.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! ts-cli catalog list
//! ts-cli catalog list --category Laptops --price-range 1000-2000
//! ts-cli catalog list --search "noise canceling"
//! ts-cli catalog categories
//! ts-cli catalog show 1
//!
//! # Drive a persistent cart (state survives across invocations)
//! ts-cli cart add 1
//! ts-cli cart add 5 --quantity 2
//! ts-cli cart show
//! ts-cli cart remove 5
//! ts-cli cart clear
//! ```
//!
//! # Commands
//!
//! - `catalog` - Read-only queries and filter composition
//! - `cart` - Mutations against the cart persisted under `TECHSTORE_DATA_DIR`

#![cfg_attr(not(test), forbid(unsafe_code))]
// Command output is the point of a CLI.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use techstore_storefront::config::StorefrontConfig;
use techstore_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "ts-cli")]
#[command(author, version, about = "TechStore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the persistent cart session
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products matching the given filters
    List {
        /// Category name (exact match; omit for all products)
        #[arg(short, long)]
        category: Option<String>,

        /// Price bucket key: all, 0-500, 500-1000, 1000-2000, 2000+
        #[arg(short, long)]
        price_range: Option<String>,

        /// Free-text search over name and description
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List available categories
    Categories,
    /// Show one product in full
    Show {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product ID
        id: String,

        /// How many units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart entirely
    Remove {
        /// Product ID
        id: String,
    },
    /// Set the exact quantity for a product (0 removes it)
    Set {
        /// Product ID
        id: String,

        /// New quantity
        quantity: u32,
    },
    /// Show cart contents and totals
    Show,
    /// Empty the cart
    Clear,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> techstore_storefront::Result<()> {
    let config = StorefrontConfig::from_env()?;
    let mut state = AppState::from_config(config)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                category,
                price_range,
                search,
            } => commands::catalog::list(&state, category, price_range, search),
            CatalogAction::Categories => commands::catalog::categories(&state),
            CatalogAction::Show { id } => commands::catalog::show(&state, &id)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add { id, quantity } => commands::cart::add(&mut state, &id, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(&mut state, &id),
            CartAction::Set { id, quantity } => commands::cart::set(&mut state, &id, quantity),
            CartAction::Show => commands::cart::show(&state),
            CartAction::Clear => commands::cart::clear(&mut state),
        },
    }
    Ok(())
}
