//! Lantern CLI - drive the cart and wishlist from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a product and look at the cart
//! lantern cart add --id 1 --name "Brass Desk Lamp" --price 10.00
//! lantern cart show
//!
//! # Place the order without the prompt
//! lantern cart checkout --yes
//!
//! # Wishlist and catalog
//! lantern wishlist toggle --id 3
//! lantern catalog list --category lighting --search lamp
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, remove, change quantity, show, checkout
//! - `wishlist` - Toggle and list favorites
//! - `catalog` - List and filter products
//!
//! State is kept in a JSON storage file (`--store`, `LANTERN_STORE_PATH`)
//! holding the same `cart` and `wishlist` entries the storefront keeps per
//! visitor.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lantern_core::{Price, ProductId};

mod commands;
mod render;
mod store;

/// Default storage file, relative to the working directory.
const DEFAULT_STORE_PATH: &str = ".lantern/storage.json";

/// Default product catalog.
const DEFAULT_CATALOG_PATH: &str = "crates/storefront/content/catalog.json";

#[derive(Parser)]
#[command(name = "lantern")]
#[command(author, version, about = "Lantern Goods cart and wishlist tools")]
struct Cli {
    /// Storage file holding the cart and wishlist
    #[arg(long, global = true, env = "LANTERN_STORE_PATH", default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// Product catalog JSON file
    #[arg(long, global = true, env = "LANTERN_CATALOG_PATH", default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product id
        #[arg(long)]
        id: ProductId,

        /// Product name
        #[arg(long)]
        name: String,

        /// Unit price, e.g. 10.00
        #[arg(long)]
        price: Price,

        /// Image URL (a placeholder is generated when omitted)
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        #[arg(long)]
        id: ProductId,
    },
    /// Change a line's quantity by a signed delta
    Qty {
        /// Product id
        #[arg(long)]
        id: ProductId,

        /// Amount to add (negative to subtract)
        #[arg(long, allow_hyphen_values = true)]
        delta: i32,
    },
    /// Show the cart and order summary
    Show,
    /// Place the order
    Checkout {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add a product to the wishlist, or remove it if present
    Toggle {
        /// Product id
        #[arg(long)]
        id: ProductId,
    },
    /// List wishlisted products
    List,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products matching the filters
    List {
        /// Category (`all` for every category)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive search in name and description
        #[arg(long)]
        search: Option<String>,

        /// Only wishlisted products
        #[arg(long)]
        wishlist: bool,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
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
    let mut shop = commands::open_shop(&cli.store).await?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add {
                id,
                name,
                price,
                image,
            } => commands::cart::add(&mut shop, id, &name, price, image.as_deref()),
            CartAction::Remove { id } => commands::cart::remove(&mut shop, id),
            CartAction::Qty { id, delta } => commands::cart::change_quantity(&mut shop, id, delta),
            CartAction::Show => commands::cart::show(&shop),
            CartAction::Checkout { yes } => {
                let result = commands::cart::checkout(&mut shop, yes);
                // An order placed before a failure must still be saved.
                commands::save_shop(shop).await?;
                return result;
            }
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Toggle { id } => commands::wishlist::toggle(&mut shop, id),
            WishlistAction::List => commands::wishlist::list(&shop, &cli.catalog).await,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                category,
                search,
                wishlist,
            } => {
                commands::catalog::list(&shop, &cli.catalog, category, search, wishlist).await?;
            }
        },
    }

    commands::save_shop(shop).await?;
    Ok(())
}
