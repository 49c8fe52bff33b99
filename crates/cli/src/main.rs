//! Cartwheel CLI - A shopping cart in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart, order summary, and recommendations
//! cartwheel show
//!
//! # Add a product (or set its quantity)
//! cartwheel add 64f1c2a9e4b0 --qty 2
//!
//! # Step a quantity up or down
//! cartwheel inc 64f1c2a9e4b0
//! cartwheel dec 64f1c2a9e4b0
//!
//! # Hand the cart off to checkout
//! CARTWHEEL_SESSION_TOKEN=... cartwheel checkout
//! ```
//!
//! # Commands
//!
//! - `show` - Cart lines, summary, free-shipping nudge, recommendations
//! - `add` / `remove` / `inc` / `dec` / `clear` - Edit the cart
//! - `recommend` - Products you may also like
//! - `checkout` - Session-gated checkout handoff
//!
//! Configuration is read from the environment; see [`config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use cartwheel_core::{CartStore, ProductId};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod commands;
mod config;
mod render;
mod storage;
#[cfg(test)]
mod test_support;

use catalog::CatalogClient;
use commands::{CommandError, Context};
use config::{CliConfig, LogFormat};
use storage::JsonFileRepository;

#[derive(Parser)]
#[command(name = "cartwheel")]
#[command(author, version, about = "Cartwheel shopping cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart, order summary, and recommendations
    Show,
    /// Add a product, or set its quantity if already in the cart
    Add {
        /// Catalog product ID
        product_id: ProductId,

        /// Desired quantity (limited to available stock)
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product ID
        product_id: ProductId,
    },
    /// Increase a product's quantity by one
    Inc {
        /// Catalog product ID
        product_id: ProductId,
    },
    /// Decrease a product's quantity by one
    Dec {
        /// Catalog product ID
        product_id: ProductId,
    },
    /// Show products you may also like
    Recommend {
        /// Maximum number of products
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Proceed to checkout
    Checkout,
    /// Remove everything from the cart
    Clear,
}

/// Install the tracing subscriber. Logs go to stderr so command output stays clean.
fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartwheel=info,cartwheel_core=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = fmt::layer().with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => registry.with(layer).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = CliConfig::from_env();
    init_tracing(config.as_ref().map(|c| c.log_format).unwrap_or_default());

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    match run(cli, config).await {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                print!("{output}");
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

// Not `Send`: the store's listeners are not `Sync`. Runs on the main task only.
#[allow(clippy::future_not_send)]
async fn run(cli: Cli, config: CliConfig) -> Result<String, CommandError> {
    let catalog = CatalogClient::new(config.api_url.clone())?;
    let store = CartStore::restore(JsonFileRepository::new(&config.cart_path));
    let mut ctx = Context {
        config,
        catalog,
        store,
    };

    let output = match cli.command {
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Add { product_id, qty } => {
            commands::cart::add(&mut ctx, &product_id, qty).await?
        }
        Commands::Remove { product_id } => commands::cart::remove(&mut ctx, &product_id),
        Commands::Inc { product_id } => commands::cart::adjust(&mut ctx, &product_id, 1),
        Commands::Dec { product_id } => commands::cart::adjust(&mut ctx, &product_id, -1),
        Commands::Recommend { limit } => commands::cart::recommend(&ctx, limit).await?,
        Commands::Checkout => commands::checkout::checkout(&mut ctx)?,
        Commands::Clear => commands::cart::clear(&mut ctx),
    };
    Ok(output)
}
