//! Catalog CLI - Browse products and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally filtered by name or description
//! catalog products list --search lamp
//!
//! # Show one product
//! catalog products show 3
//!
//! # Create a product
//! catalog products create --name "Desk Lamp" --description "Adjustable LED desk lamp" \
//!     --price 59.95 --image-url https://example.com/lamp.jpg --property white:1kg
//!
//! # Manage the cart
//! catalog cart add 3
//! catalog cart show
//! catalog cart clear
//! ```
//!
//! Configuration comes from the environment (see
//! [`catalog_storefront::config`]); the cart persists in
//! `CATALOG_STORAGE_PATH` between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use catalog_core::ProductId;
use catalog_storefront::config::StorefrontConfig;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about = "Product catalog storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and create products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products
    List {
        /// Only show products whose name or description contains this text
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show one product
    Show {
        /// Product ID
        id: String,
    },
    /// Create a new product
    Create(commands::products::CreateArgs),
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add a product to the cart
    Add { id: ProductId },
    /// Remove a product from the cart
    Remove { id: ProductId },
    /// Add a product if absent, remove it otherwise
    Toggle { id: ProductId },
    /// Empty the cart
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt().with_writer(std::io::stderr).init();
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize Sentry (must be done before tracing subscriber).
    // The guard flushes queued events when it drops at the end of main.
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "catalog_storefront=info,catalog_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    execute(cli, &config).await
}

/// Run the command and map its outcome to the process exit status.
async fn execute(cli: Cli, config: &StorefrontConfig) -> ExitCode {
    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), commands::CommandError> {
    let gateway = commands::connect(config);
    let _loading_watch = gateway.state().subscribe_slice(
        |state| state.loading,
        |loading| tracing::debug!(loading, "Loading state changed"),
    );

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List { search } => commands::products::list(&gateway, &search).await?,
            ProductAction::Show { id } => commands::products::show(&gateway, &id).await?,
            ProductAction::Create(args) => commands::products::create(&gateway, args).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&gateway).await?,
            CartAction::Add { id } => commands::cart::add(&gateway, id)?,
            CartAction::Remove { id } => commands::cart::remove(&gateway, id)?,
            CartAction::Toggle { id } => commands::cart::toggle(&gateway, id)?,
            CartAction::Clear => commands::cart::clear(&gateway)?,
        },
    }
    Ok(())
}
