/// # Nickname Server
///
/// Entry point of the nickname server. Each node of a peer-to-peer network can
/// store a signed claim linking a human-readable nickname to its identity, and
/// other nodes can look the nickname up later.
///
/// ## Configuration
///
/// The server is configured via a TOML file that specifies:
/// * API settings (bind address, port)
/// * Storage settings (engine, database path)
/// * Logging settings (level)
///
/// ## Usage
///
/// ```bash
/// # Print the default configuration
/// nickreg-server default-config > config.toml
///
/// # Run the server
/// nickreg-server --config config.toml run
/// ```
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use nickreg_server::{create_router, init_registry, load_config, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command line argument parser for the nickname server
#[derive(Parser)]
#[command(author, version = nickreg::version(), about, long_about = None)]
struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Run the server
    Run,

    /// Print the default configuration as TOML
    DefaultConfig,
}

/// Install the global tracing subscriber. RUST_LOG overrides `level`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

/// Main function for the nickname server
///
/// Loads configuration, opens the registry and serves the API until Ctrl+C.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    if let Some(Commands::DefaultConfig) = cli.command {
        println!("{}", ServerConfig::default().to_toml()?);
        return Ok(());
    }

    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

    init_tracing(&config.logging.level);
    info!("Configuration loaded from {:?}", cli.config);

    let registry = init_registry(&config.storage).context("failed to initialize registry")?;
    let router = create_router(Arc::new(AppState::new(registry)));

    let api_addr: SocketAddr = config
        .listen_address()
        .parse()
        .with_context(|| format!("invalid API address {}", config.listen_address()))?;

    info!("Starting API server on {}", api_addr);
    axum::Server::bind(&api_addr)
        .serve(router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Nickname server stopped");
    Ok(())
}
