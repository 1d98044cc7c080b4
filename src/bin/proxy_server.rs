use anyhow::Context;
use binance_testnet_proxy::{router, utils, AppState, BinanceTestClient, Config};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// REST proxy in front of the Binance Spot testnet
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML configuration file; missing file means built-in defaults
    #[arg(long, env = "CONFIG_FILE", default_value = "config/default.toml")]
    config: PathBuf,

    /// Override `server.port`
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    utils::init_from_config(&config.logging)?;
    info!("Configuration loaded from {}", args.config.display());

    let credentials = utils::credentials_from_env()?;
    info!("API credentials loaded");

    let client = BinanceTestClient::new(credentials, &config.exchange)?;

    match client.ping().await {
        Ok(()) => info!("Connected to Binance API at {}", client.base_url()),
        Err(e) => warn!("Binance API unreachable at startup: {}", e),
    }

    let app = router(AppState::new(client), config.server.cors_origins.as_deref());

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.server.bind, config.server.port))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Proxy listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
