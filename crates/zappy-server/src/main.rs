mod commands;
mod config;
mod gui;
mod network;
mod state;
mod tick;

use clap::Parser;
use config::{Cli, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_cli(Cli::parse())?;
    info!(
        port = config.port,
        width = config.width,
        height = config.height,
        teams = ?config.teams,
        clients_per_team = config.clients_per_team,
        freq = config.freq,
        "starting zappy server"
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "listening");

    tick::run_tick_loop(config, listener).await
}
