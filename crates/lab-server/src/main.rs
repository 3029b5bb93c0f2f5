mod config;
mod wiring;

use std::error::Error;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = config::Config::from_env()?;
    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!(
        listen_addr = %config.listen_addr,
        initial_capital = config.simulation.initial_capital,
        months = config.simulation.months,
        "simulation server listening"
    );

    axum::serve(listener, wiring::build_app(config.simulation))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
