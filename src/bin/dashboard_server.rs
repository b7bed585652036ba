// Dashboard server binary entry point.
//
// Usage: cargo run --bin dashboard_server
// Configuration via DATA_PATH and PORT environment variables.

use std::net::SocketAddr;

use diet_dashboard_rust::{create_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "diet_dashboard_rust=info,tower_http=debug,axum=debug,warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting dashboard server...");

    let data_path = std::env::var("DATA_PATH")
        .unwrap_or_else(|_| "Results_21MAR2022_nokcaladjust.csv".to_string());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8050);

    tracing::info!("Configuration:");
    tracing::info!("  DATA_PATH: {}", data_path);
    tracing::info!("  PORT: {}", port);

    // Loads the dataset once; a load failure aborts startup
    let state = AppState::new(&data_path)?;

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Dashboard listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
