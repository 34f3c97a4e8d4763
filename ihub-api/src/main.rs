//! ihub-api - InfluencerHub REST backend
//!
//! Serves the onboarding/campaign API, the rule-based text analysis
//! endpoints, the payment/blockchain stub integrations, and the embedded
//! marketing/dashboard pages.

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use ihub_api::{build_router, AppState};
use ihub_common::config::Settings;
use ihub_common::db::init_database;

/// Command-line arguments. CLI values take precedence over environment
/// variables and the config file.
#[derive(Debug, Parser)]
#[command(name = "ihub-api", about = "InfluencerHub REST backend")]
struct Args {
    /// Data folder holding the SQLite database
    #[arg(long)]
    data_folder: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Bind host override
    #[arg(long)]
    host: Option<String>,

    /// Bind port override
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting InfluencerHub API (ihub-api) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let mut settings = Settings::load(args.data_folder.as_deref(), args.config.as_deref())?;
    if let Some(host) = args.host {
        settings.bind_host = host;
    }
    if let Some(port) = args.port {
        settings.bind_port = port;
    }

    if settings.jwt_secret.is_empty() {
        warn!("JWT_SECRET is not set; all authenticated endpoints will reject requests");
    }
    if settings.payment_key_id.is_none() {
        info!("Payment gateway not configured; running in mock mode");
    }

    settings.ensure_data_folder()?;
    let db_path = settings.database_path();
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path).await?;
    info!("✓ Database ready");

    let bind_addr = format!("{}:{}", settings.bind_host, settings.bind_port);
    let state = AppState::new(pool, settings);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("ihub-api listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
