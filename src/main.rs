use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog_api::{app, AppConfig, AppState};

#[derive(Debug, Parser)]
#[command(name = "catalog-api")]
#[command(about = "Authenticated JSON API for categories, products and users")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Address to bind (overrides API_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "sqlx connection string (overrides DATABASE_URL)")]
    database_url: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut AppConfig) {
        if let Some(host) = self.host {
            config.api.host = host;
        }
        if let Some(port) = self.port {
            config.api.port = port;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL, SECRET_KEY etc. are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog_api=info,tower_http=info")),
        )
        .init();

    let mut config = AppConfig::from_env();
    Cli::parse().apply(&mut config);
    tracing::info!("Starting Catalog API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("SECRET_KEY is not set; logins will fail until it is configured");
    }

    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let state = AppState::from_config(config)
        .await
        .context("failed to initialise database")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Catalog API listening on http://{}", bind_addr);

    axum::serve(listener, app(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    state.db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
