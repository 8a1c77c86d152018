//! Postgres Provisioner API - Main Entry Point

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use postgres_provisioner::infrastructure::driven_adapters::config::AppConfig;
use postgres_provisioner::infrastructure::driven_adapters::database::create_pool;
use postgres_provisioner::infrastructure::driven_adapters::database_admin::PostgresDatabaseAdmin;
use postgres_provisioner::infrastructure::driving_adapters::api_rest::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Load configuration; missing admin credentials abort startup
    let config = AppConfig::load()?;
    tracing::info!(
        host = %config.database.host,
        user = %config.database.user,
        "Configuration loaded successfully"
    );

    // Create admin connection pool
    let pool = create_pool(&config.database).await?;
    tracing::info!("Admin connection pool created");

    let database_admin = Arc::new(PostgresDatabaseAdmin::new(pool.clone()));
    let app_state = AppState::new(database_admin, config.provisioning_settings());
    let app = api_rest::router(app_state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Admin connection pool closed");

    Ok(())
}

/// Plain text logs by default, JSON lines when `LOG_FORMAT=json`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "postgres_provisioner=debug,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Completes when SIGINT or SIGTERM is received
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!(signal = "SIGINT", "shutdown signal"),
        () = terminate => tracing::info!(signal = "SIGTERM", "shutdown signal"),
    }
}
