//! Runs the TaskFlow HTTP API over in-memory storage.
//!
//! Configuration comes from the environment:
//!
//! ```text
//! APP_ENV=production HOST=0.0.0.0 PORT=8080 API_PREFIX=/api/v1 taskflow
//! ```

use eyre::WrapErr;
use taskflow::{
    config::{AppConfig, FromEnv},
    http::{AppState, router},
    telemetry::init_tracing,
};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = AppConfig::from_env().wrap_err("failed to load configuration")?;
    init_tracing(config.environment);

    let state = AppState::in_memory(config.app_name.clone());
    let app = router(state, &config.api_prefix);

    let address = config.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .wrap_err_with(|| format!("failed to bind {address}"))?;
    info!(
        address = %listener.local_addr()?,
        environment = %config.environment.as_str(),
        prefix = %config.api_prefix,
        "server starting"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server terminated with an error")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(%err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
