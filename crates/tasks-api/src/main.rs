use anyhow::Result;
use std::sync::Arc;
use tokio::signal;

use tasks_api::{create_router, telemetry, ApiState, Settings};
use tasks_db::Database;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    telemetry::init();

    let settings = Settings::load()?;

    // A store that cannot be opened is fatal
    let db = Database::connect(&settings.database).await?;

    if let Err(e) = db.init_schema().await {
        tracing::error!("Failed to create tasks table: {}", e);
    }

    let state = ApiState::new(Arc::new(db.clone()));
    let app = create_router(state);

    // Start server
    let addr = settings.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Task service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Task service stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
