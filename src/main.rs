//! Parts API server: loads settings from the environment, connects the pool, serves `/api/parts` and the frontend.

use parts_api::{app_router, connect, ensure_parts_table, AppState, PgPartStore, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("parts_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = match connect(&settings.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "database connection failed; server cannot start without a database");
            return Err(e.into());
        }
    };
    tracing::info!(max_connections = settings.database.pool_size, "database pool ready");
    ensure_parts_table(&pool).await?;

    let state = AppState::new(PgPartStore::new(pool.clone()));
    let app = app_router(state, &settings.static_dir);

    let listener = TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    tracing::info!(static_dir = %settings.static_dir.display(), "serving frontend");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("database pool closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
