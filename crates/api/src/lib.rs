//! `api` crate: HTTP REST API layer.
//!
//! Exposes, for each of `domains`, `subdomains`, `skills` and `job_titles`:
//!   POST   /{entity}
//!   GET    /{entity}            (filtered, paginated)
//!   GET    /{entity}/{id}
//!   PUT    /{entity}/{id}       (partial update)
//!   DELETE /{entity}/{id}
//!
//! plus the association routes:
//!   GET         /skills/{id}/subdomains
//!   POST|DELETE /skills/{id}/subdomains/{subdomain_id}
//!   GET         /subdomains/{id}/skills
//!   GET         /job_titles/{id}/core_skills
//!   POST|DELETE /job_titles/{id}/core_skills/{skill_id}
//!   GET         /job_titles/{id}/subdomains
//!   POST|DELETE /job_titles/{id}/subdomains/{subdomain_id}

pub mod error;
pub mod extract;
mod handlers;

pub use error::ApiError;
pub use handlers::router;

use db::DbPool;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

/// Bind `bind` and serve the API until Ctrl-C.
pub async fn serve(bind: &str, pool: DbPool) -> std::io::Result<()> {
    let app = router(AppState { pool });

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        // Without a signal handler, run until the process is killed.
        Err(_) => std::future::pending::<()>().await,
    }
}
