//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, application state and the Axum
//! server lifecycle.

use crate::application::services::AuthService;
use crate::config::Config;
use crate::infrastructure::persistence::{
    PgBackupRepository, PgBadgeRepository, PgBookmarkRepository, PgEventRepository,
    PgHadithRepository, PgQuranRepository, PgUserRepository,
};
use crate::state::AppState;
use crate::web::middleware::{rate_limit, tracing};
use crate::web::routes;

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::{Router, ServiceExt};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Repositories and the authentication service
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    ::tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let state = build_state(Arc::new(pool), &config);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    ::tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Wires the PostgreSQL repositories into the shared state.
pub fn build_state(pool: Arc<PgPool>, config: &Config) -> AppState {
    let users = Arc::new(PgUserRepository::new(pool.clone()));

    AppState {
        auth_service: Arc::new(AuthService::new(
            users.clone(),
            config.session_secret.clone(),
            config.session_ttl_seconds,
        )),
        users,
        events: Arc::new(PgEventRepository::new(pool.clone())),
        hadiths: Arc::new(PgHadithRepository::new(pool.clone())),
        badges: Arc::new(PgBadgeRepository::new(pool.clone())),
        bookmarks: Arc::new(PgBookmarkRepository::new(pool.clone())),
        quran: Arc::new(PgQuranRepository::new(pool.clone())),
        backups: Arc::new(PgBackupRepository::new(pool)),
        locale: config.default_locale,
    }
}

/// Constructs the application router with all routes and middleware.
///
/// # Route Structure
///
/// - `GET  /`, `/index.php` - every page via `?page=`
/// - `POST /login`, `/register` - credentials (strict rate limit)
/// - form actions and `/admin/backup` (rate limited)
/// - `GET  /health` - database liveness
/// - `/static/*` - stylesheet and assets
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(routes::page_routes())
        .merge(routes::credential_routes().layer(rate_limit::secure_layer()))
        .merge(routes::action_routes().layer(rate_limit::layer()))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        ::tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    ::tracing::info!("Shutting down");
}
