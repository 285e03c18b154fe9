//! # LEMMI Server
//!
//! JSON backend for the runner: wallets, referral codes, score history,
//! skill rewards and feature flags, all held in memory.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────┐   ┌───────────────┐   ┌──────────┐   ┌─────────────┐
//! │ Client │──>│ axum::Router  │──>│ handlers │──>│ dyn Store   │
//! └────────┘   │ + CORS layer  │   │ (routes) │   │ MemoryStore │
//!              └───────────────┘   └──────────┘   └─────────────┘
//! ```
//!
//! Every failure becomes an [`ApiError`] with a fixed `{"error": ...}`
//! body.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, Resource, ServerError, ServerResult, StoreError};
pub use state::AppState;
pub use store::{MemoryStore, Store};

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/wallet/:address",
            get(routes::wallet::get_wallet).post(routes::wallet::upsert_wallet),
        )
        .route("/api/referral", post(routes::referral::create_referral))
        .route("/api/referral/:key", get(routes::referral::get_referral))
        .route("/api/referral/:key/click", post(routes::referral::record_click))
        .route("/api/game/score", post(routes::game::submit_score))
        .route(
            "/api/game/:wallet_address/:game/scores",
            get(routes::game::list_scores),
        )
        .route(
            "/api/skills/:wallet_address",
            get(routes::skills::get_skills).post(routes::skills::upsert_skills),
        )
        .route(
            "/api/features/:wallet_address",
            get(routes::features::get_features),
        )
        .route("/api/health", get(routes::health::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the configured address and serves until `shutdown` resolves.
///
/// # Errors
///
/// Returns `InvalidConfig` for a bad bind address, `Io` when the socket
/// cannot be bound or the server fails.
pub async fn serve(
    config: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> ServerResult<()> {
    let addr = config.socket_addr()?;
    let store = MemoryStore::new(config.referral_seed).with_code_len(config.referral_code_len);
    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "lemmi server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("lemmi server stopped");
    Ok(())
}
