//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   POST   /jobs        (admin)
//!   GET    /jobs        (?title=&minSalary=&hasEquity=)
//!   GET    /jobs/{id}
//!   PATCH  /jobs/{id}   (admin)
//!   DELETE /jobs/{id}   (admin)
//!   GET    /healthz, /livez

pub mod auth;
pub mod error;
pub mod handlers;
pub mod schemas;
pub mod store;

use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub use auth::{Identity, JwtAuth};
pub use error::ApiError;
pub use store::JobStore;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn JobStore>,
    pub auth: Arc<JwtAuth>,
}

impl AppState {
    pub fn new(store: impl JobStore + 'static, auth: JwtAuth) -> Self {
        Self {
            store: Arc::new(store),
            auth: Arc::new(auth),
        }
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/jobs", get(handlers::jobs::list))
        .route(
            "/jobs",
            post(handlers::jobs::create).route_layer(from_fn(auth::ensure_admin)),
        )
        .route("/jobs/:id", get(handlers::jobs::get))
        .route(
            "/jobs/:id",
            patch(handlers::jobs::update)
                .delete(handlers::jobs::delete)
                .route_layer(from_fn(auth::ensure_admin)),
        )
        .route("/healthz", get(handlers::probes::healthz))
        .route("/livez", get(handlers::probes::livez))
        .fallback(handlers::not_found)
        .layer(from_fn_with_state(state.clone(), auth::authenticate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until ctrl-c.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for ctrl-c");
            }
            info!("received ctrl-c, shutting down");
        })
        .await
}
