use axum::extract::State;

use crate::{error::ApiError, AppState};

pub async fn livez() -> &'static str {
    tracing::debug!("service is live");
    "ok"
}

pub async fn healthz(State(state): State<AppState>) -> Result<&'static str, ApiError> {
    state.store.ping().await?;
    tracing::debug!("service is healthy");
    Ok("ok")
}
