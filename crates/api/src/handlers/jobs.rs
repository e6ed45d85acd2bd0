use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    error::ApiError,
    schemas::{parse_filters, JobUpdateInput, NewJobInput, ValidatedJson},
    AppState,
};

/// Job ids are integers; anything else cannot name a job.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("No job: {raw}")))
}

/// `POST /jobs` (admin) → 201 `{job}`
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewJobInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let job = state.store.create(input.into()).await?;
    info!(id = job.id, company = %job.company_handle, "job created");
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

/// `GET /jobs` → `{jobs}`
///
/// Without a query string every job is listed. With one, the pairs must be
/// `title`, `minSalary` and/or `hasEquity`, and a search that matches
/// nothing is a 404.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ApiError> {
    let jobs = if params.is_empty() {
        state.store.find_all().await?
    } else {
        let filters = parse_filters(&params)?;
        state.store.find_filtered(&filters).await?
    };
    Ok(Json(json!({ "jobs": jobs })))
}

/// `GET /jobs/:id` → `{job}`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let job = state.store.get(parse_id(&id)?).await?;
    Ok(Json(json!({ "job": job })))
}

/// `PATCH /jobs/:id` (admin) → `{job}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<JobUpdateInput>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let job = state.store.update(id, input.into()).await?;
    info!(id, "job updated");
    Ok(Json(json!({ "job": job })))
}

/// `DELETE /jobs/:id` (admin) → `{deleted: "Job <id>"}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    state.store.remove(id).await?;
    info!(id, "job deleted");
    Ok(Json(json!({ "deleted": format!("Job {id}") })))
}
