pub mod jobs;
pub mod probes;

use crate::error::ApiError;

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".into())
}
