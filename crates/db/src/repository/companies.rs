//! Company lookups needed by the jobs repository.
//!
//! The companies table itself is managed elsewhere; jobs only need to know
//! whether a handle exists.

use sqlx::PgPool;

use crate::DbError;

/// `true` when a company with `handle` exists.
pub async fn company_exists(pool: &PgPool, handle: &str) -> Result<bool, DbError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT handle FROM companies WHERE handle = $1")
        .bind(handle)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
