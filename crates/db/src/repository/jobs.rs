//! Job CRUD and search.

use sqlx::PgPool;
use tracing::debug;

use crate::{
    filter::{JobFilter, WhereClause},
    models::{JobRow, JobUpdate, NewJob},
    repository::companies,
    sql::{bind_values, sql_for_partial_update, Column},
    DbError,
};

/// Columns selected for every job row. `equity` comes back as text so the
/// stored decimal is reproduced exactly.
const JOB_COLUMNS: &str = "id, title, salary, equity::text AS equity, company_handle";

/// Fields a partial update may touch.
pub const JOB_UPDATE_COLUMNS: &[Column] = &[
    Column::new("title"),
    Column::new("salary"),
    Column::cast("equity", "numeric"),
];

/// Insert a new job after checking that its company exists.
///
/// Returns `DbError::NotFound` (and inserts nothing) for an unknown
/// `company_handle`.
pub async fn create_job(pool: &PgPool, job: NewJob) -> Result<JobRow, DbError> {
    if !companies::company_exists(pool, &job.company_handle).await? {
        return Err(DbError::NotFound(format!(
            "Company {} not found",
            job.company_handle
        )));
    }

    let sql = format!(
        r#"
        INSERT INTO jobs (title, salary, equity, company_handle)
        VALUES ($1, $2, $3::numeric, $4)
        RETURNING {JOB_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, JobRow>(&sql)
        .bind(&job.title)
        .bind(job.salary)
        .bind(&job.equity)
        .bind(&job.company_handle)
        .fetch_one(pool)
        .await?;

    debug!(id = row.id, company = %row.company_handle, "job created");
    Ok(row)
}

/// Return every job ordered by id.
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<JobRow>, DbError> {
    let sql = format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY id");
    let rows = sqlx::query_as::<_, JobRow>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Return the jobs matching every filter, ordered by id.
///
/// A search that matches nothing is `DbError::NotFound`, unlike
/// [`list_jobs`] which happily returns an empty list.
pub async fn find_filtered(pool: &PgPool, filters: &[JobFilter]) -> Result<Vec<JobRow>, DbError> {
    let clause = WhereClause::build(filters);
    let sql = format!("SELECT {JOB_COLUMNS} FROM jobs {} ORDER BY id", clause.to_sql());
    debug!(%sql, "searching jobs");

    let rows = bind_values(sqlx::query_as::<_, JobRow>(&sql), clause.values)
        .fetch_all(pool)
        .await?;

    if rows.is_empty() {
        return Err(DbError::NotFound("No matching jobs found".into()));
    }
    Ok(rows)
}

/// Fetch a single job by its primary key.
pub async fn get_job(pool: &PgPool, id: i32) -> Result<JobRow, DbError> {
    let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
    sqlx::query_as::<_, JobRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("No job: {id}")))
}

/// Apply a partial update and return the updated row.
///
/// An empty update is rejected before any statement is sent.
pub async fn update_job(pool: &PgPool, id: i32, data: JobUpdate) -> Result<JobRow, DbError> {
    let update = sql_for_partial_update(data.assignments(), JOB_UPDATE_COLUMNS)?;
    let id_idx = update.values.len() + 1;
    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${id_idx} RETURNING {JOB_COLUMNS}",
        update.set_cols
    );

    bind_values(sqlx::query_as::<_, JobRow>(&sql), update.values)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("No job: {id}")))
}

/// Permanently delete a job by its primary key.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete_job(pool: &PgPool, id: i32) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(format!("No job: {id}")));
    }

    Ok(())
}
