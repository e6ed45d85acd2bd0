//! Typed error type for the db crate.

use thiserror::Error;

use crate::filter::FilterError;

pub use sqlx::Error as SqlxError;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The referenced row (job, company, ...) does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The caller handed us something we refuse to turn into SQL.
    #[error("{0}")]
    BadRequest(String),

    /// A partial update named a field outside the column allow-list.
    #[error("column '{0}' cannot be updated")]
    UnknownColumn(String),

    #[error(transparent)]
    InvalidFilter(#[from] FilterError),
}
