//! Repository functions — one function per database operation.
//!
//! Every function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! No HTTP types — SQL and row mapping only.

pub mod companies;
pub mod jobs;
