//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, typed row structs, the SQL fragment builders
//! and repository functions for the `jobs` and `companies` tables.
//! No HTTP concerns live here.

pub mod error;
pub mod filter;
pub mod models;
pub mod pool;
pub mod repository;
pub mod sql;

pub use error::DbError;
pub use filter::{FilterError, JobFilter, WhereClause};
pub use models::{JobRow, JobUpdate, NewJob};
pub use pool::DbPool;
