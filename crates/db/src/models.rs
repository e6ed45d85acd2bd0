//! Row structs that map 1-to-1 onto database tables, plus the write-side
//! inputs the repository accepts.
//!
//! These are *persistence* models; request validation lives in the `api`
//! crate.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::sql::SqlValue;

// ---------------------------------------------------------------------------
// jobs
// ---------------------------------------------------------------------------

/// A persisted job row.
///
/// `equity` is a Postgres `NUMERIC`; it is always selected as `equity::text`
/// so it round-trips as the exact decimal string that was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: String,
}

/// Everything needed to insert a job.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: String,
}

/// A partial update of the mutable job fields.
///
/// `equity` distinguishes "leave alone" (`None`) from "clear"
/// (`Some(None)`). `id` and `company_handle` are deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<Option<String>>,
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.salary.is_none() && self.equity.is_none()
    }

    /// Logical field/value pairs in declaration order, ready for
    /// [`crate::sql::sql_for_partial_update`].
    pub fn assignments(&self) -> Vec<(&'static str, SqlValue)> {
        let mut out = Vec::new();
        if let Some(title) = &self.title {
            out.push(("title", SqlValue::Text(title.clone())));
        }
        if let Some(salary) = self.salary {
            out.push(("salary", SqlValue::Int(salary)));
        }
        if let Some(equity) = &self.equity {
            let value = match equity {
                Some(e) => SqlValue::Text(e.clone()),
                None => SqlValue::Null,
            };
            out.push(("equity", value));
        }
        out
    }

    /// Apply this update to an in-memory row.
    pub fn apply_to(&self, job: &mut JobRow) {
        if let Some(title) = &self.title {
            job.title = title.clone();
        }
        if let Some(salary) = self.salary {
            job.salary = Some(salary);
        }
        if let Some(equity) = &self.equity {
            job.equity = equity.clone();
        }
    }
}
