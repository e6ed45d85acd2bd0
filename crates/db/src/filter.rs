//! `WHERE` clause builder for job searches.
//!
//! Only the filters enumerated in [`JobFilter`] can reach SQL; any other
//! query key is rejected while parsing.

use thiserror::Error;

use crate::models::JobRow;
use crate::sql::SqlValue;

/// Why a query-string filter was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown filter '{0}'")]
    UnknownKey(String),

    #[error("filter '{key}' {reason}")]
    InvalidValue { key: String, reason: &'static str },
}

/// A supported job search filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobFilter {
    /// `minSalary`: salary at or above the given amount.
    MinSalary(i32),
    /// `hasEquity`: when true, only jobs with non-zero equity.
    HasEquity(bool),
    /// `title`: case-insensitive substring match.
    Title(String),
}

impl JobFilter {
    pub fn parse(key: &str, raw: &str) -> Result<Self, FilterError> {
        match key {
            "minSalary" => raw
                .trim()
                .parse::<i32>()
                .map(JobFilter::MinSalary)
                .map_err(|_| FilterError::InvalidValue {
                    key: key.to_string(),
                    reason: "must be an integer",
                }),
            "hasEquity" => match raw {
                "true" => Ok(JobFilter::HasEquity(true)),
                "false" => Ok(JobFilter::HasEquity(false)),
                _ => Err(FilterError::InvalidValue {
                    key: key.to_string(),
                    reason: "must be true or false",
                }),
            },
            "title" => Ok(JobFilter::Title(raw.to_string())),
            other => Err(FilterError::UnknownKey(other.to_string())),
        }
    }

    /// Parse every pair, reporting all bad pairs at once.
    pub fn parse_all<K, V>(pairs: &[(K, V)]) -> Result<Vec<JobFilter>, Vec<FilterError>>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = Vec::with_capacity(pairs.len());
        let mut errors = Vec::new();
        for (key, value) in pairs {
            match JobFilter::parse(key.as_ref(), value.as_ref()) {
                Ok(f) => filters.push(f),
                Err(e) => errors.push(e),
            }
        }
        if errors.is_empty() {
            Ok(filters)
        } else {
            Err(errors)
        }
    }

    /// Evaluate the filter against a row already in memory, with the same
    /// semantics as the generated SQL (a NULL column never matches).
    pub fn matches(&self, job: &JobRow) -> bool {
        match self {
            JobFilter::MinSalary(min) => job.salary.is_some_and(|s| s >= *min),
            JobFilter::HasEquity(false) => true,
            JobFilter::HasEquity(true) => job
                .equity
                .as_deref()
                .and_then(|e| e.parse::<f64>().ok())
                .is_some_and(|e| e > 0.0),
            JobFilter::Title(needle) => job
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

/// Predicates to be joined with `AND`, and the values they bind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    pub predicates: Vec<String>,
    pub values: Vec<SqlValue>,
}

impl WhereClause {
    /// Placeholders are numbered by bound value, so filters that bind
    /// nothing (`hasEquity`) never leave gaps.
    pub fn build(filters: &[JobFilter]) -> Self {
        let mut clause = WhereClause::default();
        for filter in filters {
            match filter {
                JobFilter::MinSalary(min) => {
                    clause.values.push(SqlValue::Int(*min));
                    clause
                        .predicates
                        .push(format!("salary >= ${}", clause.values.len()));
                }
                JobFilter::HasEquity(true) => clause.predicates.push("equity > 0".into()),
                JobFilter::HasEquity(false) => {}
                JobFilter::Title(title) => {
                    clause.values.push(SqlValue::Text(title.clone()));
                    clause
                        .predicates
                        .push(format!("title ILIKE '%'||${}||'%'", clause.values.len()));
                }
            }
        }
        clause
    }

    pub fn to_sql(&self) -> String {
        if self.predicates.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.predicates.join(" AND "))
        }
    }
}
