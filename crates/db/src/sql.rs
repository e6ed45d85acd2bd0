//! SQL fragment builder for partial updates.
//!
//! Values are always passed as bind parameters. Column identifiers are
//! interpolated into the statement text, so they are only ever taken from a
//! caller-supplied allow-list of [`Column`]s, never from the input keys.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

use crate::DbError;

/// A value bound to a positional `$n` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Int(i32),
    Null,
}

/// One entry of an update allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Name the caller uses (usually the JSON field name).
    pub field: &'static str,
    /// Physical column name.
    pub name: &'static str,
    /// Optional cast applied to the placeholder, e.g. `numeric`.
    pub cast: Option<&'static str>,
}

impl Column {
    /// A column whose physical name is the logical name verbatim.
    pub const fn new(field: &'static str) -> Self {
        Self { field, name: field, cast: None }
    }

    pub const fn renamed(field: &'static str, name: &'static str) -> Self {
        Self { field, name, cast: None }
    }

    /// A column whose bound text value must be cast, e.g. into `NUMERIC`.
    pub const fn cast(field: &'static str, cast: &'static str) -> Self {
        Self { field, name: field, cast: Some(cast) }
    }

    fn placeholder(&self, position: usize) -> String {
        match self.cast {
            Some(ty) => format!("\"{}\"=${}::{}", self.name, position, ty),
            None => format!("\"{}\"=${}", self.name, position),
        }
    }
}

/// Output of [`sql_for_partial_update`]: the text after `SET` and the
/// values for `$1..$n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialUpdate {
    pub set_cols: String,
    pub values: Vec<SqlValue>,
}

/// Translate ordered `(field, value)` pairs into a `SET` clause.
///
/// `{firstName: "Aliya", age: 32}` with `firstName -> first_name` yields
/// `"first_name"=$1, "age"=$2` and `["Aliya", 32]`.
pub fn sql_for_partial_update(
    data: Vec<(&str, SqlValue)>,
    columns: &[Column],
) -> Result<PartialUpdate, DbError> {
    if data.is_empty() {
        return Err(DbError::BadRequest("No data".into()));
    }

    let mut cols = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());
    for (idx, (field, value)) in data.into_iter().enumerate() {
        let column = columns
            .iter()
            .find(|c| c.field == field)
            .ok_or_else(|| DbError::UnknownColumn(field.to_string()))?;
        cols.push(column.placeholder(idx + 1));
        values.push(value);
    }

    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        values,
    })
}

/// Bind `values` onto `query` in order.
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: Vec<SqlValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            SqlValue::Text(s) => query.bind(s),
            SqlValue::Int(i) => query.bind(i),
            SqlValue::Null => query.bind(None::<String>),
        };
    }
    query
}
