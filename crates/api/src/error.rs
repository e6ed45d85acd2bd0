//! HTTP-facing error type and its JSON rendering.
//!
//! Every failure leaves the API as
//! `{"error": {"message": ..., "status": ...}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use db::DbError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or empty input.
    #[error("{0}")]
    BadRequest(String),

    /// Schema violations; one message per problem.
    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    /// Anything the backing store threw at us.
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
#[serde(untagged)]
enum Message<'a> {
    One(&'a str),
    Many(&'a [String]),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let text = self.to_string();
        let message = match &self {
            ApiError::Invalid(messages) => Message::Many(messages),
            _ => Message::One(&text),
        };
        let body = json!({
            "error": {
                "message": message,
                "status": status.as_u16(),
            }
        });
        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(msg) => ApiError::NotFound(msg),
            DbError::BadRequest(msg) => ApiError::BadRequest(msg),
            e @ DbError::UnknownColumn(_) => ApiError::BadRequest(e.to_string()),
            DbError::InvalidFilter(e) => ApiError::Invalid(vec![e.to_string()]),
            e @ (DbError::Sqlx(_) | DbError::Migration(_)) => {
                error!(error = %e, "backing store failure");
                ApiError::Internal(e.to_string())
            }
        }
    }
}
