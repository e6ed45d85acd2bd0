//! Bearer-token authentication and the role guards built on top of it.
//!
//! [`authenticate`] runs on every request and never fails: a missing or
//! invalid token simply leaves the request anonymous. The `ensure_*` guards
//! are attached per route with `route_layer` and reject with 401.

use std::collections::HashMap;

use axum::{
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{error::ApiError, AppState};

/// Who is making the request. Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub is_admin: bool,
}

/// Signed token payload.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    username: String,
    #[serde(rename = "isAdmin", default)]
    is_admin: bool,
    iat: usize,
    exp: usize,
}

/// HS256 signer/verifier holding the injected secret.
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtAuth {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Sign a token for `identity`, valid for the configured TTL.
    pub fn issue(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            username: identity.username.clone(),
            is_admin: identity.is_admin,
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Identity, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(Identity {
            username: data.claims.username,
            is_admin: data.claims.is_admin,
        })
    }
}

/// Token from `Authorization: Bearer <token>` (or `bearer`).
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Attach an [`Identity`] to the request when a valid token is presented.
pub async fn authenticate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let identity = match bearer_token(request.headers()) {
        Some(token) => match state.auth.verify(token) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(error = %e, "ignoring invalid bearer token");
                None
            }
        },
        None => None,
    };

    if let Some(identity) = identity {
        request.extensions_mut().insert(identity);
    }
    next.run(request).await
}

fn identity(request: &Request) -> Option<&Identity> {
    request.extensions().get::<Identity>()
}

/// Any authenticated caller.
pub async fn ensure_logged_in(request: Request, next: Next) -> Result<Response, ApiError> {
    if identity(&request).is_none() {
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(request).await)
}

/// Authenticated callers whose token carries `isAdmin`.
pub async fn ensure_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    if !identity(&request).is_some_and(|i| i.is_admin) {
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(request).await)
}

/// Admins, or the user named by the `:username` path parameter.
pub async fn ensure_same_user_or_admin(
    Path(params): Path<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let allowed = identity(&request).is_some_and(|i| {
        i.is_admin || params.get("username").is_some_and(|u| *u == i.username)
    });
    if !allowed {
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(request).await)
}
