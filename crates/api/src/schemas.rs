//! Request schemas for the jobs endpoints.
//!
//! Unknown fields are refused by serde (`deny_unknown_fields`), value rules
//! by `validator`. Both surface as 400 with a list of messages.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use validator::{Validate, ValidationErrors};

use db::{JobFilter, JobUpdate, NewJob};

use crate::error::ApiError;

/// Decimal string in `[0, 1]`, e.g. `"0.005"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Equity(String);

impl TryFrom<String> for Equity {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let well_formed = match s.split_once('.') {
            Some((int, frac)) => {
                !int.is_empty()
                    && !frac.is_empty()
                    && int.chars().all(|c| c.is_ascii_digit())
                    && frac.chars().all(|c| c.is_ascii_digit())
            }
            None => !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()),
        };
        // Range is read off the digits, never through a float.
        let (int, frac) = s.split_once('.').unwrap_or((&s, ""));
        let int = int.trim_start_matches('0');
        let in_range = int.is_empty() || (int == "1" && frac.bytes().all(|b| b == b'0'));
        if well_formed && in_range {
            Ok(Equity(s))
        } else {
            Err(format!("equity must be a decimal between 0 and 1, got \"{s}\""))
        }
    }
}

impl From<Equity> for String {
    fn from(e: Equity) -> Self {
        e.0
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Optional field that may be omitted but not sent as `null`.
fn present<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(de).map(Some)
}

/// Body of `POST /jobs`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct NewJobInput {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    #[validate(range(min = 0, message = "salary cannot be negative"))]
    pub salary: Option<i32>,
    pub equity: Option<Equity>,
    #[validate(length(min = 1, max = 25, message = "companyHandle must be 1 to 25 characters"))]
    pub company_handle: String,
}

impl From<NewJobInput> for NewJob {
    fn from(input: NewJobInput) -> Self {
        NewJob {
            title: input.title,
            salary: input.salary,
            equity: input.equity.map(String::from),
            company_handle: input.company_handle,
        }
    }
}

/// Body of `PATCH /jobs/:id`. `id` and `companyHandle` are not accepted.
/// Only `equity` can be cleared with `null`; `title` and `salary` must carry
/// a value when present.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct JobUpdateInput {
    #[serde(default, deserialize_with = "present")]
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[validate(range(min = 0, message = "salary cannot be negative"))]
    pub salary: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub equity: Option<Option<Equity>>,
}

impl From<JobUpdateInput> for JobUpdate {
    fn from(input: JobUpdateInput) -> Self {
        JobUpdate {
            title: input.title,
            salary: input.salary,
            equity: input.equity.map(|e| e.map(String::from)),
        }
    }
}

/// Parse `GET /jobs` query pairs, reporting every offending pair.
pub fn parse_filters(pairs: &[(String, String)]) -> Result<Vec<JobFilter>, ApiError> {
    JobFilter::parse_all(pairs)
        .map_err(|errors| ApiError::Invalid(errors.iter().map(ToString::to_string).collect()))
}

fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    messages.sort();
    messages
}

/// `Json<T>` that also runs `T::validate` and reports failures as
/// [`ApiError::Invalid`].
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Invalid(vec![rejection.body_text()]))?;
        value
            .validate()
            .map_err(|e| ApiError::Invalid(validation_messages(&e)))?;
        Ok(Self(value))
    }
}
