//! Shared fixtures for router tests: an in-memory `JobStore` seeded with
//! three jobs, tokens for a regular user and an admin, and a request helper.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use api::{AppState, Identity, JobStore, JwtAuth};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use db::{error::SqlxError, DbError, JobFilter, JobRow, JobUpdate, NewJob};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "secret-test";

struct Tables {
    companies: HashSet<String>,
    jobs: Vec<JobRow>,
    next_id: i32,
}

/// `JobStore` backed by a `Vec`, with the same not-found and bad-request
/// behaviour as the Postgres repository.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    broken: bool,
}

fn job(id: i32, title: &str, salary: i32, equity: Option<&str>, company: &str) -> JobRow {
    JobRow {
        id,
        title: title.into(),
        salary: Some(salary),
        equity: equity.map(str::to_string),
        company_handle: company.into(),
    }
}

impl MemoryStore {
    /// Companies c1..c3; Job1 (1, 0.1, c1), Job2 (2, 0.2, c1), Job3 (3, null, c2).
    pub fn seeded() -> Self {
        Self {
            tables: Mutex::new(Tables {
                companies: ["c1", "c2", "c3"].iter().map(|c| c.to_string()).collect(),
                jobs: vec![
                    job(1, "Job1", 1, Some("0.1"), "c1"),
                    job(2, "Job2", 2, Some("0.2"), "c1"),
                    job(3, "Job3", 3, None, "c2"),
                ],
                next_id: 4,
            }),
            broken: false,
        }
    }

    /// Every call fails as if the jobs table had been dropped.
    pub fn broken() -> Self {
        Self { broken: true, ..Self::seeded() }
    }

    fn check(&self) -> Result<(), DbError> {
        if self.broken {
            return Err(DbError::Sqlx(SqlxError::Protocol(
                "relation \"jobs\" does not exist".into(),
            )));
        }
        Ok(())
    }
}

fn no_job(id: i32) -> DbError {
    DbError::NotFound(format!("No job: {id}"))
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn create(&self, job: NewJob) -> Result<JobRow, DbError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        if !t.companies.contains(&job.company_handle) {
            return Err(DbError::NotFound(format!(
                "Company {} not found",
                job.company_handle
            )));
        }
        let row = JobRow {
            id: t.next_id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company_handle: job.company_handle,
        };
        t.next_id += 1;
        t.jobs.push(row.clone());
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<JobRow>, DbError> {
        self.check()?;
        Ok(self.tables.lock().unwrap().jobs.clone())
    }

    async fn find_filtered(&self, filters: &[JobFilter]) -> Result<Vec<JobRow>, DbError> {
        self.check()?;
        let found: Vec<JobRow> = self
            .tables
            .lock()
            .unwrap()
            .jobs
            .iter()
            .filter(|j| filters.iter().all(|f| f.matches(j)))
            .cloned()
            .collect();
        if found.is_empty() {
            return Err(DbError::NotFound("No matching jobs found".into()));
        }
        Ok(found)
    }

    async fn get(&self, id: i32) -> Result<JobRow, DbError> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        t.jobs.iter().find(|j| j.id == id).cloned().ok_or_else(|| no_job(id))
    }

    async fn update(&self, id: i32, data: JobUpdate) -> Result<JobRow, DbError> {
        self.check()?;
        if data.is_empty() {
            return Err(DbError::BadRequest("No data".into()));
        }
        let mut t = self.tables.lock().unwrap();
        let job = t.jobs.iter_mut().find(|j| j.id == id).ok_or_else(|| no_job(id))?;
        data.apply_to(job);
        Ok(job.clone())
    }

    async fn remove(&self, id: i32) -> Result<(), DbError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        let before = t.jobs.len();
        t.jobs.retain(|j| j.id != id);
        if t.jobs.len() == before {
            return Err(no_job(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.check()
    }
}

pub fn state_with(store: MemoryStore) -> AppState {
    AppState::new(store, JwtAuth::new(SECRET, Duration::hours(1)))
}

pub fn app() -> Router {
    api::router(state_with(MemoryStore::seeded()))
}

fn token(username: &str, is_admin: bool) -> String {
    JwtAuth::new(SECRET, Duration::hours(1))
        .issue(&Identity { username: username.into(), is_admin })
        .unwrap()
}

/// Token for `u1`, a regular user.
pub fn u1_token() -> String {
    token("u1", false)
}

/// Token for `a1`, an admin.
pub fn a1_token() -> String {
    token("a1", true)
}

/// Fire one request at `app`; returns the status and the body as JSON
/// (non-JSON bodies come back as a JSON string).
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}
