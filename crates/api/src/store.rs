//! The persistence seam the handlers talk to.
//!
//! Production wires the Postgres pool in; router tests plug in an in-memory
//! implementation.

use async_trait::async_trait;

use db::{repository::jobs, DbError, DbPool, JobFilter, JobRow, JobUpdate, NewJob};

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create(&self, job: NewJob) -> Result<JobRow, DbError>;

    async fn find_all(&self) -> Result<Vec<JobRow>, DbError>;

    /// Jobs matching every filter; `DbError::NotFound` when none do.
    async fn find_filtered(&self, filters: &[JobFilter]) -> Result<Vec<JobRow>, DbError>;

    async fn get(&self, id: i32) -> Result<JobRow, DbError>;

    async fn update(&self, id: i32, data: JobUpdate) -> Result<JobRow, DbError>;

    async fn remove(&self, id: i32) -> Result<(), DbError>;

    /// Cheap round trip for the health probe.
    async fn ping(&self) -> Result<(), DbError>;
}

#[async_trait]
impl JobStore for DbPool {
    async fn create(&self, job: NewJob) -> Result<JobRow, DbError> {
        jobs::create_job(self, job).await
    }

    async fn find_all(&self) -> Result<Vec<JobRow>, DbError> {
        jobs::list_jobs(self).await
    }

    async fn find_filtered(&self, filters: &[JobFilter]) -> Result<Vec<JobRow>, DbError> {
        jobs::find_filtered(self, filters).await
    }

    async fn get(&self, id: i32) -> Result<JobRow, DbError> {
        jobs::get_job(self, id).await
    }

    async fn update(&self, id: i32, data: JobUpdate) -> Result<JobRow, DbError> {
        jobs::update_job(self, id, data).await
    }

    async fn remove(&self, id: i32) -> Result<(), DbError> {
        jobs::delete_job(self, id).await
    }

    async fn ping(&self) -> Result<(), DbError> {
        db::pool::ping(self).await
    }
}
