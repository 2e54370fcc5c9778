//! Job storage.
//!
//! The job table is an explicit store owned by app state and passed by handle,
//! never ambient global state. Transitions go through methods so the
//! status/result invariants hold by construction.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::job::{Job, JobStatus};
use crate::verification::KnowledgeObject;

/// Storage interface for jobs.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a new job record.
    async fn insert(&self, job: Job) -> Result<()>;

    /// Fetch a job by id.
    async fn get(&self, id: Uuid) -> Result<Option<Job>>;

    /// Transition a pending job to running.
    async fn mark_running(&self, id: Uuid) -> Result<()>;

    /// Transition a job to completed with its knowledge object.
    async fn complete(&self, id: Uuid, result: KnowledgeObject) -> Result<()>;

    /// Transition a job to failed with an error message.
    async fn fail(&self, id: Uuid, error: String) -> Result<()>;
}

/// In-memory job store.
///
/// Contents are lost on restart; fine for the phase-1 single-process agent.
pub struct MemoryJobStore {
    jobs: RwLock<HashMap<Uuid, Job>>,
}

impl MemoryJobStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of jobs tracked.
    pub fn job_count(&self) -> usize {
        self.jobs.read().unwrap().len()
    }

    fn update<F>(&self, id: Uuid, f: F) -> Result<()>
    where
        F: FnOnce(&mut Job) -> Result<()>,
    {
        let mut jobs = self.jobs.write().unwrap();
        let job = match jobs.get_mut(&id) {
            Some(job) => job,
            None => bail!("unknown job id: {}", id),
        };
        f(job)?;
        job.updated_at = Utc::now();
        Ok(())
    }
}

impl Default for MemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn insert(&self, job: Job) -> Result<()> {
        self.jobs.write().unwrap().insert(job.id, job);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Job>> {
        Ok(self.jobs.read().unwrap().get(&id).cloned())
    }

    async fn mark_running(&self, id: Uuid) -> Result<()> {
        self.update(id, |job| {
            if job.status.is_terminal() {
                bail!("job {} already terminal ({:?})", id, job.status);
            }
            job.status = JobStatus::Running;
            Ok(())
        })
    }

    async fn complete(&self, id: Uuid, result: KnowledgeObject) -> Result<()> {
        self.update(id, |job| {
            if job.status.is_terminal() {
                bail!("job {} already terminal ({:?})", id, job.status);
            }
            job.status = JobStatus::Completed;
            job.result = Some(result);
            job.error_message = None;
            Ok(())
        })
    }

    async fn fail(&self, id: Uuid, error: String) -> Result<()> {
        self.update(id, |job| {
            if job.status.is_terminal() {
                bail!("job {} already terminal ({:?})", id, job.status);
            }
            job.status = JobStatus::Failed;
            job.result = None;
            job.error_message = Some(error);
            Ok(())
        })
    }
}
