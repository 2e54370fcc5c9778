//! Job tracking for the verification pipeline.

pub mod job;
pub mod store;

pub use job::{Job, JobInput, JobStatus};
pub use store::{JobStore, MemoryJobStore};
