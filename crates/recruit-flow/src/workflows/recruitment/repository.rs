use std::fmt;

use super::domain::{
    Application, ApplicationStatus, ApplicationWithCandidate, Candidate, Job, NewApplication,
    NewCandidate, NewJob, RecordId,
};

/// Named record collections, for existence checks that skip the full fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Candidates,
    Jobs,
    Applications,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Candidates => "candidates",
            Collection::Jobs => "jobs",
            Collection::Applications => "applications",
        };
        f.write_str(name)
    }
}

/// Persistence contract the recruitment workflow relies on.
///
/// Stores assign identifiers and creation timestamps. `applications_for_job` must return rows
/// ordered by status rank, then score descending, then candidate experience descending.
/// `update_status_if` must check and write in one atomic step.
pub trait RecordStore: Send + Sync {
    fn insert_candidate(&self, candidate: NewCandidate) -> Result<Candidate, RepositoryError>;
    fn insert_job(&self, job: NewJob) -> Result<Job, RepositoryError>;
    fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, RepositoryError>;

    fn candidate(&self, id: &RecordId) -> Result<Option<Candidate>, RepositoryError>;
    fn job(&self, id: &RecordId) -> Result<Option<Job>, RepositoryError>;
    fn application(&self, id: &RecordId) -> Result<Option<Application>, RepositoryError>;
    fn exists(&self, collection: Collection, id: &RecordId) -> Result<bool, RepositoryError>;

    fn applications_for_job(
        &self,
        job_id: &RecordId,
    ) -> Result<Vec<ApplicationWithCandidate>, RepositoryError>;

    /// Sets `next` only while the stored status still equals `expected`.
    /// Returns `Ok(None)` when the record is absent or its status differs.
    fn update_status_if(
        &self,
        id: &RecordId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Option<Application>, RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record {id} already exists in {collection}")]
    Conflict { collection: Collection, id: RecordId },
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
