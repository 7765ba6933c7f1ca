use std::sync::Arc;

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::recruitment::domain::{
    Application, ApplicationStatus, ApplicationWithCandidate, Candidate, Job, NewApplication,
    NewCandidate, NewJob, RecordId,
};
use crate::workflows::recruitment::repository::{Collection, RecordStore, RepositoryError};
use crate::workflows::recruitment::{MemoryRecordStore, RecruitmentService};

pub(super) fn new_candidate(experience: f64, language_score: f64, verified: bool) -> NewCandidate {
    NewCandidate {
        name: "Anil Kumar".to_string(),
        skill: "plumbing".to_string(),
        experience,
        language_score,
        documents_verified: verified,
    }
}

pub(super) fn new_job(min_experience: f64, min_language_score: f64) -> NewJob {
    NewJob {
        title: "Pipe fitter".to_string(),
        country: "Japan".to_string(),
        min_experience,
        min_language_score,
    }
}

pub(super) fn stored_candidate(
    experience: f64,
    language_score: f64,
    verified: bool,
) -> Candidate {
    let candidate = new_candidate(experience, language_score, verified);
    Candidate {
        id: RecordId::generate(),
        name: candidate.name,
        skill: candidate.skill,
        experience: candidate.experience,
        language_score: candidate.language_score,
        documents_verified: candidate.documents_verified,
        created_at: Utc::now(),
    }
}

pub(super) fn stored_job(min_experience: f64, min_language_score: f64) -> Job {
    let job = new_job(min_experience, min_language_score);
    Job {
        id: RecordId::generate(),
        title: job.title,
        country: job.country,
        min_experience: job.min_experience,
        min_language_score: job.min_language_score,
        created_at: Utc::now(),
    }
}

pub(super) fn build_service() -> (Arc<RecruitmentService<MemoryRecordStore>>, MemoryRecordStore) {
    let store = MemoryRecordStore::new();
    let service = Arc::new(RecruitmentService::new(Arc::new(store.clone())));
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}

/// Store whose every call fails, to exercise the 500 path.
pub(super) struct UnavailableStore;

impl UnavailableStore {
    fn down<T>() -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }
}

impl RecordStore for UnavailableStore {
    fn insert_candidate(&self, _: NewCandidate) -> Result<Candidate, RepositoryError> {
        Self::down()
    }

    fn insert_job(&self, _: NewJob) -> Result<Job, RepositoryError> {
        Self::down()
    }

    fn insert_application(&self, _: NewApplication) -> Result<Application, RepositoryError> {
        Self::down()
    }

    fn candidate(&self, _: &RecordId) -> Result<Option<Candidate>, RepositoryError> {
        Self::down()
    }

    fn job(&self, _: &RecordId) -> Result<Option<Job>, RepositoryError> {
        Self::down()
    }

    fn application(&self, _: &RecordId) -> Result<Option<Application>, RepositoryError> {
        Self::down()
    }

    fn exists(&self, _: Collection, _: &RecordId) -> Result<bool, RepositoryError> {
        Self::down()
    }

    fn applications_for_job(
        &self,
        _: &RecordId,
    ) -> Result<Vec<ApplicationWithCandidate>, RepositoryError> {
        Self::down()
    }

    fn update_status_if(
        &self,
        _: &RecordId,
        _: ApplicationStatus,
        _: ApplicationStatus,
    ) -> Result<Option<Application>, RepositoryError> {
        Self::down()
    }
}

/// Store that reports an application as eligible but loses every conditional update, as if
/// a concurrent request shortlisted it first.
#[derive(Default)]
pub(super) struct RacingStore {
    pub(super) inner: MemoryRecordStore,
}

impl RecordStore for RacingStore {
    fn insert_candidate(&self, candidate: NewCandidate) -> Result<Candidate, RepositoryError> {
        self.inner.insert_candidate(candidate)
    }

    fn insert_job(&self, job: NewJob) -> Result<Job, RepositoryError> {
        self.inner.insert_job(job)
    }

    fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, RepositoryError> {
        self.inner.insert_application(application)
    }

    fn candidate(&self, id: &RecordId) -> Result<Option<Candidate>, RepositoryError> {
        self.inner.candidate(id)
    }

    fn job(&self, id: &RecordId) -> Result<Option<Job>, RepositoryError> {
        self.inner.job(id)
    }

    fn application(&self, id: &RecordId) -> Result<Option<Application>, RepositoryError> {
        self.inner.application(id)
    }

    fn exists(&self, collection: Collection, id: &RecordId) -> Result<bool, RepositoryError> {
        self.inner.exists(collection, id)
    }

    fn applications_for_job(
        &self,
        job_id: &RecordId,
    ) -> Result<Vec<ApplicationWithCandidate>, RepositoryError> {
        self.inner.applications_for_job(job_id)
    }

    fn update_status_if(
        &self,
        _: &RecordId,
        _: ApplicationStatus,
        _: ApplicationStatus,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(None)
    }
}
