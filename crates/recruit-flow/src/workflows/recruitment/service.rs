use std::sync::Arc;

use tracing::{debug, info, warn};

use super::admission::{validate_candidate, validate_job, ValidationError};
use super::domain::{
    Application, ApplicationStatus, ApplicationWithCandidate, Candidate, Job, NewApplication,
    NewCandidate, NewJob, RecordId,
};
use super::repository::{Collection, RecordStore, RepositoryError};
use super::scoring;

/// Workflow facade over a [`RecordStore`]: admission, application creation, ranking, and
/// the shortlist transition.
pub struct RecruitmentService<S> {
    store: Arc<S>,
}

impl<S> Clone for RecruitmentService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> RecruitmentService<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validate and persist a candidate profile.
    pub fn create_candidate(&self, candidate: NewCandidate) -> Result<Candidate, RecruitmentError> {
        validate_candidate(&candidate)?;
        let stored = self.store.insert_candidate(candidate)?;
        debug!(candidate_id = %stored.id, "candidate stored");
        Ok(stored)
    }

    /// Validate and persist a job posting.
    pub fn create_job(&self, job: NewJob) -> Result<Job, RecruitmentError> {
        validate_job(&job)?;
        let stored = self.store.insert_job(job)?;
        debug!(job_id = %stored.id, "job stored");
        Ok(stored)
    }

    /// Score a candidate against a job and record the application with its initial status.
    pub fn create_application(
        &self,
        candidate_id: &str,
        job_id: &str,
    ) -> Result<Application, RecruitmentError> {
        let candidate_id = parse_id(candidate_id, "candidateId")?;
        let job_id = parse_id(job_id, "jobId")?;

        let candidate = self
            .store
            .candidate(&candidate_id)?
            .ok_or(RecruitmentError::NotFound { entity: "Candidate" })?;
        let job = self
            .store
            .job(&job_id)?
            .ok_or(RecruitmentError::NotFound { entity: "Job" })?;

        let assessment = scoring::assess(&candidate, &job);
        let status = assessment.initial_status();
        if !assessment.is_eligible() {
            let gaps: Vec<String> = assessment.gaps.iter().map(ToString::to_string).collect();
            debug!(%candidate_id, %job_id, ?gaps, "candidate misses job thresholds");
        }

        let stored = self.store.insert_application(NewApplication {
            candidate_id,
            job_id,
            eligibility_score: assessment.score,
            status,
        })?;

        info!(
            application_id = %stored.id,
            %candidate_id,
            %job_id,
            score = stored.eligibility_score,
            status = %stored.status,
            "application created"
        );
        Ok(stored)
    }

    /// Applications for a job with candidates inlined, ranked for review.
    pub fn list_applications_by_job(
        &self,
        job_id: &str,
    ) -> Result<Vec<ApplicationWithCandidate>, RecruitmentError> {
        let job_id = parse_id(job_id, "jobId")?;

        if !self.store.exists(Collection::Jobs, &job_id)? {
            return Err(RecruitmentError::NotFound { entity: "Job" });
        }

        Ok(self.store.applications_for_job(&job_id)?)
    }

    /// Move an `ELIGIBLE` application to `SHORTLISTED`. Repeating the call is a no-op.
    pub fn shortlist_application(&self, id: &str) -> Result<Application, RecruitmentError> {
        let id = parse_id(id, "application id")?;

        let existing = self
            .store
            .application(&id)?
            .ok_or(RecruitmentError::NotFound {
                entity: "Application",
            })?;

        if existing.status == ApplicationStatus::Shortlisted {
            debug!(application_id = %id, "application already shortlisted");
            return Ok(existing);
        }

        if !existing
            .status
            .can_transition_to(ApplicationStatus::Shortlisted)
        {
            return Err(RecruitmentError::InvalidTransition {
                current: existing.status,
            });
        }

        // The read above only shapes the error message; the guarded write decides.
        let updated = self
            .store
            .update_status_if(
                &id,
                ApplicationStatus::Eligible,
                ApplicationStatus::Shortlisted,
            )?
            .ok_or_else(|| {
                warn!(application_id = %id, "status changed between read and conditional update");
                RecruitmentError::Internal("Failed to update application status")
            })?;

        info!(application_id = %id, "application shortlisted");
        Ok(updated)
    }
}

fn parse_id(raw: &str, field: &'static str) -> Result<RecordId, RecruitmentError> {
    raw.parse()
        .map_err(|_| RecruitmentError::InvalidIdentifier { field })
}

/// Error raised by the recruitment workflow.
#[derive(Debug, thiserror::Error)]
pub enum RecruitmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid {field}")]
    InvalidIdentifier { field: &'static str },
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    #[error("Only ELIGIBLE applications can be shortlisted")]
    InvalidTransition { current: ApplicationStatus },
    #[error("{0}")]
    Internal(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
