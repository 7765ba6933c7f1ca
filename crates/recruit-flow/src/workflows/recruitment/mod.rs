//! Candidate and job intake, application eligibility, ranking, and shortlisting.
//!
//! An application is scored once when created and receives `ELIGIBLE` or `REJECTED` from a
//! strict threshold check against the job. Eligible applications may later be shortlisted,
//! which is the only status transition and is applied through the store's conditional update.

pub mod admission;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use admission::{
    ApplicationRequest, ApplicationSubmission, CandidateSubmission, JobSubmission,
    ValidationError,
};
pub use domain::{
    Application, ApplicationStatus, ApplicationWithCandidate, Candidate, Job, NewApplication,
    NewCandidate, NewJob, RecordId,
};
pub use repository::{Collection, RecordStore, RepositoryError};
pub use router::recruitment_router;
pub use scoring::{EligibilityAssessment, EligibilityGap};
pub use service::{RecruitmentError, RecruitmentService};
pub use store::MemoryRecordStore;
