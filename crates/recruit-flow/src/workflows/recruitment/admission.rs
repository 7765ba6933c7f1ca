//! Request validation for candidate and job submissions.
//!
//! Submissions arrive as loosely typed JSON so that a wrong type (a string where a number is
//! expected, a `"true"` instead of `true`) is reported against the offending field instead of
//! as an opaque body rejection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{NewCandidate, NewJob};

const PERCENT_MAX: f64 = 100.0;

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be a number >= 0")]
    NegativeOrNotNumber { field: &'static str },
    #[error("{field} must be a number between 0 and 100")]
    OutOfPercentRange { field: &'static str },
    #[error("{field} must be boolean")]
    NotBoolean { field: &'static str },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NegativeOrNotNumber { field }
            | ValidationError::OutOfPercentRange { field }
            | ValidationError::NotBoolean { field } => field,
        }
    }
}

/// Raw candidate payload as posted by clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSubmission {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub skill: Value,
    #[serde(default)]
    pub experience: Value,
    #[serde(default)]
    pub language_score: Value,
    #[serde(default)]
    pub documents_verified: Value,
}

/// Raw job payload as posted by clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSubmission {
    #[serde(default)]
    pub title: Value,
    #[serde(default)]
    pub country: Value,
    #[serde(default)]
    pub min_experience: Value,
    #[serde(default)]
    pub min_language_score: Value,
}

/// Raw application payload; identifiers are parsed later by the workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    #[serde(default)]
    pub candidate_id: Value,
    #[serde(default)]
    pub job_id: Value,
}

/// Identifier strings extracted from an [`ApplicationSubmission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRequest {
    pub candidate_id: String,
    pub job_id: String,
}

pub fn admit_candidate(submission: &CandidateSubmission) -> Result<NewCandidate, ValidationError> {
    Ok(NewCandidate {
        name: required_text(&submission.name, "name")?,
        skill: required_text(&submission.skill, "skill")?,
        experience: non_negative(&submission.experience, "experience")?,
        language_score: percent(&submission.language_score, "languageScore")?,
        documents_verified: strict_bool(&submission.documents_verified, "documentsVerified")?,
    })
}

pub fn admit_job(submission: &JobSubmission) -> Result<NewJob, ValidationError> {
    Ok(NewJob {
        title: required_text(&submission.title, "title")?,
        country: required_text(&submission.country, "country")?,
        min_experience: non_negative(&submission.min_experience, "minExperience")?,
        min_language_score: percent(&submission.min_language_score, "minLanguageScore")?,
    })
}

pub fn admit_application(
    submission: &ApplicationSubmission,
) -> Result<ApplicationRequest, ValidationError> {
    Ok(ApplicationRequest {
        candidate_id: required_text(&submission.candidate_id, "candidateId")?,
        job_id: required_text(&submission.job_id, "jobId")?,
    })
}

/// Re-checks an already typed candidate, for callers that bypass JSON intake.
pub fn validate_candidate(candidate: &NewCandidate) -> Result<(), ValidationError> {
    check_text(&candidate.name, "name")?;
    check_text(&candidate.skill, "skill")?;
    check_non_negative(candidate.experience, "experience")?;
    check_percent(candidate.language_score, "languageScore")?;
    Ok(())
}

/// Re-checks an already typed job posting.
pub fn validate_job(job: &NewJob) -> Result<(), ValidationError> {
    check_text(&job.title, "title")?;
    check_text(&job.country, "country")?;
    check_non_negative(job.min_experience, "minExperience")?;
    check_percent(job.min_language_score, "minLanguageScore")?;
    Ok(())
}

fn required_text(value: &Value, field: &'static str) -> Result<String, ValidationError> {
    let text = value.as_str().ok_or(ValidationError::Required { field })?;
    check_text(text, field)?;
    Ok(text.to_string())
}

fn non_negative(value: &Value, field: &'static str) -> Result<f64, ValidationError> {
    let number = value
        .as_f64()
        .ok_or(ValidationError::NegativeOrNotNumber { field })?;
    check_non_negative(number, field)?;
    Ok(number)
}

fn percent(value: &Value, field: &'static str) -> Result<f64, ValidationError> {
    let number = value
        .as_f64()
        .ok_or(ValidationError::OutOfPercentRange { field })?;
    check_percent(number, field)?;
    Ok(number)
}

fn strict_bool(value: &Value, field: &'static str) -> Result<bool, ValidationError> {
    value.as_bool().ok_or(ValidationError::NotBoolean { field })
}

fn check_text(text: &str, field: &'static str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

fn check_non_negative(number: f64, field: &'static str) -> Result<(), ValidationError> {
    if !number.is_finite() || number < 0.0 {
        return Err(ValidationError::NegativeOrNotNumber { field });
    }
    Ok(())
}

fn check_percent(number: f64, field: &'static str) -> Result<(), ValidationError> {
    if !number.is_finite() || !(0.0..=PERCENT_MAX).contains(&number) {
        return Err(ValidationError::OutOfPercentRange { field });
    }
    Ok(())
}
