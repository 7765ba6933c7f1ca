use std::fmt;

use super::domain::{ApplicationStatus, Candidate, Job};

const EXPERIENCE_WEIGHT: f64 = 2.0;
const LANGUAGE_DIVISOR: f64 = 10.0;
const VERIFIED_DOCUMENTS_BONUS: f64 = 10.0;

/// Merit score recorded on the application: `experience * 2 + languageScore / 10 + 10`
/// when documents are verified.
pub fn eligibility_score(candidate: &Candidate) -> f64 {
    let bonus = if candidate.documents_verified {
        VERIFIED_DOCUMENTS_BONUS
    } else {
        0.0
    };
    candidate.experience * EXPERIENCE_WEIGHT + candidate.language_score / LANGUAGE_DIVISOR + bonus
}

/// A job threshold the candidate does not meet.
#[derive(Debug, Clone, PartialEq)]
pub enum EligibilityGap {
    Experience { required: f64, actual: f64 },
    LanguageScore { required: f64, actual: f64 },
    DocumentsUnverified,
}

impl fmt::Display for EligibilityGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityGap::Experience { required, actual } => {
                write!(f, "experience {actual} below required {required}")
            }
            EligibilityGap::LanguageScore { required, actual } => {
                write!(f, "language score {actual} below required {required}")
            }
            EligibilityGap::DocumentsUnverified => f.write_str("documents not verified"),
        }
    }
}

/// Score plus every unmet threshold for one candidate/job pair.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityAssessment {
    pub score: f64,
    pub gaps: Vec<EligibilityGap>,
}

impl EligibilityAssessment {
    /// Eligible only when every threshold holds; the score never compensates.
    pub fn is_eligible(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn initial_status(&self) -> ApplicationStatus {
        if self.is_eligible() {
            ApplicationStatus::Eligible
        } else {
            ApplicationStatus::Rejected
        }
    }
}

pub fn assess(candidate: &Candidate, job: &Job) -> EligibilityAssessment {
    let mut gaps = Vec::new();

    if candidate.experience < job.min_experience {
        gaps.push(EligibilityGap::Experience {
            required: job.min_experience,
            actual: candidate.experience,
        });
    }
    if candidate.language_score < job.min_language_score {
        gaps.push(EligibilityGap::LanguageScore {
            required: job.min_language_score,
            actual: candidate.language_score,
        });
    }
    if !candidate.documents_verified {
        gaps.push(EligibilityGap::DocumentsUnverified);
    }

    EligibilityAssessment {
        score: eligibility_score(candidate),
        gaps,
    }
}
