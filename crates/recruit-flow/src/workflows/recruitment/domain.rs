use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned identifier shared by candidates, jobs, and applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Only stores mint identifiers; the workflow parses them from requests.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw.trim()).map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated candidate profile awaiting storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCandidate {
    pub name: String,
    pub skill: String,
    pub experience: f64,
    pub language_score: f64,
    pub documents_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: RecordId,
    pub name: String,
    pub skill: String,
    /// Years of experience.
    pub experience: f64,
    /// Language proficiency on a 0-100 scale.
    pub language_score: f64,
    pub documents_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Validated job posting awaiting storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub country: String,
    pub min_experience: f64,
    pub min_language_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: RecordId,
    pub title: String,
    pub country: String,
    pub min_experience: f64,
    pub min_language_score: f64,
    pub created_at: DateTime<Utc>,
}

/// Application fields fixed at creation; the store adds id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub candidate_id: RecordId,
    pub job_id: RecordId,
    pub eligibility_score: f64,
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: RecordId,
    pub candidate_id: RecordId,
    pub job_id: RecordId,
    pub eligibility_score: f64,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Listing row: the application with its candidate inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationWithCandidate {
    #[serde(flatten)]
    pub application: Application,
    pub candidate: Candidate,
}

/// Lifecycle of an application.
///
/// `Eligible` and `Rejected` are decided at creation. The only transition is
/// `Eligible -> Shortlisted`; `Rejected` and `Shortlisted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Eligible,
    Rejected,
    Shortlisted,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Eligible => "ELIGIBLE",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Shortlisted => "SHORTLISTED",
        }
    }

    /// Position in job listings: pending work first, finished work last.
    pub const fn listing_rank(self) -> u8 {
        match self {
            ApplicationStatus::Eligible => 0,
            ApplicationStatus::Rejected => 1,
            ApplicationStatus::Shortlisted => 2,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Rejected | ApplicationStatus::Shortlisted
        )
    }

    pub const fn can_transition_to(self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (ApplicationStatus::Eligible, ApplicationStatus::Shortlisted)
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_rejects_malformed_input() {
        assert!("not-an-id".parse::<RecordId>().is_err());
        assert!("".parse::<RecordId>().is_err());

        let id = RecordId::generate();
        let parsed: RecordId = format!(" {id} ").parse().expect("round trips");
        assert_eq!(parsed, id);
    }

    #[test]
    fn only_eligible_can_be_shortlisted() {
        use ApplicationStatus::*;
        assert!(Eligible.can_transition_to(Shortlisted));
        for from in [Rejected, Shortlisted] {
            assert!(from.is_terminal());
            for to in [Eligible, Rejected, Shortlisted] {
                assert!(!from.can_transition_to(to), "{from} -> {to}");
            }
        }
        assert!(!Eligible.can_transition_to(Rejected));
    }

    #[test]
    fn statuses_serialize_in_upper_case() {
        let json = serde_json::to_string(&ApplicationStatus::Shortlisted).expect("serializes");
        assert_eq!(json, "\"SHORTLISTED\"");
    }

    #[test]
    fn listing_row_flattens_application_fields() {
        let candidate = Candidate {
            id: RecordId::generate(),
            name: "Asha".to_string(),
            skill: "welding".to_string(),
            experience: 4.0,
            language_score: 72.0,
            documents_verified: true,
            created_at: Utc::now(),
        };
        let application = Application {
            id: RecordId::generate(),
            candidate_id: candidate.id,
            job_id: RecordId::generate(),
            eligibility_score: 25.2,
            status: ApplicationStatus::Eligible,
            created_at: Utc::now(),
        };
        let row = ApplicationWithCandidate {
            application,
            candidate,
        };

        let value = serde_json::to_value(&row).expect("serializes");
        assert_eq!(value["status"], "ELIGIBLE");
        assert_eq!(value["eligibilityScore"], 25.2);
        assert_eq!(value["candidate"]["languageScore"], 72.0);
        assert!(value.get("statusRank").is_none());
    }
}
