use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::domain::{
    Application, ApplicationStatus, ApplicationWithCandidate, Candidate, Job, NewApplication,
    NewCandidate, NewJob, RecordId,
};
use super::repository::{Collection, RecordStore, RepositoryError};

#[derive(Debug, Default)]
struct Collections {
    candidates: HashMap<RecordId, Candidate>,
    jobs: HashMap<RecordId, Job>,
    applications: HashMap<RecordId, Application>,
}

/// Process-local store. A single lock covers all collections, so joined reads see one
/// snapshot and conditional updates are atomic.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecordStore {
    inner: Arc<Mutex<Collections>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, RepositoryError> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::Unavailable("record store lock poisoned".to_string()))
    }
}

fn vacant<T>(
    map: &HashMap<RecordId, T>,
    collection: Collection,
) -> Result<RecordId, RepositoryError> {
    let id = RecordId::generate();
    if map.contains_key(&id) {
        return Err(RepositoryError::Conflict { collection, id });
    }
    Ok(id)
}

impl RecordStore for MemoryRecordStore {
    fn insert_candidate(&self, candidate: NewCandidate) -> Result<Candidate, RepositoryError> {
        let mut guard = self.lock()?;
        let id = vacant(&guard.candidates, Collection::Candidates)?;
        let record = Candidate {
            id,
            name: candidate.name,
            skill: candidate.skill,
            experience: candidate.experience,
            language_score: candidate.language_score,
            documents_verified: candidate.documents_verified,
            created_at: Utc::now(),
        };
        guard.candidates.insert(id, record.clone());
        Ok(record)
    }

    fn insert_job(&self, job: NewJob) -> Result<Job, RepositoryError> {
        let mut guard = self.lock()?;
        let id = vacant(&guard.jobs, Collection::Jobs)?;
        let record = Job {
            id,
            title: job.title,
            country: job.country,
            min_experience: job.min_experience,
            min_language_score: job.min_language_score,
            created_at: Utc::now(),
        };
        guard.jobs.insert(id, record.clone());
        Ok(record)
    }

    fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, RepositoryError> {
        let mut guard = self.lock()?;
        let id = vacant(&guard.applications, Collection::Applications)?;
        let record = Application {
            id,
            candidate_id: application.candidate_id,
            job_id: application.job_id,
            eligibility_score: application.eligibility_score,
            status: application.status,
            created_at: Utc::now(),
        };
        guard.applications.insert(id, record.clone());
        Ok(record)
    }

    fn candidate(&self, id: &RecordId) -> Result<Option<Candidate>, RepositoryError> {
        Ok(self.lock()?.candidates.get(id).cloned())
    }

    fn job(&self, id: &RecordId) -> Result<Option<Job>, RepositoryError> {
        Ok(self.lock()?.jobs.get(id).cloned())
    }

    fn application(&self, id: &RecordId) -> Result<Option<Application>, RepositoryError> {
        Ok(self.lock()?.applications.get(id).cloned())
    }

    fn exists(&self, collection: Collection, id: &RecordId) -> Result<bool, RepositoryError> {
        let guard = self.lock()?;
        let found = match collection {
            Collection::Candidates => guard.candidates.contains_key(id),
            Collection::Jobs => guard.jobs.contains_key(id),
            Collection::Applications => guard.applications.contains_key(id),
        };
        Ok(found)
    }

    fn applications_for_job(
        &self,
        job_id: &RecordId,
    ) -> Result<Vec<ApplicationWithCandidate>, RepositoryError> {
        let guard = self.lock()?;
        let mut rows: Vec<ApplicationWithCandidate> = guard
            .applications
            .values()
            .filter(|application| application.job_id == *job_id)
            .filter_map(|application| {
                guard
                    .candidates
                    .get(&application.candidate_id)
                    .map(|candidate| ApplicationWithCandidate {
                        application: application.clone(),
                        candidate: candidate.clone(),
                    })
            })
            .collect();
        drop(guard);

        rows.sort_by(listing_order);
        Ok(rows)
    }

    fn update_status_if(
        &self,
        id: &RecordId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Option<Application>, RepositoryError> {
        let mut guard = self.lock()?;
        match guard.applications.get_mut(id) {
            Some(application) if application.status == expected => {
                application.status = next;
                Ok(Some(application.clone()))
            }
            _ => Ok(None),
        }
    }
}

/// Listing order: status rank ascending, then eligibility score and candidate experience
/// descending.
pub fn listing_order(
    left: &ApplicationWithCandidate,
    right: &ApplicationWithCandidate,
) -> Ordering {
    left.application
        .status
        .listing_rank()
        .cmp(&right.application.status.listing_rank())
        .then_with(|| {
            right
                .application
                .eligibility_score
                .total_cmp(&left.application.eligibility_score)
        })
        .then_with(|| {
            right
                .candidate
                .experience
                .total_cmp(&left.candidate.experience)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(store: &MemoryRecordStore, name: &str, experience: f64) -> Candidate {
        store
            .insert_candidate(NewCandidate {
                name: name.to_string(),
                skill: "electrician".to_string(),
                experience,
                language_score: 80.0,
                documents_verified: true,
            })
            .expect("candidate stored")
    }

    fn job(store: &MemoryRecordStore) -> Job {
        store
            .insert_job(NewJob {
                title: "Site electrician".to_string(),
                country: "Germany".to_string(),
                min_experience: 1.0,
                min_language_score: 50.0,
            })
            .expect("job stored")
    }

    fn apply(
        store: &MemoryRecordStore,
        candidate: &Candidate,
        job: &Job,
        score: f64,
        status: ApplicationStatus,
    ) -> Application {
        store
            .insert_application(NewApplication {
                candidate_id: candidate.id,
                job_id: job.id,
                eligibility_score: score,
                status,
            })
            .expect("application stored")
    }

    #[test]
    fn insert_assigns_identifier_and_timestamp() {
        let store = MemoryRecordStore::new();
        let before = Utc::now();
        let stored = candidate(&store, "Ravi", 3.0);

        assert!(stored.created_at >= before);
        assert_eq!(store.candidate(&stored.id).expect("read"), Some(stored.clone()));
        assert!(store
            .exists(Collection::Candidates, &stored.id)
            .expect("exists"));
        assert!(!store.exists(Collection::Jobs, &stored.id).expect("exists"));
    }

    #[test]
    fn lookups_of_unknown_ids_return_none() {
        let store = MemoryRecordStore::new();
        let id = RecordId::generate();
        assert!(store.candidate(&id).expect("read").is_none());
        assert!(store.job(&id).expect("read").is_none());
        assert!(store.application(&id).expect("read").is_none());
    }

    #[test]
    fn conditional_update_only_applies_on_expected_status() {
        let store = MemoryRecordStore::new();
        let c = candidate(&store, "Meera", 2.0);
        let j = job(&store);
        let eligible = apply(&store, &c, &j, 24.0, ApplicationStatus::Eligible);
        let rejected = apply(&store, &c, &j, 8.0, ApplicationStatus::Rejected);

        let updated = store
            .update_status_if(
                &eligible.id,
                ApplicationStatus::Eligible,
                ApplicationStatus::Shortlisted,
            )
            .expect("update runs")
            .expect("status matched");
        assert_eq!(updated.status, ApplicationStatus::Shortlisted);
        assert_eq!(updated.eligibility_score, eligible.eligibility_score);

        let second = store
            .update_status_if(
                &eligible.id,
                ApplicationStatus::Eligible,
                ApplicationStatus::Shortlisted,
            )
            .expect("update runs");
        assert!(second.is_none());

        let untouched = store
            .update_status_if(
                &rejected.id,
                ApplicationStatus::Eligible,
                ApplicationStatus::Shortlisted,
            )
            .expect("update runs");
        assert!(untouched.is_none());
        assert_eq!(
            store.application(&rejected.id).expect("read").map(|a| a.status),
            Some(ApplicationStatus::Rejected)
        );
    }

    #[test]
    fn concurrent_conditional_updates_have_one_winner() {
        let store = MemoryRecordStore::new();
        let c = candidate(&store, "Imran", 5.0);
        let j = job(&store);
        let application = apply(&store, &c, &j, 30.0, ApplicationStatus::Eligible);

        let winners: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let store = store.clone();
                    let id = application.id;
                    scope.spawn(move || {
                        store
                            .update_status_if(
                                &id,
                                ApplicationStatus::Eligible,
                                ApplicationStatus::Shortlisted,
                            )
                            .expect("update runs")
                            .is_some()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("thread completes"))
                .filter(|won| *won)
                .count()
        });

        assert_eq!(winners, 1);
    }

    #[test]
    fn listing_joins_candidates_and_sorts_by_rank_score_experience() {
        let store = MemoryRecordStore::new();
        let j = job(&store);
        let other_job = job(&store);

        let a = candidate(&store, "A", 3.0);
        let b = candidate(&store, "B", 5.0);
        let c = candidate(&store, "C", 9.0);
        let d = candidate(&store, "D", 1.0);

        apply(&store, &a, &j, 50.0, ApplicationStatus::Eligible);
        apply(&store, &c, &j, 90.0, ApplicationStatus::Rejected);
        apply(&store, &d, &j, 10.0, ApplicationStatus::Shortlisted);
        apply(&store, &b, &j, 50.0, ApplicationStatus::Eligible);
        apply(&store, &a, &other_job, 99.0, ApplicationStatus::Eligible);

        let rows = store.applications_for_job(&j.id).expect("listing");
        let names: Vec<&str> = rows.iter().map(|row| row.candidate.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C", "D"]);
        assert!(rows.iter().all(|row| row.application.job_id == j.id));
        assert!(rows
            .iter()
            .all(|row| row.application.candidate_id == row.candidate.id));
    }

    #[test]
    fn listing_skips_applications_without_candidate() {
        let store = MemoryRecordStore::new();
        let j = job(&store);
        store
            .insert_application(NewApplication {
                candidate_id: RecordId::generate(),
                job_id: j.id,
                eligibility_score: 12.0,
                status: ApplicationStatus::Rejected,
            })
            .expect("stored");

        assert!(store.applications_for_job(&j.id).expect("listing").is_empty());
    }
}
