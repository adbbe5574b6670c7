use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::advising::config::AdvisingConfig;
use crate::workflows::advising::domain::{ApplicantProfile, BudgetCategory, LanguageLevel};
use crate::workflows::advising::intake::{IntakeMachine, IntakeState, Transition};
use crate::workflows::advising::recommendation::ReferenceCatalog;
use crate::workflows::advising::repository::{
    RepositoryError, SessionId, SessionRecord, SessionRepository,
};
use crate::workflows::advising::service::AdvisingSessionService;

pub(super) fn machine() -> IntakeMachine {
    IntakeMachine::new(
        Arc::new(AdvisingConfig::default()),
        Arc::new(ReferenceCatalog::built_in()),
    )
}

/// Feed answers in order, returning the last transition and the accumulated profile.
pub(super) fn drive(machine: &IntakeMachine, answers: &[&str]) -> (Transition, ApplicantProfile) {
    let mut profile = ApplicantProfile::default();
    let mut transition = machine.start();
    for answer in answers {
        transition = machine.advance(transition.state, &mut profile, answer);
    }
    (transition, profile)
}

pub(super) fn complete_profile(
    age: u8,
    major: &str,
    degree: &str,
    gpa: f64,
    language_level: LanguageLevel,
    preferred_country: &str,
) -> ApplicantProfile {
    ApplicantProfile {
        age: Some(age),
        major: Some(major.to_string()),
        degree: Some(degree.to_string()),
        bachelor_field: None,
        master_field: None,
        gpa: Some(gpa),
        language_level: Some(language_level),
        budget: Some("More than 3 billion tomans".to_string()),
        budget_category: Some(BudgetCategory::High),
        preferred_country: Some(preferred_country.to_string()),
    }
}

/// Answers for a master's graduate who ends up eligible with a Canadian preference.
pub(super) const ELIGIBLE_MASTER_ANSWERS: [&str; 9] = [
    "30",
    "Computer Science",
    "master's degree",
    "Computer Science",
    "Computer Science",
    "16.5",
    "B2",
    "More than 3 billion tomans",
    "Canada",
];

pub(super) fn build_service() -> (
    AdvisingSessionService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AdvisingSessionService::new(
        repository.clone(),
        AdvisingConfig::default(),
        Arc::new(ReferenceCatalog::built_in()),
    );
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl MemoryRepository {
    pub(super) fn state_of(&self, id: &SessionId) -> Option<IntakeState> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .map(|record| record.state)
    }
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord, expected_revision: u64) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let stored = guard
            .get(&record.session_id)
            .ok_or(RepositoryError::NotFound)?;
        if stored.revision != expected_revision {
            return Err(RepositoryError::Stale {
                expected: expected_revision,
                found: stored.revision,
            });
        }
        guard.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: SessionRecord, _expected_revision: u64) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// Memory store whose reads stall, so concurrent writers see the same revision.
pub(super) struct SlowFetchRepository {
    pub(super) inner: MemoryRepository,
    pub(super) delay: Duration,
}

impl SessionRepository for SlowFetchRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: SessionRecord, expected_revision: u64) -> Result<(), RepositoryError> {
        self.inner.update(record, expected_revision)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let record = self.inner.fetch(id)?;
        std::thread::sleep(self.delay);
        Ok(record)
    }
}

/// Memory store where another writer always commits first.
#[derive(Default)]
pub(super) struct ContendedRepository {
    pub(super) inner: MemoryRepository,
}

impl SessionRepository for ContendedRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, _record: SessionRecord, expected_revision: u64) -> Result<(), RepositoryError> {
        Err(RepositoryError::Stale {
            expected: expected_revision,
            found: expected_revision + 1,
        })
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        self.inner.fetch(id)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
