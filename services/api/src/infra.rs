use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use study_advisor::workflows::advising::{
    AdvisingConfig, AdvisingSessionService, ReferenceCatalog, RepositoryError, SessionId,
    SessionRecord, SessionRepository,
};

/// How long a finished session stays readable through the status endpoint.
pub(crate) const FINISHED_SESSION_RETENTION: Duration = Duration::from_secs(15 * 60);

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session store; sessions are lost on restart.
///
/// Open sessions are kept until they finish. Finished sessions are dropped on
/// the next insert once they are older than the retention window.
#[derive(Clone)]
pub(crate) struct InMemorySessionRepository {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
    retention: Duration,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::with_retention(FINISHED_SESSION_RETENTION)
    }
}

impl InMemorySessionRepository {
    pub(crate) fn with_retention(retention: Duration) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            retention,
        }
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("session store lock poisoned".to_string())
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        guard.retain(|_, stored| !stored.expired(self.retention));
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord, expected_revision: u64) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        let found = guard
            .get(&record.session_id)
            .map(|stored| stored.revision)
            .ok_or(RepositoryError::NotFound)?;
        if found != expected_revision {
            return Err(RepositoryError::Stale {
                expected: expected_revision,
                found,
            });
        }
        guard.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }
}

pub(crate) fn session_service(
    catalog: Arc<ReferenceCatalog>,
) -> AdvisingSessionService<InMemorySessionRepository> {
    AdvisingSessionService::new(
        Arc::new(InMemorySessionRepository::default()),
        AdvisingConfig::default(),
        catalog,
    )
}
