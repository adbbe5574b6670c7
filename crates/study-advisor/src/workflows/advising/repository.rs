use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::ApplicantProfile;
use super::intake::{IntakeOutcome, IntakeState};

/// Identifier wrapper for intake sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Conversation state owned by exactly one applicant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub state: IntakeState,
    pub profile: ApplicantProfile,
    pub outcome: Option<IntakeOutcome>,
    /// Bumped on every stored transition; writes carry the revision they were read at.
    pub revision: u64,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(session_id: SessionId, state: IntakeState, now: DateTime<Utc>) -> Self {
        Self {
            session_id,
            state,
            profile: ApplicantProfile::default(),
            outcome: None,
            revision: 0,
            started_at: now,
            updated_at: now,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Finished at least `retention` ago. Open sessions never expire.
    pub fn expired(&self, retention: std::time::Duration) -> bool {
        if !self.is_finished() {
            return false;
        }
        chrono::Duration::from_std(retention)
            .map(|retention| Utc::now() - self.updated_at >= retention)
            .unwrap_or(false)
    }

    pub fn status_view(&self) -> SessionStatusView {
        SessionStatusView {
            session_id: self.session_id.clone(),
            state: self.state.label(),
            outcome: self.outcome.map(IntakeOutcome::label),
            profile: self.profile.clone(),
            started_at: self.started_at,
            updated_at: self.updated_at,
        }
    }
}

/// Storage abstraction so the service can be exercised without a transport.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    /// Replace the stored record only if it is still at `expected_revision`.
    fn update(&self, record: SessionRecord, expected_revision: u64) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session changed concurrently (expected revision {expected}, found {found})")]
    Stale { expected: u64, found: u64 },
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Externally visible snapshot of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusView {
    pub session_id: SessionId,
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
    pub profile: ApplicantProfile,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
