use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use super::config::AdvisingConfig;
use super::domain::{ApplicantProfile, ProfileError};
use super::intake::{Assessment, IntakeMachine, IntakeOutcome, IntakeState, Transition};
use super::recommendation::ReferenceCatalog;
use super::repository::{RepositoryError, SessionId, SessionRecord, SessionRepository};

/// Service running intake sessions on top of a session repository.
pub struct AdvisingSessionService<R> {
    machine: Arc<IntakeMachine>,
    repository: Arc<R>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

/// Rendered output of one turn, ready for any transport.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReply {
    pub session_id: SessionId,
    pub state: IntakeState,
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<IntakeOutcome>,
    pub messages: Vec<String>,
}

impl<R> AdvisingSessionService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: AdvisingConfig, catalog: Arc<ReferenceCatalog>) -> Self {
        let machine = Arc::new(IntakeMachine::new(Arc::new(config), catalog));
        Self::with_machine(machine, repository)
    }

    pub fn with_machine(machine: Arc<IntakeMachine>, repository: Arc<R>) -> Self {
        Self {
            machine,
            repository,
        }
    }

    pub fn machine(&self) -> &IntakeMachine {
        &self.machine
    }

    /// Open a new session and return the welcome and first prompt.
    pub fn start(&self) -> Result<SessionReply, SessionServiceError> {
        let transition = self.machine.start();
        let record = SessionRecord::new(next_session_id(), transition.state, Utc::now());
        let stored = self.repository.insert(record)?;

        info!(session_id = %stored.session_id, "intake session started");
        Ok(self.reply_for(&stored, transition))
    }

    /// Feed one applicant answer to the session's current state.
    pub fn reply(
        &self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<SessionReply, SessionServiceError> {
        let mut record = self.open_session(session_id)?;

        let from = record.state;
        let transition = self.machine.advance(from, &mut record.profile, text);
        debug!(session_id = %session_id, %from, to = %transition.state, "intake transition");

        self.store(&mut record, &transition)?;
        Ok(self.reply_for(&record, transition))
    }

    /// Cancel an in-flight session; no evaluation is produced.
    pub fn cancel(&self, session_id: &SessionId) -> Result<SessionReply, SessionServiceError> {
        let mut record = self.open_session(session_id)?;
        let transition = self.machine.cancel();

        self.store(&mut record, &transition)?;
        Ok(self.reply_for(&record, transition))
    }

    pub fn get(&self, session_id: &SessionId) -> Result<SessionRecord, SessionServiceError> {
        let record = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Assess a profile supplied in one piece instead of through a conversation.
    pub fn assess(&self, profile: &ApplicantProfile) -> Result<Assessment, SessionServiceError> {
        profile.check_invariants()?;
        Ok(self.machine.assess(profile))
    }

    pub fn help(&self) -> String {
        super::intake::prompts::help_text(self.machine.config())
    }

    fn open_session(&self, session_id: &SessionId) -> Result<SessionRecord, SessionServiceError> {
        let record = self.get(session_id)?;
        if record.is_finished() {
            return Err(SessionServiceError::Finished(session_id.clone()));
        }
        Ok(record)
    }

    fn store(
        &self,
        record: &mut SessionRecord,
        transition: &Transition,
    ) -> Result<(), SessionServiceError> {
        let expected_revision = record.revision;
        record.state = transition.state;
        record.revision += 1;
        record.updated_at = Utc::now();
        if let Some(outcome) = transition.outcome {
            record.outcome = Some(outcome);
            info!(session_id = %record.session_id, outcome = outcome.label(), "intake session finished");
        }
        self.repository.update(record.clone(), expected_revision)?;
        Ok(())
    }

    fn reply_for(&self, record: &SessionRecord, transition: Transition) -> SessionReply {
        SessionReply {
            session_id: record.session_id.clone(),
            state: transition.state,
            finished: transition.state.is_terminal(),
            outcome: transition.outcome,
            messages: transition
                .messages
                .iter()
                .map(|message| self.machine.render(message))
                .collect(),
        }
    }
}

/// Error raised by the session service.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("session {0} has already finished")]
    Finished(SessionId),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}
