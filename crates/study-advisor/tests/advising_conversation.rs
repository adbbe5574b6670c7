//! End-to-end conversations driven through the public session service and HTTP router.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use study_advisor::workflows::advising::{
        AdvisingConfig, AdvisingSessionService, ReferenceCatalog, RepositoryError, SessionId,
        SessionRecord, SessionRepository,
    };

    #[derive(Default)]
    pub(super) struct SharedRepository {
        records: Mutex<HashMap<SessionId, SessionRecord>>,
    }

    impl SessionRepository for SharedRepository {
        fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            if guard.contains_key(&record.session_id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.session_id.clone(), record.clone());
            Ok(record)
        }

        fn update(
            &self,
            record: SessionRecord,
            expected_revision: u64,
        ) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            match guard.get(&record.session_id).map(|stored| stored.revision) {
                None => Err(RepositoryError::NotFound),
                Some(found) if found != expected_revision => Err(RepositoryError::Stale {
                    expected: expected_revision,
                    found,
                }),
                Some(_) => {
                    guard.insert(record.session_id.clone(), record);
                    Ok(())
                }
            }
        }

        fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.get(id).cloned())
        }
    }

    pub(super) fn service() -> AdvisingSessionService<SharedRepository> {
        AdvisingSessionService::new(
            Arc::new(SharedRepository::default()),
            AdvisingConfig::default(),
            Arc::new(ReferenceCatalog::built_in()),
        )
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use study_advisor::workflows::advising::{advising_router, IntakeOutcome, IntakeState};

#[test]
fn concurrent_sessions_keep_independent_profiles() {
    let service = common::service();
    let first = service.start().expect("first").session_id;
    let second = service.start().expect("second").session_id;

    service.reply(&first, "22").expect("age");
    service.reply(&second, "44").expect("age");
    service.reply(&first, "Law").expect("major");

    let first_record = service.get(&first).expect("first record");
    let second_record = service.get(&second).expect("second record");
    assert_eq!(first_record.profile.age, Some(22));
    assert_eq!(first_record.state, IntakeState::Degree);
    assert_eq!(second_record.profile.age, Some(44));
    assert_eq!(second_record.state, IntakeState::Major);
}

#[test]
fn low_gpa_bachelor_conversation_ends_with_tips() {
    let service = common::service();
    let session = service.start().expect("session").session_id;

    let answers = [
        "25",
        "Computer Science",
        "bachelor's degree",
        "Computer Science",
        "10",
        "B2",
        "Between 2 and 3 billion tomans",
        "Netherlands",
    ];
    let mut transcripts = Vec::new();
    for answer in answers {
        transcripts.push(service.reply(&session, answer).expect("reply"));
    }

    let gpa_turn = &transcripts[4];
    assert_eq!(gpa_turn.state, IntakeState::Language);
    assert!(gpa_turn.messages[0].contains("GPA note"));

    let budget_turn = &transcripts[6];
    assert!(budget_turn.messages[0].contains("• Netherlands"));

    let last = transcripts.last().expect("final reply");
    assert_eq!(last.outcome, Some(IntakeOutcome::Assessed { eligible: false }));
    assert!(last.messages[0].contains("GPA below 13.0 out of 20"));
    assert!(last.messages[1].contains("Tips to improve your eligibility"));
}

#[tokio::test]
async fn http_conversation_disqualifies_older_associate_applicants() {
    let router = advising_router(Arc::new(common::service()));

    let started = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/sessions")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(started.status(), StatusCode::CREATED);
    let body = axum::body::to_bytes(started.into_body(), 64 * 1024)
        .await
        .expect("body");
    let started: Value = serde_json::from_slice(&body).expect("json");
    let session = started["session_id"].as_str().expect("id").to_string();

    let mut last = Value::Null;
    for answer in ["24", "Business Administration", "Associate Degree"] {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/sessions/{session}/replies"))
                    .header("content-type", "application/json")
                    .body(Body::from(json!({ "text": answer }).to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body");
        last = serde_json::from_slice(&body).expect("json");
    }

    assert_eq!(last["finished"], true);
    assert_eq!(last["outcome"]["kind"], "disqualified");
    assert!(last["messages"][0]
        .as_str()
        .expect("message")
        .contains("do not meet the requirements"));
}
