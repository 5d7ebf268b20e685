//! Flow tests for submission and persisted-session recovery.
//!
//! These drive `SubmissionFlow` against the scriptable stub backend and the
//! in-memory session store — no server, no filesystem.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;

use printdesk_core::config::UploadRules;
use printdesk_core::error::CoreError;
use printdesk_core::types::{JobStatus, PrintMode, PrintSide, ShopId, UploadSelection};
use printdesk_core::wire::StatusRecord;
use printdesk_sync::notice::{MemoryNoticeSink, NoticeLevel};
use printdesk_sync::{MemorySessionStore, SessionStore, SubmissionError, SubmissionFlow};

use common::{selection, shop, StubBackend};

fn flow_parts(
    stub: StubBackend,
) -> (
    Arc<StubBackend>,
    Arc<MemorySessionStore>,
    Arc<MemoryNoticeSink>,
    SubmissionFlow,
) {
    let backend = Arc::new(stub);
    let store = Arc::new(MemorySessionStore::new());
    let notices = Arc::new(MemoryNoticeSink::new());
    let flow = SubmissionFlow::new(
        backend.clone(),
        store.clone(),
        notices.clone(),
        UploadRules::default(),
        ShopId::from("s-1"),
    );
    (backend, store, notices, flow)
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_selection_issues_one_upload_and_stores_the_token() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.submit_token = Some("T-42".into());
    let (backend, store, notices, mut flow) = flow_parts(stub);

    let view = flow.submit(&selection(2)).await.unwrap();

    assert_eq!(view.token.as_str(), "T-42");
    assert_eq!(view.status, JobStatus::Pending);
    assert_eq!(view.file_names, vec!["essay.pdf"]);

    // Exactly one upload request.
    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("submit s-1"));

    // Token persisted under the shop-scoped key.
    assert_eq!(store.load(&"s-1".into()).unwrap().as_str(), "T-42");

    let notes = notices.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NoticeLevel::Success);
}

#[tokio::test]
async fn empty_selection_is_rejected_before_any_network_call() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.submit_token = Some("T-1".into());
    let (backend, store, notices, mut flow) = flow_parts(stub);

    let empty = UploadSelection {
        files: vec![],
        mode: PrintMode::Color,
        side: PrintSide::Double,
        copies: 1,
    };
    let result = flow.submit(&empty).await;

    assert_matches!(
        result,
        Err(SubmissionError::Invalid(CoreError::EmptySelection))
    );
    assert!(backend.calls().is_empty());
    assert!(store.load(&"s-1".into()).is_none());
    assert_eq!(notices.drain()[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn copies_below_the_minimum_are_clamped_into_the_payload() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.submit_token = Some("T-1".into());
    let (backend, _store, _notices, mut flow) = flow_parts(stub);

    let view = flow.submit(&selection(0)).await.unwrap();

    // UploadRules::default() has min_copies == 1.
    assert_eq!(view.copies, 1);
    assert_eq!(backend.calls()[0], "submit s-1 files=1 copies=1");
}

#[tokio::test]
async fn upload_failure_leaves_prior_state_unchanged() {
    // submit_token: None scripts a 500 from the upload endpoint.
    let stub = StubBackend::new(shop("s-1"));
    let (backend, store, notices, mut flow) = flow_parts(stub);

    let result = flow.submit(&selection(2)).await;

    assert_matches!(result, Err(SubmissionError::Api(_)));
    assert_eq!(backend.calls().len(), 1);
    assert!(store.load(&"s-1".into()).is_none());
    assert_eq!(notices.drain()[0].level, NoticeLevel::Error);

    // The flow is not stuck busy — the user may retry.
    assert!(!flow.is_busy());
}

#[tokio::test]
async fn a_new_submission_overwrites_the_stored_token() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.submit_token = Some("T-first".into());
    let (backend, store, _notices, mut flow) = flow_parts(stub);

    flow.submit(&selection(1)).await.unwrap();
    assert_eq!(store.load(&"s-1".into()).unwrap().as_str(), "T-first");

    // Second submission returns the same scripted token; the point is the
    // save path runs again rather than being skipped.
    flow.submit(&selection(1)).await.unwrap();
    assert_eq!(backend.calls().len(), 2);
    assert_eq!(store.load(&"s-1".into()).unwrap().as_str(), "T-first");
}

#[tokio::test]
async fn reset_clears_the_stored_token() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.submit_token = Some("T-9".into());
    let (_backend, store, _notices, mut flow) = flow_parts(stub);

    flow.submit(&selection(1)).await.unwrap();
    assert!(store.load(&"s-1".into()).is_some());

    flow.reset();
    assert!(store.load(&"s-1".into()).is_none());
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

fn stored_status(token: &str) -> StatusRecord {
    StatusRecord {
        id: Some("j-1".into()),
        token: token.into(),
        mode: PrintMode::Color,
        side: PrintSide::Double,
        copies: 3,
        status: JobStatus::Pending,
        files: vec![],
    }
}

#[tokio::test]
async fn recovery_reproduces_server_state_without_an_upload() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.status_record = Some(stored_status("T-7"));
    let (backend, store, _notices, flow) = flow_parts(stub);

    store.save(&"s-1".into(), &"T-7".into()).unwrap();

    let view = flow.resume().await.unwrap();
    assert_eq!(view.token.as_str(), "T-7");
    assert_eq!(view.mode, PrintMode::Color);
    assert_eq!(view.side, PrintSide::Double);
    assert_eq!(view.copies, 3);
    assert_eq!(view.status, JobStatus::Pending);

    // One status fetch, zero uploads.
    assert_eq!(backend.calls(), vec!["batch_status T-7"]);
}

#[tokio::test]
async fn recovery_without_a_stored_token_stays_offline() {
    let stub = StubBackend::new(shop("s-1"));
    let (backend, _store, _notices, flow) = flow_parts(stub);

    assert!(flow.resume().await.is_none());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn failed_recovery_silently_clears_the_stored_token() {
    // status_record: None scripts a 404 for the stored token.
    let stub = StubBackend::new(shop("s-1"));
    let (_backend, store, notices, flow) = flow_parts(stub);

    store.save(&"s-1".into(), &"T-stale".into()).unwrap();

    assert!(flow.resume().await.is_none());
    assert!(store.load(&"s-1".into()).is_none());

    // Self-healing is silent — no user-facing notice.
    assert!(notices.drain().is_empty());
}
