//! Flow tests for the owner dashboard.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;

use printdesk_core::types::JobStatus;
use printdesk_push::PushEvent;
use printdesk_sync::notice::{MemoryNoticeSink, NoticeLevel};
use printdesk_sync::{Dashboard, DashboardError, StatusFilter};

use common::{job, shop, StubBackend};

async fn mounted(
    stub: StubBackend,
) -> (Arc<StubBackend>, Arc<MemoryNoticeSink>, Dashboard) {
    let backend = Arc::new(stub);
    let notices = Arc::new(MemoryNoticeSink::new());
    let dashboard = Dashboard::mount(backend.clone(), notices.clone(), "s-1".into())
        .await
        .expect("mount should succeed");
    (backend, notices, dashboard)
}

#[tokio::test]
async fn mount_fetches_shop_and_todays_jobs() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.jobs = vec![
        job("a", "T-1", JobStatus::Pending),
        job("b", "T-2", JobStatus::Completed),
    ];
    let (backend, _notices, dashboard) = mounted(stub).await;

    assert_eq!(dashboard.shop().name, "Campus Prints");
    assert_eq!(dashboard.roster().jobs().len(), 2);
    assert_eq!(
        backend.calls(),
        vec!["shop_details s-1", "todays_jobs s-1"]
    );
}

#[tokio::test]
async fn mark_completed_round_trips_without_optimistic_update() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.jobs = vec![job("a", "T-1", JobStatus::Pending)];
    let (backend, _notices, dashboard) = mounted(stub).await;

    dashboard.mark_completed(&"a".into()).await.unwrap();

    // The REST call went out...
    assert!(backend.calls().contains(&"set_status a Completed".to_string()));
    // ...but the roster only changes when the push echo lands.
    assert_eq!(
        dashboard.roster().get(&"a".into()).unwrap().status,
        JobStatus::Pending
    );
}

#[tokio::test]
async fn push_echo_applies_the_status_change() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.jobs = vec![job("a", "T-1", JobStatus::Pending)];
    let (_backend, _notices, mut dashboard) = mounted(stub).await;

    dashboard.apply(&PushEvent::JobStatusChanged {
        job_id: Some("a".into()),
        token: None,
        status: JobStatus::Completed,
    });

    assert_eq!(
        dashboard.roster().get(&"a".into()).unwrap().status,
        JobStatus::Completed
    );
}

#[tokio::test]
async fn batch_echo_completes_every_job_sharing_the_token() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.jobs = vec![
        job("a", "T-1", JobStatus::Pending),
        job("b", "T-1", JobStatus::Pending),
    ];
    let (_backend, _notices, mut dashboard) = mounted(stub).await;

    dashboard.apply(&PushEvent::BatchStatusChanged {
        token: "T-1".into(),
        status: JobStatus::Completed,
    });

    assert_eq!(
        dashboard.roster().get(&"a".into()).unwrap().status,
        JobStatus::Completed
    );
    assert_eq!(
        dashboard.roster().get(&"b".into()).unwrap().status,
        JobStatus::Completed
    );
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.jobs = vec![job("a", "T-1", JobStatus::Pending)];
    let (backend, _notices, dashboard) = mounted(stub).await;

    let result = dashboard.delete_job(&"a".into(), false).await;
    assert_matches!(result, Err(DashboardError::ConfirmationRequired));
    // No REST call was made.
    assert_eq!(backend.calls().len(), 2); // mount calls only

    dashboard.delete_job(&"a".into(), true).await.unwrap();
    assert!(backend.calls().contains(&"delete a".to_string()));
}

#[tokio::test]
async fn failed_job_action_surfaces_an_error_notice() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.jobs = vec![job("a", "T-1", JobStatus::Pending)];
    stub.fail_mutations = true;
    let (_backend, notices, dashboard) = mounted(stub).await;

    let result = dashboard.mark_completed(&"a".into()).await;
    assert_matches!(result, Err(DashboardError::Api(_)));
    assert_eq!(notices.drain()[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn toggle_flips_the_local_flag_on_success() {
    let stub = StubBackend::new(shop("s-1"));
    let (backend, notices, mut dashboard) = mounted(stub).await;

    assert!(dashboard.shop().accepting_uploads);
    let settled = dashboard.toggle_uploads().await.unwrap();

    assert!(!settled);
    assert!(!dashboard.shop().accepting_uploads);
    assert!(backend.calls().contains(&"toggle s-1 false".to_string()));
    assert_eq!(notices.drain()[0].level, NoticeLevel::Success);
}

#[tokio::test]
async fn failed_toggle_leaves_the_flag_unchanged() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.fail_mutations = true;
    let (_backend, notices, mut dashboard) = mounted(stub).await;

    let result = dashboard.toggle_uploads().await;

    assert_matches!(result, Err(DashboardError::Api(_)));
    assert!(dashboard.shop().accepting_uploads);
    assert_eq!(notices.drain()[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn shop_status_push_updates_the_flag() {
    let stub = StubBackend::new(shop("s-1"));
    let (_backend, _notices, mut dashboard) = mounted(stub).await;

    dashboard.apply(&PushEvent::ShopAccepting { accepting: false });
    assert!(!dashboard.shop().accepting_uploads);
}

#[tokio::test]
async fn new_job_push_lands_at_the_front_of_the_roster() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.jobs = vec![job("a", "T-1", JobStatus::Pending)];
    let (_backend, _notices, mut dashboard) = mounted(stub).await;

    dashboard.apply(&PushEvent::JobAdded(job("b", "T-2", JobStatus::Pending)));

    assert_eq!(dashboard.roster().jobs()[0].id.as_str(), "b");
    assert_eq!(dashboard.roster().jobs().len(), 2);
}

#[tokio::test]
async fn filtered_view_combines_status_and_token_search() {
    let mut stub = StubBackend::new(shop("s-1"));
    stub.jobs = vec![
        job("a", "T-107", JobStatus::Pending),
        job("b", "T-233", JobStatus::Pending),
        job("c", "T-108", JobStatus::Completed),
    ];
    let (_backend, _notices, dashboard) = mounted(stub).await;

    let hits = dashboard.filtered(StatusFilter::Pending, "10");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].token.as_str(), "T-107");
}

#[tokio::test]
async fn batch_download_goes_through_the_backend() {
    let stub = StubBackend::new(shop("s-1"));
    let (backend, _notices, dashboard) = mounted(stub).await;

    let file = dashboard.download_batch(&"T-5".into()).await.unwrap();
    assert_eq!(file.filename, "prints_T-5.zip");
    assert!(backend.calls().contains(&"download_batch T-5".to_string()));
}
