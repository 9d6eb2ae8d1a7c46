//! Tests for work submission and completion tracking.

#![allow(clippy::expect_used)]

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::json;
use xwork_cli::application::services::operations::Collaborators;
use xwork_cli::application::services::work::{self, WaitPolicy};
use xwork_cli::domain::error::WorkError;
use xwork_cli::domain::{ProjectConfig, WorkStatus};

use crate::mocks::{
    CHAIN, FakeServer, MemoryFiles, MockCredentials, NoopReporter, chains, credentials, uid,
    work_record,
};

fn work_error(err: &anyhow::Error) -> &WorkError {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<WorkError>())
        .expect("typed work error")
}

#[tokio::test]
async fn test_await_completion_returns_after_polls_reach_completed() {
    let server = FakeServer::new().with_records(
        "w-1",
        vec![
            work_record("PENDING", None),
            work_record("RUNNING", None),
            work_record("COMPLETED", Some("xw://host/r-1")),
        ],
    );

    let work = work::await_completion(&server, &uid("w-1"), WaitPolicy::unbounded())
        .await
        .expect("completed");

    assert_eq!(work.status, WorkStatus::Completed);
    assert_eq!(
        work.result_address().expect("address").as_str(),
        "xw://host/r-1"
    );
    assert_eq!(server.polls(), 3);
}

#[tokio::test]
async fn test_await_completion_error_status_is_terminal_not_raised() {
    let server = FakeServer::new().with_records(
        "w-1",
        vec![work_record("RUNNING", None), work_record("ERROR", None)],
    );

    let work = work::await_completion(&server, &uid("w-1"), WaitPolicy::unbounded())
        .await
        .expect("terminal status is a normal result");

    assert_eq!(work.status, WorkStatus::Error);
    assert!(work.result_address().is_err());
}

#[tokio::test]
async fn test_await_completion_times_out() {
    let server = FakeServer::new().with_records("w-1", vec![work_record("RUNNING", None)]);

    let err = work::await_completion(
        &server,
        &uid("w-1"),
        WaitPolicy::with_timeout(Duration::from_millis(40)),
    )
    .await
    .expect_err("never completes");

    assert!(matches!(work_error(&err), WorkError::WaitTimedOut { .. }));
}

#[tokio::test]
async fn test_await_completion_vanished_work_is_not_found() {
    let server = FakeServer::new();

    let err = work::await_completion(&server, &uid("ghost"), WaitPolicy::unbounded())
        .await
        .expect_err("unknown work");

    assert!(matches!(work_error(&err), WorkError::NotFound { uid } if uid == "ghost"));
}

#[tokio::test]
async fn test_fetch_status_is_a_single_snapshot() {
    let server = FakeServer::new().with_records(
        "w-1",
        vec![work_record("RUNNING", None), work_record("COMPLETED", None)],
    );

    let work = work::fetch_status(&server, &uid("w-1"))
        .await
        .expect("snapshot");

    assert_eq!(work.status, WorkStatus::Running);
    assert_eq!(server.polls(), 0);
}

#[tokio::test]
async fn test_submit_forwards_project_parameters() {
    let server = FakeServer::new();
    let files = MemoryFiles::new();
    let creds = credentials("jwt");
    let chains = chains();
    let ops = Collaborators {
        credentials: &creds,
        chains: &chains,
        connector: &server,
        files: &files,
    };
    let project = ProjectConfig {
        name: "factorial".to_string(),
        work: BTreeMap::from([("cmdline".to_string(), json!("10"))]),
        ..ProjectConfig::default()
    };

    let work_uid = ops
        .submit_work(CHAIN, &project, "app-7", &NoopReporter)
        .await
        .expect("submitted");

    let submitted = server.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].0, "app-7");
    assert_eq!(submitted[0].1["cmdline"], json!("10"));
    let status = work::fetch_status(&server, &work_uid)
        .await
        .expect("stored");
    assert_eq!(status.status, WorkStatus::Pending);
}

#[tokio::test]
async fn test_submit_with_empty_app_uid_never_connects() {
    let server = FakeServer::new();
    let files = MemoryFiles::new();
    let mut creds = MockCredentials::new();
    creds.expect_load().never();
    let chains = chains();
    let ops = Collaborators {
        credentials: &creds,
        chains: &chains,
        connector: &server,
        files: &files,
    };

    let err = ops
        .submit_work(CHAIN, &ProjectConfig::default(), "  ", &NoopReporter)
        .await
        .expect_err("empty app uid");

    assert!(matches!(work_error(&err), WorkError::Submission { .. }));
    assert_eq!(server.connects(), 0);
    assert!(server.submitted().is_empty());
}

#[tokio::test]
async fn test_submit_with_malformed_app_uid_is_rejected_locally() {
    let server = FakeServer::new();

    let err = work::submit(&server, "apps/7", &BTreeMap::new())
        .await
        .expect_err("malformed uid");

    assert!(matches!(work_error(&err), WorkError::Submission { .. }));
    assert!(server.submitted().is_empty());
}
