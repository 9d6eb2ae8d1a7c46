//! Tests for result resolution, download, and `fetch_result`.

#![allow(clippy::expect_used)]

use xwork_cli::application::services::operations::{Collaborators, ResultOutcome};
use xwork_cli::application::services::result;
use xwork_cli::application::services::work::WaitPolicy;
use xwork_cli::domain::error::{RemoteError, ResultError};
use xwork_cli::domain::{Address, SaveTarget, WorkStatus, XwAddressCodec};
use xwork_cli::infra::fs::LocalProjectFiles;

use crate::mocks::{
    CHAIN, FakeServer, MemoryFiles, NoopReporter, RecordingSink, chains, credentials, data_record,
    uid, work_record,
};

const RESULT_ADDRESS: &str = "xw://xw.kovan.example.org/r-1";

fn completed_server(content_type: &str) -> FakeServer {
    FakeServer::new()
        .with_records(
            "w-1",
            vec![
                work_record("RUNNING", None),
                work_record("COMPLETED", Some(RESULT_ADDRESS)),
            ],
        )
        .with_records("r-1", vec![data_record(content_type)])
        .with_payload("r-1", vec![b"PNG-ish ", b"bytes"])
}

#[tokio::test]
async fn test_running_snapshot_reports_in_progress_without_download() {
    let server = completed_server("IMG");
    let files = MemoryFiles::new();
    let creds = credentials("jwt");
    let chains = chains();
    let ops = Collaborators {
        credentials: &creds,
        chains: &chains,
        connector: &server,
        files: &files,
    };

    let outcome = ops
        .fetch_result(
            CHAIN,
            "w-1",
            &SaveTarget::WorkUid,
            false,
            WaitPolicy::unbounded(),
            &NoopReporter,
        )
        .await
        .expect("snapshot");

    assert_eq!(
        outcome,
        ResultOutcome::InProgress {
            work_uid: uid("w-1"),
            status: WorkStatus::Running,
        }
    );
    assert_eq!(server.downloads(), 0);
}

#[tokio::test]
async fn test_watch_and_save_writes_named_file_with_lowercase_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = completed_server("IMG");
    let files = LocalProjectFiles::new(dir.path());
    let creds = credentials("jwt");
    let chains = chains();
    let ops = Collaborators {
        credentials: &creds,
        chains: &chains,
        connector: &server,
        files: &files,
    };

    let outcome = ops
        .fetch_result(
            CHAIN,
            "w-1",
            &SaveTarget::Named("myfile".to_string()),
            true,
            WaitPolicy::unbounded(),
            &NoopReporter,
        )
        .await
        .expect("completed");

    let saved = dir.path().join("myfile.img");
    assert_eq!(
        outcome,
        ResultOutcome::Completed {
            work_uid: uid("w-1"),
            result_address: Address::new(RESULT_ADDRESS),
            saved_to: Some(saved.clone()),
        }
    );
    assert_eq!(std::fs::read(saved).expect("saved file"), b"PNG-ish bytes");
}

#[tokio::test]
async fn test_save_defaults_to_work_uid_file_name() {
    let server = completed_server("TEXT");
    let files = MemoryFiles::new();
    let creds = credentials("jwt");
    let chains = chains();
    let ops = Collaborators {
        credentials: &creds,
        chains: &chains,
        connector: &server,
        files: &files,
    };

    let outcome = ops
        .fetch_result(
            CHAIN,
            "w-1",
            &SaveTarget::WorkUid,
            true,
            WaitPolicy::unbounded(),
            &NoopReporter,
        )
        .await
        .expect("completed");

    let ResultOutcome::Completed { saved_to, .. } = outcome else {
        panic!("expected a completed outcome");
    };
    assert_eq!(saved_to.expect("saved").to_string_lossy(), "w-1.text");
    assert_eq!(files.sink.bytes(), b"PNG-ish bytes");
    assert!(files.sink.was_shut_down());
}

fn completed_only(result: Option<&str>) -> FakeServer {
    FakeServer::new().with_records("w-1", vec![work_record("COMPLETED", result)])
}

#[tokio::test]
async fn test_without_save_reports_address_without_reading_result_record() {
    let server = completed_only(Some(RESULT_ADDRESS));
    let files = MemoryFiles::new();
    let creds = credentials("jwt");
    let chains = chains();
    let ops = Collaborators {
        credentials: &creds,
        chains: &chains,
        connector: &server,
        files: &files,
    };

    let outcome = ops
        .fetch_result(
            CHAIN,
            "w-1",
            &SaveTarget::Skip,
            false,
            WaitPolicy::unbounded(),
            &NoopReporter,
        )
        .await
        .expect("address only");

    assert_eq!(
        outcome,
        ResultOutcome::Completed {
            work_uid: uid("w-1"),
            result_address: Address::new(RESULT_ADDRESS),
            saved_to: None,
        }
    );
    assert_eq!(server.lookups(), vec!["w-1".to_string()]);
    assert_eq!(server.downloads(), 0);
}

#[tokio::test]
async fn test_without_save_any_address_scheme_is_reported_verbatim() {
    let foreign = "http://results.example.org/r-1";
    let server = completed_only(Some(foreign));
    let files = MemoryFiles::new();
    let creds = credentials("jwt");
    let chains = chains();
    let ops = Collaborators {
        credentials: &creds,
        chains: &chains,
        connector: &server,
        files: &files,
    };

    let outcome = ops
        .fetch_result(
            CHAIN,
            "w-1",
            &SaveTarget::Skip,
            false,
            WaitPolicy::unbounded(),
            &NoopReporter,
        )
        .await
        .expect("address only");

    let ResultOutcome::Completed { result_address, .. } = outcome else {
        panic!("expected a completed outcome");
    };
    assert_eq!(result_address.as_str(), foreign);
}

#[tokio::test]
async fn test_completed_work_without_result_address_is_an_error() {
    let server = completed_only(None);
    let files = MemoryFiles::new();
    let creds = credentials("jwt");
    let chains = chains();
    let ops = Collaborators {
        credentials: &creds,
        chains: &chains,
        connector: &server,
        files: &files,
    };

    let err = ops
        .fetch_result(
            CHAIN,
            "w-1",
            &SaveTarget::WorkUid,
            true,
            WaitPolicy::unbounded(),
            &NoopReporter,
        )
        .await
        .expect_err("terminal work without a result");

    let remote = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<RemoteError>())
        .expect("typed remote error");
    assert!(remote.reason.contains("w-1"), "got {}", remote.reason);
    assert!(remote.reason.contains("COMPLETED"), "got {}", remote.reason);
    assert_eq!(server.downloads(), 0);
}

#[tokio::test]
async fn test_failed_work_is_reported_without_download() {
    let server = FakeServer::new().with_records("w-1", vec![work_record("ERROR", None)]);
    let files = MemoryFiles::new();
    let creds = credentials("jwt");
    let chains = chains();
    let ops = Collaborators {
        credentials: &creds,
        chains: &chains,
        connector: &server,
        files: &files,
    };

    let outcome = ops
        .fetch_result(
            CHAIN,
            "w-1",
            &SaveTarget::WorkUid,
            true,
            WaitPolicy::unbounded(),
            &NoopReporter,
        )
        .await
        .expect("failure is not an error");

    assert!(matches!(
        outcome,
        ResultOutcome::Failed {
            status: WorkStatus::Error,
            ..
        }
    ));
    assert_eq!(server.downloads(), 0);
}

#[tokio::test]
async fn test_resolve_without_data_record_is_not_found() {
    let server = FakeServer::new();
    let codec = XwAddressCodec::new("xw.kovan.example.org");

    let err = result::resolve(&server, &codec, &Address::new(RESULT_ADDRESS))
        .await
        .expect_err("no data record");

    assert!(matches!(
        err.downcast_ref::<ResultError>(),
        Some(ResultError::NotFound { uid }) if uid == "r-1"
    ));
}

#[tokio::test]
async fn test_download_shuts_sink_down_on_mid_stream_failure() {
    let server = FakeServer::new()
        .with_payload("r-1", vec![b"first chunk", b"never sent"])
        .with_broken_download("r-1");
    let mut sink = RecordingSink::default();

    let err = result::download(&server, &uid("r-1"), &mut sink, "out.bin")
        .await
        .expect_err("transport failure");

    assert!(format!("{err:#}").contains("connection reset"));
    assert_eq!(sink.bytes(), b"first chunk");
    assert!(sink.was_shut_down(), "sink must be closed on every path");
}
