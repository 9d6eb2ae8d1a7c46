//! Tests for session handling, upload, version, and the generic invoker.

#![allow(clippy::expect_used)]

use std::path::Path;

use serde_json::json;
use xwork_cli::application::services::operations::Collaborators;
use xwork_cli::application::services::session;
use xwork_cli::domain::error::{ArtifactError, SessionError};
use xwork_cli::domain::{ArtifactMetadata, Credential, ProjectConfig};

use crate::mocks::{
    CHAIN, FakeServer, MemoryFiles, MockCredentials, NoopReporter, chains, credentials, endpoint,
};

fn text_project() -> ProjectConfig {
    ProjectConfig {
        name: "factorial".to_string(),
        data: ArtifactMetadata {
            kind: Some("TEXT".to_string()),
            ..ArtifactMetadata::default()
        },
        ..ProjectConfig::default()
    }
}

#[tokio::test]
async fn test_empty_credential_is_rejected_without_network() {
    let server = FakeServer::new();

    let err = session::establish(&server, &endpoint(), &Credential::new(""))
        .await
        .err()
        .expect("empty credential");

    assert!(matches!(
        err.downcast_ref::<SessionError>(),
        Some(SessionError::Auth { .. })
    ));
    assert_eq!(server.connects(), 0);
}

#[tokio::test]
async fn test_missing_credential_propagates_from_store() {
    let server = FakeServer::new();
    let files = MemoryFiles::new();
    let mut creds = MockCredentials::new();
    creds
        .expect_load()
        .times(1)
        .returning(|| Err(SessionError::NoCredential.into()));
    let chains = chains();
    let ops = Collaborators {
        credentials: &creds,
        chains: &chains,
        connector: &server,
        files: &files,
    };

    let err = ops.fetch_version(CHAIN).await.expect_err("no credential");

    assert!(matches!(
        err.downcast_ref::<SessionError>(),
        Some(SessionError::NoCredential)
    ));
    assert_eq!(server.connects(), 0);
}

#[tokio::test]
async fn test_each_operation_opens_its_own_session() {
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

    assert_eq!(ops.fetch_version(CHAIN).await.expect("version"), "10.5.2");
    ops.fetch_version(CHAIN).await.expect("version");

    assert_eq!(server.connects(), 2);
}

#[tokio::test]
async fn test_unknown_chain_fails_before_connecting() {
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

    ops.fetch_version("mainnet").await.expect_err("unknown chain");

    assert_eq!(server.connects(), 0);
}

#[tokio::test]
async fn test_upload_returns_address_on_chain_host() {
    let server = FakeServer::new();
    let files = MemoryFiles::new().with_file("inputs/numbers.txt", b"1 2 3");
    let creds = credentials("jwt");
    let chains = chains();
    let ops = Collaborators {
        credentials: &creds,
        chains: &chains,
        connector: &server,
        files: &files,
    };

    let outcome = ops
        .upload_data(
            CHAIN,
            &text_project(),
            Path::new("inputs/numbers.txt"),
            &NoopReporter,
        )
        .await
        .expect("uploaded");

    assert_eq!(
        outcome.address.as_str(),
        format!("xw://xw.kovan.example.org/{}", outcome.data_uid)
    );
    let uploaded = server.registered_data();
    assert_eq!(uploaded[0].0, "numbers.txt");
    assert_eq!(uploaded[0].1, b"1 2 3");
}

#[tokio::test]
async fn test_upload_without_type_is_rejected_locally() {
    let server = FakeServer::new();
    let files = MemoryFiles::new().with_file("numbers.txt", b"1 2 3");
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
        ..ProjectConfig::default()
    };

    let err = ops
        .upload_data(CHAIN, &project, Path::new("numbers.txt"), &NoopReporter)
        .await
        .expect_err("missing type");

    let typed = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ArtifactError>())
        .expect("typed artifact error");
    assert!(matches!(typed, ArtifactError::Validation { .. }));
    assert!(server.registered_data().is_empty());
}

#[tokio::test]
async fn test_invoke_forwards_exact_arguments_and_returns_raw_answer() {
    let answer = json!({"xwhep": {"app": [{"uid": ["abc"]}]}});
    let server = FakeServer::new().with_answer(answer.clone());
    let files = MemoryFiles::new();
    let creds = credentials("jwt");
    let chains = chains();
    let ops = Collaborators {
        credentials: &creds,
        chains: &chains,
        connector: &server,
        files: &files,
    };
    let args = vec!["getByUID".to_string(), "abc".to_string(), "--raw".to_string()];

    let value = ops.invoke_generic(CHAIN, &args).await.expect("invoked");

    assert_eq!(value, answer);
    assert_eq!(
        server.invoked(),
        vec![(
            "getByUID".to_string(),
            vec!["abc".to_string(), "--raw".to_string()]
        )]
    );
}

#[tokio::test]
async fn test_invoke_without_operation_is_an_error() {
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

    ops.invoke_generic(CHAIN, &[]).await.expect_err("no operation");

    assert_eq!(server.connects(), 0);
}
