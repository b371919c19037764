// tests/credentials.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;

use swarmherd::errors::SwarmherdError;
use swarmherd::setup::{delete_credentials, ensure_identity};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn missing_identity_is_a_fatal_setup_error() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let identity = tmp.path().join("swarm.pem");

    match ensure_identity(&identity) {
        Err(SwarmherdError::CredentialMissing(path)) => assert_eq!(path, identity),
        other => panic!("expected CredentialMissing, got {other:?}"),
    }
    Ok(())
}

#[test]
fn present_identity_passes() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let identity = tmp.path().join("swarm.pem");
    std::fs::write(&identity, "key material")?;

    ensure_identity(&identity)?;
    Ok(())
}

#[test]
fn delete_removes_present_files_and_skips_absent_ones() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let pem = tmp.path().join("swarm.pem");
    let missing = tmp.path().join("userData.json");
    std::fs::write(&pem, "key material")?;

    let removed = delete_credentials(&[pem.clone(), missing])?;

    assert_eq!(removed, 1);
    assert!(!pem.exists());
    Ok(())
}
