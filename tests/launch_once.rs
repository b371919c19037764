// tests/launch_once.rs

//! Integration tests for the single-launch runner, using real `bash`
//! stub scripts in a temp directory.

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::path::Path;

use tokio::sync::oneshot;
use tokio::time::{Duration, sleep, timeout};

use swarmherd::exec::{LaunchOutcome, LaunchPlan, launch_once};

type TestResult = Result<(), Box<dyn Error>>;

fn write_script(dir: &Path, name: &str, body: &str) -> Result<std::path::PathBuf, Box<dyn Error>> {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/usr/bin/env bash\n{body}\n"))?;
    Ok(path)
}

fn plan(dir: &Path, script: std::path::PathBuf, answers: Option<[String; 4]>) -> LaunchPlan {
    LaunchPlan {
        install_root: dir.to_path_buf(),
        script,
        answers,
    }
}

#[tokio::test]
async fn missing_script_fails_fast_without_spawning() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let script = tmp.path().join("does-not-exist.sh");

    let (_cancel_tx, cancel_rx) = oneshot::channel::<()>();
    let outcome = launch_once(&plan(tmp.path(), script.clone(), None), cancel_rx).await?;

    assert_eq!(outcome, LaunchOutcome::MissingScript(script));
    Ok(())
}

#[tokio::test]
async fn exit_code_is_propagated_verbatim() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let script = write_script(tmp.path(), "run.sh", "exit 7")?;

    let (_cancel_tx, cancel_rx) = oneshot::channel::<()>();
    let outcome = launch_once(&plan(tmp.path(), script, None), cancel_rx).await?;

    assert_eq!(outcome, LaunchOutcome::Exited(7));
    Ok(())
}

#[tokio::test]
async fn answers_are_piped_in_order_and_cwd_is_install_root() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    // The script proves both the input order and its working directory by
    // writing a relative file.
    let script = write_script(
        tmp.path(),
        "run.sh",
        r#"read a; read b; read c; read d
printf '%s,%s,%s,%s' "$a" "$b" "$c" "$d" > answers.txt"#,
    )?;

    let answers = ["Y", "B", "72", "N"].map(String::from);
    let (_cancel_tx, cancel_rx) = oneshot::channel::<()>();
    let outcome = launch_once(&plan(tmp.path(), script, Some(answers)), cancel_rx).await?;

    assert_eq!(outcome, LaunchOutcome::Exited(0));
    let seen = std::fs::read_to_string(tmp.path().join("answers.txt"))?;
    assert_eq!(seen, "Y,B,72,N");
    Ok(())
}

#[tokio::test]
async fn without_answers_stdin_is_closed() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    // `read` returns non-zero on EOF; the script turns that into exit 3.
    let script = write_script(tmp.path(), "run.sh", "if read a; then exit 4; else exit 3; fi")?;

    let (_cancel_tx, cancel_rx) = oneshot::channel::<()>();
    let outcome = launch_once(&plan(tmp.path(), script, None), cancel_rx).await?;

    assert_eq!(outcome, LaunchOutcome::Exited(3));
    Ok(())
}

#[tokio::test]
async fn cancellation_kills_a_running_child() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let script = write_script(tmp.path(), "run.sh", "sleep 30")?;

    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    let launch = tokio::spawn({
        let plan = plan(tmp.path(), script, None);
        async move { launch_once(&plan, cancel_rx).await }
    });

    sleep(Duration::from_millis(100)).await;
    cancel_tx.send(()).map_err(|_| "launch ended before cancellation")?;

    let outcome = timeout(Duration::from_secs(3), launch).await???;
    assert_eq!(outcome, LaunchOutcome::Cancelled);
    Ok(())
}
