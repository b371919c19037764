// tests/supervise_restart.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::time::{Duration, sleep, timeout};

use swarmherd::config::{RecordStore, update_interactive};
use swarmherd::supervisor::{
    SupervisorCore, SupervisorEvent, SupervisorOptions, SupervisorRuntime,
};
use swarmherd_test_utils::builders::record;
use swarmherd_test_utils::fakes::{CountingCleanup, FakeLauncher, FakeReconciler};
use swarmherd::types::{ParamBillions, SwarmVariant};

type TestResult = Result<(), Box<dyn Error>>;

struct Harness {
    tx: mpsc::Sender<SupervisorEvent>,
    launches: Arc<Mutex<Vec<swarmherd::exec::LaunchPlan>>>,
    reconciles: Arc<Mutex<usize>>,
    cleanups: Arc<Mutex<usize>>,
    handle: tokio::task::JoinHandle<swarmherd::errors::Result<()>>,
    _tmp: tempfile::TempDir,
}

/// Build and spawn a supervise loop around a fake launcher whose child
/// "exits" immediately with the given code.
fn spawn_harness(exit_code: i32, backoff: Duration) -> Result<Harness, Box<dyn Error>> {
    let tmp = tempfile::tempdir()?;
    let (tx, rx) = mpsc::channel::<SupervisorEvent>(16);

    let launches = Arc::new(Mutex::new(Vec::new()));
    let reconciles = Arc::new(Mutex::new(0));
    let cleanups = Arc::new(Mutex::new(0));

    let runtime = SupervisorRuntime::new(
        SupervisorCore::new(),
        rx,
        tx.clone(),
        FakeLauncher::new(exit_code, Arc::clone(&launches)),
        Box::new(FakeReconciler::new(Arc::clone(&reconciles))),
        Box::new(CountingCleanup::new(Arc::clone(&cleanups))),
        RecordStore::new(tmp.path().join("launch.conf")),
        tmp.path().to_path_buf(),
        tmp.path().join("run_swarm.sh"),
        SupervisorOptions { backoff },
    );
    let handle = tokio::spawn(runtime.run());

    Ok(Harness {
        tx,
        launches,
        reconciles,
        cleanups,
        handle,
        _tmp: tmp,
    })
}

#[tokio::test]
async fn restart_loop_relaunches_until_stopped_and_cleans_up_once() -> TestResult {
    init_tracing();
    let h = spawn_harness(0, Duration::from_millis(5))?;

    // Let a few launch → exit → reconcile cycles happen.
    sleep(Duration::from_millis(100)).await;
    h.tx.send(SupervisorEvent::StopRequested).await?;

    timeout(Duration::from_secs(3), h.handle).await???;

    let launched = h.launches.lock().unwrap().len();
    assert!(launched >= 2, "expected repeated launches, got {launched}");
    assert!(*h.reconciles.lock().unwrap() >= 1);
    assert_eq!(*h.cleanups.lock().unwrap(), 1, "cleanup must run exactly once");

    // No further launches once stop was processed.
    sleep(Duration::from_millis(50)).await;
    assert_eq!(h.launches.lock().unwrap().len(), launched);
    Ok(())
}

#[tokio::test]
async fn failing_child_is_restarted_identically_to_successful_one() -> TestResult {
    init_tracing();
    let h = spawn_harness(137, Duration::from_millis(5))?;

    sleep(Duration::from_millis(100)).await;
    h.tx.send(SupervisorEvent::StopRequested).await?;

    timeout(Duration::from_secs(3), h.handle).await???;

    assert!(h.launches.lock().unwrap().len() >= 2);
    assert_eq!(*h.cleanups.lock().unwrap(), 1);
    Ok(())
}

#[tokio::test]
async fn stop_while_no_child_is_running_still_cleans_up() -> TestResult {
    init_tracing();
    // Long backoff: after the first immediate exit, the loop sits in the
    // reconcile pause with no child and no cancel handle.
    let h = spawn_harness(0, Duration::from_millis(500))?;

    sleep(Duration::from_millis(50)).await;
    h.tx.send(SupervisorEvent::StopRequested).await?;

    timeout(Duration::from_secs(3), h.handle).await???;

    assert_eq!(h.launches.lock().unwrap().len(), 1);
    assert_eq!(*h.cleanups.lock().unwrap(), 1);
    Ok(())
}

#[tokio::test]
async fn stop_as_first_event_launches_nothing_more() -> TestResult {
    init_tracing();
    let h = spawn_harness(0, Duration::from_secs(5))?;

    h.tx.send(SupervisorEvent::StopRequested).await?;
    timeout(Duration::from_secs(3), h.handle).await???;

    // At most the initial launch slipped in before the stop was observed.
    assert!(h.launches.lock().unwrap().len() <= 1);
    assert_eq!(*h.cleanups.lock().unwrap(), 1);
    Ok(())
}

#[tokio::test]
async fn launch_uses_current_record_answers() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let store = RecordStore::new(tmp.path().join("launch.conf"));
    store.save(&record(SwarmVariant::B, ParamBillions::SeventyTwo))?;

    let (tx, rx) = mpsc::channel::<SupervisorEvent>(16);
    let launches = Arc::new(Mutex::new(Vec::new()));
    let runtime = SupervisorRuntime::new(
        SupervisorCore::new(),
        rx,
        tx.clone(),
        FakeLauncher::new(0, Arc::clone(&launches)),
        Box::new(FakeReconciler::new(Arc::new(Mutex::new(0)))),
        Box::new(CountingCleanup::new(Arc::new(Mutex::new(0)))),
        store,
        tmp.path().to_path_buf(),
        tmp.path().join("run_swarm.sh"),
        SupervisorOptions {
            backoff: Duration::from_secs(5),
        },
    );
    let handle = tokio::spawn(runtime.run());

    sleep(Duration::from_millis(50)).await;
    tx.send(SupervisorEvent::StopRequested).await?;
    timeout(Duration::from_secs(3), handle).await???;

    let launches = launches.lock().unwrap();
    assert_eq!(launches.len(), 1);
    assert_eq!(
        launches[0].answers,
        Some(["Y", "B", "72", "N"].map(String::from))
    );
    Ok(())
}

#[tokio::test]
async fn launch_without_record_pipes_nothing() -> TestResult {
    init_tracing();
    let h = spawn_harness(0, Duration::from_secs(5))?;

    sleep(Duration::from_millis(50)).await;
    h.tx.send(SupervisorEvent::StopRequested).await?;
    timeout(Duration::from_secs(3), h.handle).await???;

    let launches = h.launches.lock().unwrap();
    assert!(!launches.is_empty());
    assert_eq!(launches[0].answers, None);
    Ok(())
}

#[test]
fn updated_record_changes_the_next_launch_answers() -> TestResult {
    // End-to-end over the store: update interactively, then derive answers
    // the way the supervise loop does per launch.
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let store = RecordStore::new(tmp.path().join("launch.conf"));
    store.save(&record(SwarmVariant::A, ParamBillions::Seven))?;

    let current = store.load()?;
    let mut input = std::io::Cursor::new(b"B\n32\n".to_vec());
    let mut output = Vec::new();
    let updated = update_interactive(&current, &mut input, &mut output)?;
    store.save(&updated)?;

    let answers = store.try_load()?.map(|r| r.answer_lines());
    assert_eq!(answers, Some(["Y", "B", "32", "N"].map(String::from)));
    Ok(())
}
