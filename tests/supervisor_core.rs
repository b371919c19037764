// tests/supervisor_core.rs

//! Unit tests for the pure restart state machine: no Tokio, no channels,
//! no processes.

mod common;
use crate::common::init_tracing;

use swarmherd::supervisor::{
    SupervisorCommand, SupervisorCore, SupervisorEvent, SupervisorState,
};

fn running_core() -> SupervisorCore {
    let mut core = SupervisorCore::new();
    core.step(SupervisorEvent::StartRequested);
    core
}

#[test]
fn start_launches_from_idle() {
    init_tracing();
    let mut core = SupervisorCore::new();
    assert_eq!(core.state(), SupervisorState::Idle);

    let step = core.step(SupervisorEvent::StartRequested);

    assert_eq!(core.state(), SupervisorState::Running);
    assert_eq!(step.commands, vec![SupervisorCommand::LaunchChild]);
    assert!(step.keep_running);
}

#[test]
fn any_exit_code_triggers_reconciliation() {
    init_tracing();
    for code in [0, 1, 137] {
        let mut core = running_core();

        let step = core.step(SupervisorEvent::ChildExited { code });

        assert_eq!(core.state(), SupervisorState::Reconciling);
        assert_eq!(step.commands, vec![SupervisorCommand::ReconcileAndBackoff]);
        assert!(step.keep_running);
    }
}

#[test]
fn launch_failure_also_triggers_reconciliation() {
    init_tracing();
    let mut core = running_core();

    let step = core.step(SupervisorEvent::LaunchFailed);

    assert_eq!(core.state(), SupervisorState::Reconciling);
    assert_eq!(step.commands, vec![SupervisorCommand::ReconcileAndBackoff]);
}

#[test]
fn reconcile_finished_relaunches() {
    init_tracing();
    let mut core = running_core();
    core.step(SupervisorEvent::ChildExited { code: 1 });

    let step = core.step(SupervisorEvent::ReconcileFinished);

    assert_eq!(core.state(), SupervisorState::Running);
    assert_eq!(step.commands, vec![SupervisorCommand::LaunchChild]);
    assert!(step.keep_running);
}

#[test]
fn stop_wins_from_every_state() {
    init_tracing();

    // Idle.
    let mut core = SupervisorCore::new();
    let step = core.step(SupervisorEvent::StopRequested);
    assert_eq!(core.state(), SupervisorState::Stopped);
    assert_eq!(step.commands, vec![SupervisorCommand::RunCleanup]);
    assert!(!step.keep_running);

    // Running.
    let mut core = running_core();
    let step = core.step(SupervisorEvent::StopRequested);
    assert_eq!(core.state(), SupervisorState::Stopped);
    assert_eq!(step.commands, vec![SupervisorCommand::RunCleanup]);
    assert!(!step.keep_running);

    // Reconciling.
    let mut core = running_core();
    core.step(SupervisorEvent::ChildExited { code: 0 });
    let step = core.step(SupervisorEvent::StopRequested);
    assert_eq!(core.state(), SupervisorState::Stopped);
    assert_eq!(step.commands, vec![SupervisorCommand::RunCleanup]);
    assert!(!step.keep_running);
}

#[test]
fn second_stop_does_not_repeat_cleanup() {
    init_tracing();
    let mut core = running_core();
    core.step(SupervisorEvent::StopRequested);

    let step = core.step(SupervisorEvent::StopRequested);

    assert_eq!(core.state(), SupervisorState::Stopped);
    assert!(step.commands.is_empty());
    assert!(!step.keep_running);
}

#[test]
fn events_after_stop_are_ignored() {
    init_tracing();
    let mut core = running_core();
    core.step(SupervisorEvent::StopRequested);

    for event in [
        SupervisorEvent::ChildExited { code: 0 },
        SupervisorEvent::LaunchFailed,
        SupervisorEvent::ReconcileFinished,
        SupervisorEvent::StartRequested,
    ] {
        let step = core.step(event);
        assert_eq!(core.state(), SupervisorState::Stopped);
        assert!(step.commands.is_empty(), "no commands for {event:?} after stop");
        assert!(!step.keep_running);
    }
}

#[test]
fn out_of_order_events_are_ignored() {
    init_tracing();

    // Exit report while idle: nothing to do.
    let mut core = SupervisorCore::new();
    let step = core.step(SupervisorEvent::ChildExited { code: 0 });
    assert_eq!(core.state(), SupervisorState::Idle);
    assert!(step.commands.is_empty());
    assert!(step.keep_running);

    // Duplicate start while running: nothing to do.
    let mut core = running_core();
    let step = core.step(SupervisorEvent::StartRequested);
    assert_eq!(core.state(), SupervisorState::Running);
    assert!(step.commands.is_empty());
    assert!(step.keep_running);
}
