//! Session controller tests: transmit-or-simulate, status logging, and
//! the movement-monitor expiry semantics.

mod common;

use common::{FakeBackend, FakeScheduler};
use hexkit_communication::{
    ConnectionManager, MovementIntent, ParameterIntent, SessionController,
};
use hexkit_core::StatusEvent;

fn disconnected_session() -> (SessionController, common::WriteRecord) {
    let backend = FakeBackend::new(&[]);
    let writes = backend.writes();
    let (scheduler, _) = FakeScheduler::new();
    let session = SessionController::new(
        ConnectionManager::with_backend(Box::new(backend)),
        Box::new(scheduler),
    );
    (session, writes)
}

fn connected_session() -> (SessionController, common::WriteRecord) {
    let backend = FakeBackend::new(&["/dev/ttyUSB0"]);
    let writes = backend.writes();
    let (scheduler, _) = FakeScheduler::new();
    let mut session = SessionController::new(
        ConnectionManager::with_backend(Box::new(backend)),
        Box::new(scheduler),
    );
    assert!(session.try_auto_connect());
    (session, writes)
}

#[test]
fn test_simulated_movement_logs_once_and_never_writes() {
    let (mut session, writes) = disconnected_session();

    session.issue_movement(MovementIntent::Front);

    assert_eq!(session.log().len(), 1);
    let entry = session.log().last().unwrap();
    assert_eq!(
        entry.event,
        StatusEvent::Simulated {
            command: "F".to_string()
        }
    );
    assert!(entry.event.is_simulated());
    assert!(writes.lock().unwrap().is_empty());
}

#[test]
fn test_connected_movement_writes_and_logs_sent() {
    let (mut session, writes) = connected_session();

    session.issue_movement(MovementIntent::Left);

    assert_eq!(
        writes.lock().unwrap().last().unwrap().1,
        b"L".to_vec()
    );
    assert_eq!(
        session.log().last().unwrap().event,
        StatusEvent::Sent {
            command: "L".to_string()
        }
    );
}

#[test]
fn test_parameter_goes_out_newline_terminated() {
    let (mut session, writes) = connected_session();

    session.issue_parameter(ParameterIntent::Speed(73.9));

    assert_eq!(writes.lock().unwrap().last().unwrap().1, b"S73\n".to_vec());
    // The logged command has the newline stripped for display.
    assert_eq!(
        session.log().last().unwrap().event,
        StatusEvent::Sent {
            command: "S73".to_string()
        }
    );
}

#[test]
fn test_movement_sets_current_action() {
    let (mut session, _) = disconnected_session();

    assert_eq!(session.current_action(), None);
    session.issue_movement(MovementIntent::Back);
    assert_eq!(session.current_action(), Some(MovementIntent::Back));
}

#[test]
fn test_new_intent_cancels_and_replaces_timer() {
    let backend = FakeBackend::new(&[]);
    let (scheduler, state) = FakeScheduler::new();
    let mut session = SessionController::new(
        ConnectionManager::with_backend(Box::new(backend)),
        Box::new(scheduler),
    );

    session.issue_movement(MovementIntent::Front);
    session.issue_movement(MovementIntent::Right);
    session.issue_movement(MovementIntent::Right);

    let state = state.lock().unwrap();
    assert_eq!(state.scheduled.len(), 3);
    assert_eq!(state.canceled.len(), 2);
    // Exactly one timer remains live, belonging to the last intent.
    assert_eq!(state.live().len(), 1);
    assert_eq!(session.current_action(), Some(MovementIntent::Right));
}

#[test]
fn test_expiry_resolves_to_idle() {
    let backend = FakeBackend::new(&[]);
    let (scheduler, state) = FakeScheduler::new();
    let mut session = SessionController::new(
        ConnectionManager::with_backend(Box::new(backend)),
        Box::new(scheduler),
    );

    session.issue_movement(MovementIntent::Front);
    let live = state.lock().unwrap().live();
    session.on_expiry_tick(live[0]);

    assert_eq!(session.current_action(), None);
}

#[test]
fn test_stale_tick_is_ignored() {
    let backend = FakeBackend::new(&[]);
    let (scheduler, state) = FakeScheduler::new();
    let mut session = SessionController::new(
        ConnectionManager::with_backend(Box::new(backend)),
        Box::new(scheduler),
    );

    session.issue_movement(MovementIntent::Front);
    let first = state.lock().unwrap().scheduled[0].0;
    session.issue_movement(MovementIntent::Back);

    // The superseded timer's tick must not clear the newer intent.
    session.on_expiry_tick(first);
    assert_eq!(session.current_action(), Some(MovementIntent::Back));

    let live = state.lock().unwrap().live();
    session.on_expiry_tick(live[0]);
    assert_eq!(session.current_action(), None);
}

#[test]
fn test_parameter_does_not_touch_movement_monitor() {
    let backend = FakeBackend::new(&[]);
    let (scheduler, state) = FakeScheduler::new();
    let mut session = SessionController::new(
        ConnectionManager::with_backend(Box::new(backend)),
        Box::new(scheduler),
    );

    session.issue_movement(MovementIntent::Front);
    session.issue_parameter(ParameterIntent::LegHeight(25.0));

    assert_eq!(session.current_action(), Some(MovementIntent::Front));
    // No extra timer was scheduled for the parameter.
    assert_eq!(state.lock().unwrap().scheduled.len(), 1);
}

#[test]
fn test_write_failure_logs_and_stays_connected() {
    let backend = FakeBackend::new(&["/dev/ttyUSB0"]).failing_writes("/dev/ttyUSB0");
    let (scheduler, _) = FakeScheduler::new();
    let mut session = SessionController::new(
        ConnectionManager::with_backend(Box::new(backend)),
        Box::new(scheduler),
    );
    assert!(session.try_auto_connect());
    let before = session.log().len();

    session.issue_movement(MovementIntent::Front);

    assert_eq!(session.log().len(), before + 1);
    assert!(matches!(
        session.log().last().unwrap().event,
        StatusEvent::TransmitFailed { .. }
    ));
    assert!(session.is_connected());
}

#[test]
fn test_auto_connect_greeting() {
    let (session, _) = connected_session();
    assert_eq!(
        session.log().last().unwrap().event,
        StatusEvent::AutoConnected {
            port: "/dev/ttyUSB0".to_string()
        }
    );

    let (mut lonely, _) = disconnected_session();
    assert!(!lonely.try_auto_connect());
    assert_eq!(lonely.log().last().unwrap().event, StatusEvent::NoDeviceFound);
}

#[test]
fn test_connect_failure_is_status_text_not_error() {
    let backend = FakeBackend::new(&["/dev/ttyUSB0"]).failing_open("/dev/ttyUSB0");
    let (scheduler, _) = FakeScheduler::new();
    let mut session = SessionController::new(
        ConnectionManager::with_backend(Box::new(backend)),
        Box::new(scheduler),
    );

    assert!(!session.connect("/dev/ttyUSB0"));
    assert!(matches!(
        session.log().last().unwrap().event,
        StatusEvent::ConnectFailed { .. }
    ));
    assert!(!session.is_connected());
}

#[test]
fn test_double_disconnect_logs_once() {
    let (mut session, _) = connected_session();

    session.disconnect();
    let len_after_first = session.log().len();
    session.disconnect();

    assert_eq!(session.log().len(), len_after_first);
    assert!(!session.is_connected());
}

#[test]
fn test_refresh_ports_logs_count() {
    let backend = FakeBackend::new(&["/dev/ttyUSB0", "/dev/ttyUSB1"]);
    let (scheduler, _) = FakeScheduler::new();
    let mut session = SessionController::new(
        ConnectionManager::with_backend(Box::new(backend)),
        Box::new(scheduler),
    );

    let ports = session.refresh_ports();
    assert_eq!(ports.len(), 2);
    assert_eq!(
        session.log().last().unwrap().event,
        StatusEvent::PortsRefreshed { count: 2 }
    );
}
