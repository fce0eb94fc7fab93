// Test suite for structured event capture around traced scopes
// Tests begin/success/failure emission, duration fields, and logging
// boundaries (no duplicate terminal events).

use stacklog_core::logging_facility::test_capture::init_test_capture;
use stacklog_core::Stacklog;

#[derive(Debug, thiserror::Error)]
#[error("boom")]
struct Boom;

#[test]
fn test_traced_success_emits_begin_then_success() {
    let capture = init_test_capture();
    let mut scope = Stacklog::traced("op_lifecycle_success");

    let result: Result<(), Boom> = scope.run(|| Ok(()));

    assert!(result.is_ok());
    capture.assert_lifecycle("op_lifecycle_success", &["begin", "success"]);
}

#[test]
fn test_traced_failure_emits_failure_event() {
    let capture = init_test_capture();
    let mut scope = Stacklog::traced("op_lifecycle_failure");

    let result: Result<(), Boom> = scope.run(|| Err(Boom));

    assert!(result.is_err());
    capture.assert_event_exists("op_lifecycle_failure", "failure");
    assert_eq!(
        capture.count_events(|e| {
            e.op.as_deref() == Some("op_lifecycle_failure") && e.event.as_deref() == Some("success")
        }),
        0
    );
}

#[test]
fn test_traced_success_carries_duration() {
    let capture = init_test_capture();
    let mut scope = Stacklog::traced("op_duration");

    let result: Result<(), Boom> = scope.run(|| {
        std::thread::sleep(std::time::Duration::from_millis(5));
        Ok(())
    });

    assert!(result.is_ok());
    let success = capture
        .events_for_op("op_duration")
        .into_iter()
        .find(|e| e.event.as_deref() == Some("success"))
        .expect("success event captured");
    assert!(success.duration_ms.is_some());
}

#[test]
fn test_traced_failure_carries_error_field() {
    let capture = init_test_capture();
    let mut scope = Stacklog::traced("op_error_field");

    let result: Result<(), Boom> = scope.run(|| Err(Boom));

    assert!(result.is_err());
    let failure = capture
        .events_for_op("op_error_field")
        .into_iter()
        .find(|e| e.event.as_deref() == Some("failure"))
        .expect("failure event captured");
    assert_eq!(failure.fields.get("error").map(String::as_str), Some("boom"));
}

#[test]
fn test_terminal_events_fire_exactly_once_per_run() {
    let capture = init_test_capture();
    let mut scope = Stacklog::traced("op_boundaries");

    let _: Result<(), Boom> = scope.run(|| Ok(()));
    let _: Result<(), Boom> = scope.run(|| Ok(()));

    capture.assert_lifecycle("op_boundaries", &["begin", "success", "begin", "success"]);
}
