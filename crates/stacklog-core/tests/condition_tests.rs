// Test suite for matched-condition handling
// Tests suffix logging, precedence, source-chain matching, and unchanged
// error propagation.

use std::cell::RefCell;
use std::rc::Rc;

use stacklog_core::{log_condition, match_condition, ScopeCtx, Stacklog};

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("not implemented")]
struct NotImplemented;

#[derive(Debug, thiserror::Error)]
#[error("boom")]
struct Boom;

#[derive(Debug, thiserror::Error)]
#[error("while preparing input")]
struct Wrapper {
    #[source]
    source: NotImplemented,
}

fn recording_sink() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) + 'static) {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = {
        let lines = Rc::clone(&lines);
        move |line: &str| lines.borrow_mut().push(line.to_owned())
    };
    (lines, sink)
}

#[test]
fn test_logs_custom_condition() {
    // On a matched error, the stack with SKIPPED (e.g.) is logged
    let (lines, sink) = recording_sink();
    let mut scope = Stacklog::new(sink, "Running").condition::<NotImplemented>("SKIPPED");

    let result: Result<(), NotImplemented> = scope.run(|| Err(NotImplemented));

    assert_eq!(result.unwrap_err(), NotImplemented);
    assert_eq!(*lines.borrow(), vec!["Running...", "Running...SKIPPED"]);
}

#[test]
fn test_unmatched_error_falls_through_to_failure() {
    let (lines, sink) = recording_sink();
    let mut scope = Stacklog::new(sink, "Running").condition::<NotImplemented>("SKIPPED");

    let result: Result<(), Boom> = scope.run(|| Err(Boom));

    assert!(result.is_err());
    assert_eq!(*lines.borrow(), vec!["Running...", "Running...FAILURE"]);
}

#[test]
fn test_condition_matches_through_source_chain() {
    let (lines, sink) = recording_sink();
    let mut scope = Stacklog::new(sink, "Running").condition::<NotImplemented>("SKIPPED");

    let result: Result<(), Wrapper> = scope.run(|| {
        Err(Wrapper {
            source: NotImplemented,
        })
    });

    assert!(result.is_err());
    assert_eq!(*lines.borrow(), vec!["Running...", "Running...SKIPPED"]);
}

#[test]
fn test_later_conditions_take_precedence() {
    let (lines, sink) = recording_sink();
    let mut scope = Stacklog::new(sink, "Running")
        .condition::<NotImplemented>("FIRST")
        .condition::<NotImplemented>("SECOND");

    let result: Result<(), NotImplemented> = scope.run(|| Err(NotImplemented));

    assert!(result.is_err());
    assert_eq!(*lines.borrow(), vec!["Running...", "Running...SECOND"]);
}

#[test]
fn test_matched_condition_replaces_failure_but_not_exit() {
    let (lines, sink) = recording_sink();
    let mut scope = Stacklog::new(sink, "Running").condition::<NotImplemented>("SKIPPED");
    scope.on_exit(|ctx: &ScopeCtx<'_>| ctx.log("EXITED"));

    let result: Result<(), NotImplemented> = scope.run(|| Err(NotImplemented));

    assert!(result.is_err());
    assert_eq!(
        *lines.borrow(),
        vec!["Running...", "Running...EXITED", "Running...SKIPPED"]
    );
}

#[test]
fn test_manual_matcher_and_handler_registration() {
    let (lines, sink) = recording_sink();
    let mut scope = Stacklog::new(sink, "Running");
    scope.on_condition(match_condition::<NotImplemented>(), log_condition("SKIPPED"));

    let result: Result<(), NotImplemented> = scope.run(|| Err(NotImplemented));

    assert!(result.is_err());
    assert_eq!(*lines.borrow(), vec!["Running...", "Running...SKIPPED"]);
}

#[test]
fn test_condition_handler_sees_the_error() {
    let (_lines, sink) = recording_sink();
    let seen = Rc::new(RefCell::new(None));
    let mut scope = Stacklog::new(sink, "Running");
    {
        let seen = Rc::clone(&seen);
        scope.on_condition(match_condition::<NotImplemented>(), move |ctx: &ScopeCtx<'_>| {
            *seen.borrow_mut() = ctx.error().map(|err| err.to_string());
        });
    }

    let result: Result<(), NotImplemented> = scope.run(|| Err(NotImplemented));

    assert!(result.is_err());
    assert_eq!(seen.borrow().as_deref(), Some("not implemented"));
}
