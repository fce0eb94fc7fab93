//! The lifecycle logging scope
//!
//! [`Stacklog`] wraps a function call or code block and invokes registered
//! hooks at fixed lifecycle points. On entry it signals ENTER then BEGIN
//! hooks and records the start timestamp; on exit it computes the elapsed
//! duration, signals EXIT hooks, and then exactly one of the SUCCESS hooks,
//! the first matching condition handler, or the FAILURE hooks. Errors from
//! the wrapped code propagate to the caller unchanged after hooks fire.
//!
//! Example usage:
//!
//! ```
//! use stacklog_core::Stacklog;
//!
//! let mut scope = Stacklog::new(|line: &str| println!("{}", line), "Running long function");
//! let result: Result<(), std::io::Error> = scope.run(|| Ok(()));
//! assert!(result.is_ok());
//! ```
//!
//! This produces logging output:
//!
//! ```text
//! Running long function...
//! Running long function...DONE
//! ```

use std::collections::HashMap;
use std::error::Error;
use std::time::{Duration, Instant};

use stacklog_core_types::{schema, Event};

use crate::time_format::{format_time, Unit};

/// Sink receiving fully rendered log lines
pub type LogMethod = Box<dyn Fn(&str)>;

/// Lifecycle hook invoked with a view of the scope
pub type Hook = Box<dyn FnMut(&ScopeCtx<'_>)>;

/// Predicate deciding whether a condition handles a given error
pub type ConditionMatcher = Box<dyn Fn(&(dyn Error + 'static)) -> bool>;

struct Condition {
    matcher: ConditionMatcher,
    handler: Hook,
}

/// Terminal state of a completed scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The wrapped code returned normally
    Success,
    /// The wrapped code failed (including matched conditions and panics)
    Failure,
}

/// View of the scope passed to hooks
pub struct ScopeCtx<'a> {
    method: &'a LogMethod,
    message: &'a str,
    unit: Option<Unit>,
    elapsed: Option<Duration>,
    error: Option<&'a (dyn Error + 'static)>,
}

impl ScopeCtx<'_> {
    /// Render `"{message}...{suffix}"` and emit it through the scope's sink
    ///
    /// When timing is enabled and the scope has exited, lines with a
    /// non-empty suffix append the formatted elapsed duration.
    pub fn log(&self, suffix: &str) {
        let mut line = format!("{}{}{}", self.message, schema::MESSAGE_SEPARATOR, suffix);
        if !suffix.is_empty() {
            if let (Some(unit), Some(elapsed)) = (self.unit, self.elapsed) {
                line.push_str(" in ");
                line.push_str(&format_time(unit, elapsed.as_secs_f64()));
            }
        }
        (self.method)(&line);
    }

    /// The scope label
    pub fn message(&self) -> &str {
        self.message
    }

    /// Elapsed wall-clock duration; defined for exit, success, failure,
    /// and condition hooks
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Elapsed milliseconds, zero while undefined
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.map(|d| d.as_millis() as u64).unwrap_or(0)
    }

    /// The error being handled; present for failure and condition hooks
    pub fn error(&self) -> Option<&(dyn Error + 'static)> {
        self.error
    }
}

/// Default begin hook: logs `"{message}..."`
pub fn begin(ctx: &ScopeCtx<'_>) {
    ctx.log("");
}

/// Default success hook: logs `"{message}...DONE"`
pub fn succeed(ctx: &ScopeCtx<'_>) {
    ctx.log(schema::SUFFIX_DONE);
}

/// Default failure hook: logs `"{message}...FAILURE"`
pub fn fail(ctx: &ScopeCtx<'_>) {
    ctx.log(schema::SUFFIX_FAILURE);
}

/// Matcher satisfied when the handled error is an `E`, or carries an `E`
/// anywhere in its `source()` chain
pub fn match_condition<E>() -> impl Fn(&(dyn Error + 'static)) -> bool + 'static
where
    E: Error + 'static,
{
    |error: &(dyn Error + 'static)| {
        let mut current = Some(error);
        while let Some(err) = current {
            if err.is::<E>() {
                return true;
            }
            current = err.source();
        }
        false
    }
}

/// Handler that logs `"{message}...{suffix}"` when its condition matches
pub fn log_condition(suffix: &str) -> impl FnMut(&ScopeCtx<'_>) + 'static {
    let suffix = suffix.to_owned();
    move |ctx: &ScopeCtx<'_>| ctx.log(&suffix)
}

/// Lifecycle logging scope
///
/// Wraps a call or block, invoking hooks at fixed lifecycle points and
/// optionally reporting elapsed wall-clock time. Construction installs the
/// default begin/success/failure hooks ([`begin`], [`succeed`], [`fail`]);
/// registering a replacement removes the default.
///
/// A matched condition logs its own suffix in place of `FAILURE`:
///
/// ```
/// use stacklog_core::Stacklog;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("not implemented")]
/// struct NotImplemented;
///
/// let mut scope = Stacklog::new(|line: &str| println!("{}", line), "Skipping")
///     .condition::<NotImplemented>("SKIPPED");
/// let result: Result<(), NotImplemented> = scope.run(|| Err(NotImplemented));
/// assert!(result.is_err());
/// ```
pub struct Stacklog {
    method: LogMethod,
    message: String,
    unit: Option<Unit>,
    callbacks: HashMap<Event, Vec<Hook>>,
    conditions: Vec<Condition>,
    started: Option<Instant>,
    elapsed: Option<Duration>,
    outcome: Option<Outcome>,
}

impl Stacklog {
    /// Create a scope that renders lines through `method`
    pub fn new<M, S>(method: M, message: S) -> Self
    where
        M: Fn(&str) + 'static,
        S: Into<String>,
    {
        let mut scope = Self {
            method: Box::new(method),
            message: message.into(),
            unit: None,
            callbacks: HashMap::new(),
            conditions: Vec::new(),
            started: None,
            elapsed: None,
            outcome: None,
        };
        scope.on_begin(begin);
        scope.on_success(succeed);
        scope.on_failure(fail);
        scope
    }

    /// Scope that forwards rendered lines to the `log` facade at `level`
    pub fn logged<S>(level: log::Level, message: S) -> Self
    where
        S: Into<String>,
    {
        Self::new(move |line: &str| log::log!(level, "{}", line), message)
    }

    /// Scope whose terminal hooks emit structured `tracing` events
    ///
    /// Begin, success, and failure are reported with the canonical
    /// component/op/event/duration_ms fields instead of rendered lines.
    /// Lines produced by [`ScopeCtx::log`] from user hooks still render
    /// through a `tracing` sink at INFO level.
    pub fn traced<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        let mut scope = Self::new(
            |line: &str| tracing::info!(target: "stacklog", "{}", line),
            message,
        );
        scope.on_begin(|ctx: &ScopeCtx<'_>| {
            crate::log_stack_start!(ctx.message());
        });
        scope.on_success(|ctx: &ScopeCtx<'_>| {
            crate::log_stack_end!(ctx.message(), duration_ms = ctx.elapsed_ms());
        });
        scope.on_failure(|ctx: &ScopeCtx<'_>| match ctx.error() {
            Some(err) => {
                crate::log_stack_failure!(
                    ctx.message(),
                    duration_ms = ctx.elapsed_ms(),
                    error = %err
                );
            }
            None => {
                crate::log_stack_failure!(ctx.message(), duration_ms = ctx.elapsed_ms());
            }
        });
        scope
    }

    /// Append the formatted elapsed duration to terminal log lines
    pub fn with_timing(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Register a condition that logs `"{message}...{suffix}"` when the
    /// handled error is an `E` (or carries one in its source chain)
    pub fn condition<E>(mut self, suffix: &str) -> Self
    where
        E: Error + 'static,
    {
        self.on_condition(match_condition::<E>(), log_condition(suffix));
        self
    }

    /// Replace the begin hook
    pub fn on_begin<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&ScopeCtx<'_>) + 'static,
    {
        self.replace_hook(Event::Begin, Box::new(hook));
        self
    }

    /// Replace the success hook
    pub fn on_success<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&ScopeCtx<'_>) + 'static,
    {
        self.replace_hook(Event::Success, Box::new(hook));
        self
    }

    /// Replace the failure hook
    pub fn on_failure<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&ScopeCtx<'_>) + 'static,
    {
        self.replace_hook(Event::Failure, Box::new(hook));
        self
    }

    /// Append an enter hook; enter hooks accumulate and run in
    /// registration order
    pub fn on_enter<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&ScopeCtx<'_>) + 'static,
    {
        self.append_hook(Event::Enter, Box::new(hook));
        self
    }

    /// Append an exit hook; exit hooks accumulate and run in registration
    /// order
    pub fn on_exit<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&ScopeCtx<'_>) + 'static,
    {
        self.append_hook(Event::Exit, Box::new(hook));
        self
    }

    /// Register a `(matcher, handler)` condition pair
    ///
    /// The most recently registered condition is consulted first; the
    /// first match handles the failure in place of the failure hooks.
    pub fn on_condition<M, F>(&mut self, matcher: M, handler: F) -> &mut Self
    where
        M: Fn(&(dyn Error + 'static)) -> bool + 'static,
        F: FnMut(&ScopeCtx<'_>) + 'static,
    {
        self.conditions.insert(
            0,
            Condition {
                matcher: Box::new(matcher),
                handler: Box::new(handler),
            },
        );
        self
    }

    /// Run `f` inside the scope
    ///
    /// Signals ENTER and BEGIN, runs `f`, then signals EXIT followed by
    /// SUCCESS, a matched condition handler, or FAILURE. The result is
    /// returned unchanged; a panic unwinding out of `f` fires the EXIT and
    /// FAILURE hooks before continuing to unwind.
    pub fn run<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: Error + 'static,
    {
        let guard = self.enter();
        let result = f();
        match &result {
            Ok(_) => guard.succeed(),
            Err(err) => guard.fail(err),
        }
        result
    }

    /// Enter the scope, returning a guard that completes it
    ///
    /// Signals ENTER then BEGIN and records the start timestamp. Dropping
    /// the guard completes the scope with success, or with failure if the
    /// thread is unwinding.
    pub fn enter(&mut self) -> StackGuard<'_> {
        self.elapsed = None;
        self.outcome = None;
        self.signal(Event::Enter, None);
        self.signal(Event::Begin, None);
        self.started = Some(Instant::now());
        StackGuard {
            scope: self,
            done: false,
        }
    }

    /// Consume the scope into a closure that runs `f` inside it on every
    /// call; the scope instance is reused across calls
    pub fn wrap<T, E, F>(mut self, mut f: F) -> impl FnMut() -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        E: Error + 'static,
    {
        move || self.run(&mut f)
    }

    /// Emit `"{message}...{suffix}"` through the scope's sink
    pub fn log(&self, suffix: &str) {
        let ctx = ScopeCtx {
            method: &self.method,
            message: &self.message,
            unit: self.unit,
            elapsed: self.elapsed,
            error: None,
        };
        ctx.log(suffix);
    }

    /// The scope label
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Elapsed wall-clock duration of the last completed run
    ///
    /// `None` before the scope first exits; reset on re-entry.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Outcome of the last completed run
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn replace_hook(&mut self, event: Event, hook: Hook) {
        let hooks = self.callbacks.entry(event).or_default();
        hooks.clear();
        hooks.push(hook);
    }

    fn append_hook(&mut self, event: Event, hook: Hook) {
        self.callbacks.entry(event).or_default().push(hook);
    }

    fn signal(&mut self, event: Event, error: Option<&(dyn Error + 'static)>) {
        let Self {
            ref method,
            ref message,
            unit,
            elapsed,
            ref mut callbacks,
            ..
        } = *self;
        if let Some(hooks) = callbacks.get_mut(&event) {
            let ctx = ScopeCtx {
                method,
                message,
                unit,
                elapsed,
                error,
            };
            for hook in hooks.iter_mut() {
                hook(&ctx);
            }
        }
    }

    fn dispatch_failure(&mut self, error: &(dyn Error + 'static)) {
        let matched = self
            .conditions
            .iter()
            .position(|condition| (condition.matcher)(error));
        match matched {
            Some(index) => {
                let Self {
                    ref method,
                    ref message,
                    unit,
                    elapsed,
                    ref mut conditions,
                    ..
                } = *self;
                let ctx = ScopeCtx {
                    method,
                    message,
                    unit,
                    elapsed,
                    error: Some(error),
                };
                (conditions[index].handler)(&ctx);
            }
            None => self.signal(Event::Failure, Some(error)),
        }
    }

    fn finish(&mut self, error: Option<&(dyn Error + 'static)>) {
        self.elapsed = self.started.take().map(|started| started.elapsed());
        self.outcome = Some(if error.is_some() {
            Outcome::Failure
        } else {
            Outcome::Success
        });
        self.signal(Event::Exit, error);
        match error {
            None => self.signal(Event::Success, None),
            Some(err) => self.dispatch_failure(err),
        }
    }

    fn finish_panicked(&mut self) {
        self.elapsed = self.started.take().map(|started| started.elapsed());
        self.outcome = Some(Outcome::Failure);
        self.signal(Event::Exit, None);
        self.signal(Event::Failure, None);
    }
}

/// Completion guard returned by [`Stacklog::enter`]
pub struct StackGuard<'a> {
    scope: &'a mut Stacklog,
    done: bool,
}

impl StackGuard<'_> {
    /// Complete the scope successfully
    pub fn succeed(mut self) {
        self.done = true;
        self.scope.finish(None);
    }

    /// Complete the scope with `error`
    ///
    /// Exit hooks fire, then the first matching condition handler or the
    /// failure hooks.
    pub fn fail(mut self, error: &(dyn Error + 'static)) {
        self.done = true;
        self.scope.finish(Some(error));
    }
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        if std::thread::panicking() {
            self.scope.finish_panicked();
        } else {
            self.scope.finish(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug)]
    struct Boom;

    impl std::fmt::Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "boom")
        }
    }

    impl Error for Boom {}

    fn recording_scope(message: &str) -> (Rc<RefCell<Vec<String>>>, Stacklog) {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let lines = Rc::clone(&lines);
            move |line: &str| lines.borrow_mut().push(line.to_owned())
        };
        (lines, Stacklog::new(sink, message))
    }

    #[test]
    fn test_default_hooks_render_original_lines() {
        let (lines, mut scope) = recording_scope("Running");
        let result: Result<(), Boom> = scope.run(|| Ok(()));
        assert!(result.is_ok());
        assert_eq!(*lines.borrow(), vec!["Running...", "Running...DONE"]);
    }

    #[test]
    fn test_terminal_hooks_are_replaced_not_stacked() {
        let (lines, mut scope) = recording_scope("Running");
        scope.on_success(|ctx: &ScopeCtx<'_>| ctx.log("FIRST"));
        scope.on_success(|ctx: &ScopeCtx<'_>| ctx.log("SECOND"));
        let _: Result<(), Boom> = scope.run(|| Ok(()));
        assert_eq!(*lines.borrow(), vec!["Running...", "Running...SECOND"]);
    }

    #[test]
    fn test_enter_and_exit_hooks_accumulate() {
        let (lines, mut scope) = recording_scope("Running");
        scope.on_enter(|ctx: &ScopeCtx<'_>| ctx.log("ENTER_A"));
        scope.on_enter(|ctx: &ScopeCtx<'_>| ctx.log("ENTER_B"));
        scope.on_exit(|ctx: &ScopeCtx<'_>| ctx.log("EXIT_A"));
        scope.on_exit(|ctx: &ScopeCtx<'_>| ctx.log("EXIT_B"));
        let _: Result<(), Boom> = scope.run(|| Ok(()));
        assert_eq!(
            *lines.borrow(),
            vec![
                "Running...ENTER_A",
                "Running...ENTER_B",
                "Running...",
                "Running...EXIT_A",
                "Running...EXIT_B",
                "Running...DONE",
            ]
        );
    }

    #[test]
    fn test_elapsed_and_outcome_lifecycle() {
        let (_lines, mut scope) = recording_scope("Running");
        assert!(scope.elapsed().is_none());
        assert!(scope.outcome().is_none());

        let result: Result<(), Boom> = scope.run(|| Ok(()));
        assert!(result.is_ok());
        assert!(scope.elapsed().is_some());
        assert_eq!(scope.outcome(), Some(Outcome::Success));

        let result: Result<(), Boom> = scope.run(|| Err(Boom));
        assert!(result.is_err());
        assert_eq!(scope.outcome(), Some(Outcome::Failure));
    }

    #[test]
    fn test_reentry_resets_state() {
        let (_lines, mut scope) = recording_scope("Running");
        let _: Result<(), Boom> = scope.run(|| Ok(()));
        let guard = scope.enter();
        assert!(guard.scope.elapsed.is_none());
        assert!(guard.scope.outcome.is_none());
        guard.succeed();
    }

    #[test]
    fn test_timed_lines_append_duration() {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let lines = Rc::clone(&lines);
            move |line: &str| lines.borrow_mut().push(line.to_owned())
        };
        let mut scope = Stacklog::new(sink, "Running").with_timing(Unit::Millis);
        let _: Result<(), Boom> = scope.run(|| Ok(()));

        let lines = lines.borrow();
        assert_eq!(lines[0], "Running...");
        assert!(lines[1].starts_with("Running...DONE in "));
        assert!(lines[1].ends_with(" ms"));
    }

    #[test]
    fn test_public_log_renders_through_sink() {
        let (lines, scope) = recording_scope("Running");
        scope.log("CHECKPOINT");
        assert_eq!(*lines.borrow(), vec!["Running...CHECKPOINT"]);
    }

    #[test]
    fn test_message_accessor() {
        let (_lines, scope) = recording_scope("Running");
        assert_eq!(scope.message(), "Running");
    }
}
