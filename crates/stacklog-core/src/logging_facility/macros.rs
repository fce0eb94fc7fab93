//! Canonical structured logging macros
//!
//! These macros emit the component/op/event/duration_ms fields that the
//! traced scope constructor and the test capture layer agree on.

/// Log the begin of a scope
///
/// # Example
///
/// ```
/// # use stacklog_core::log_stack_start;
/// log_stack_start!("fit_model");
/// log_stack_start!("fit_model", attempt = 2);
/// ```
#[macro_export]
macro_rules! log_stack_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = stacklog_core_types::schema::EVENT_BEGIN,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = stacklog_core_types::schema::EVENT_BEGIN,
            $($field)*
        );
    };
}

/// Log the successful end of a scope
///
/// # Example
///
/// ```
/// # use stacklog_core::log_stack_end;
/// log_stack_end!("fit_model", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_stack_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = stacklog_core_types::schema::EVENT_SUCCESS,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = stacklog_core_types::schema::EVENT_SUCCESS,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a scope failure
///
/// # Example
///
/// ```ignore
/// # use stacklog_core::log_stack_failure;
/// log_stack_failure!("fit_model", duration_ms = 10, error = %err);
/// ```
#[macro_export]
macro_rules! log_stack_failure {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = stacklog_core_types::schema::EVENT_FAILURE,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = stacklog_core_types::schema::EVENT_FAILURE,
            duration_ms = $duration,
            $($field)*
        );
    };
}
