//! stacklog-core - Lifecycle logging for function calls and code blocks
//!
//! This crate provides the lifecycle scope and its supporting utilities:
//! - [`Stacklog`] scope with enter/begin/exit/success/failure hooks and
//!   matched-condition handlers
//! - `run`/`enter`/`wrap` invocation surfaces (block, guard, and wrapped
//!   closure)
//! - Elapsed-duration rendering with fixed or automatic units
//! - Argument introspection (`getnargs`) and sequence helpers
//!   (`clearlist`)
//! - A structured logging facility with one-shot initialization, canonical
//!   macros, and test capture
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

pub mod arity;
pub mod logging_facility;
pub mod scope;
pub mod time_format;
pub mod util;

// Re-export commonly used types
pub use arity::{getnargs, Arity};
pub use scope::{
    begin, fail, log_condition, match_condition, succeed, Hook, LogMethod, Outcome, ScopeCtx,
    StackGuard, Stacklog,
};
pub use stacklog_core_types::{schema, Event};
pub use stacklog_errors::{Result, StacklogError, StacklogErrorKind};
pub use time_format::{format_time, Unit};
pub use util::clearlist;
