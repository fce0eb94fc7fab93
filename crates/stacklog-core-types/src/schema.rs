//! Canonical schema constants for rendered lines and structured events
//!
//! These constants keep line rendering, the structured logging macros, and
//! the test capture layer in agreement.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_ENTER: &str = "enter";
pub const EVENT_BEGIN: &str = "begin";
pub const EVENT_EXIT: &str = "exit";
pub const EVENT_SUCCESS: &str = "success";
pub const EVENT_FAILURE: &str = "failure";

// Rendered line vocabulary: "{message}...{suffix}"
pub const MESSAGE_SEPARATOR: &str = "...";
pub const SUFFIX_DONE: &str = "DONE";
pub const SUFFIX_FAILURE: &str = "FAILURE";
