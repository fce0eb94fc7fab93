//! Lifecycle event vocabulary
//!
//! A scope signals these events in a fixed order: `Enter` and `Begin` when
//! the wrapped code is about to run, then `Exit` followed by exactly one of
//! `Success` or `Failure` (or a matched condition handler in place of
//! `Failure`).

use serde::{Deserialize, Serialize};

use crate::schema;

/// A lifecycle point at which callbacks may fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Event {
    /// Fired first, every time the scope is entered
    Enter,
    /// Fired after `Enter`, before the wrapped code runs
    Begin,
    /// Fired on every exit, before the outcome is known to callbacks
    Exit,
    /// Fired when the wrapped code completed without error
    Success,
    /// Fired when the wrapped code failed and no condition matched
    Failure,
}

impl Event {
    /// All events, in signal order
    pub const ALL: [Event; 5] = [
        Event::Enter,
        Event::Begin,
        Event::Exit,
        Event::Success,
        Event::Failure,
    ];

    /// Canonical name used in structured log events
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::Enter => schema::EVENT_ENTER,
            Event::Begin => schema::EVENT_BEGIN,
            Event::Exit => schema::EVENT_EXIT,
            Event::Success => schema::EVENT_SUCCESS,
            Event::Failure => schema::EVENT_FAILURE,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
