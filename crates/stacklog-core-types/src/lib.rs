//! Core types shared across stacklog facilities
//!
//! This crate provides the foundational vocabulary used by both the
//! lifecycle scope and the logging facility:
//!
//! - **Event**: the lifecycle event enum (enter/begin/exit/success/failure)
//! - **Schema constants**: canonical field keys, event names, and message
//!   suffixes used in rendered lines and structured log events

pub mod event;
pub mod schema;

pub use event::Event;
