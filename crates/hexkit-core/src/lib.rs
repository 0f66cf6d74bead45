//! # Hexkit Core
//!
//! Core types for the Hexkit serial command session manager.
//! Provides the error taxonomy, status events, and the append-only
//! event log observed by the presentation layer.

pub mod error;
pub mod event_log;
pub mod events;

pub use error::{ConnectionError, Error, Result};
pub use event_log::{EventLog, LogEntry};
pub use events::StatusEvent;
