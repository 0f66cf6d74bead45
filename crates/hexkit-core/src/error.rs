//! Error handling for Hexkit
//!
//! Provides error types for the serial session layers:
//! - Connection errors (port open, transport writes)
//! - A unified `Error` used in public APIs
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Connection error type
///
/// Represents errors related to communication with the robot controller
/// over the serial link.
#[derive(Error, Debug, Clone)]
pub enum ConnectionError {
    /// No connection is currently open
    #[error("Not connected to a robot controller")]
    NotConnected,

    /// Failed to open port
    #[error("Failed to open port {port}: {reason}")]
    FailedToOpen {
        /// The name of the port that failed to open.
        port: String,
        /// The reason the port failed to open.
        reason: String,
    },

    /// No port could be acquired during an auto-connect scan
    #[error("No robot controller found on any serial port")]
    NoPortAvailable,

    /// Write to an open transport failed
    #[error("Failed to write to {port}: {reason}")]
    WriteFailed {
        /// The port the write was issued on.
        port: String,
        /// The reason the write failed.
        reason: String,
    },

    /// Serial port enumeration failed
    #[error("Port enumeration failed: {reason}")]
    EnumerationFailed {
        /// The reason enumeration failed.
        reason: String,
    },

    /// Generic connection error
    #[error("Connection error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for Hexkit
///
/// A unified error type used in public APIs across the workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection error
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a connection error
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Error::Connection(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
