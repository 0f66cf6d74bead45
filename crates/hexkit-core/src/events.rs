//! Status event definitions.
//!
//! Everything the session reports to the presentation layer is a
//! `StatusEvent`. Events are cloneable and serializable so a front-end
//! can log or replay them; `description()` renders the human-readable
//! status text shown in the status monitor.

use serde::{Deserialize, Serialize};

/// Session status events, in the order the presentation layer sees them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEvent {
    /// A port was acquired during the startup scan.
    AutoConnected {
        /// Serial port path that was acquired.
        port: String,
    },
    /// The startup scan found no usable port.
    NoDeviceFound,
    /// An explicit connect attempt succeeded.
    Connected {
        /// Serial port path that was connected.
        port: String,
    },
    /// An explicit connect attempt failed.
    ConnectFailed {
        /// Why the port could not be opened.
        reason: String,
    },
    /// The connection was released.
    Disconnected,
    /// A command was written to the transport.
    Sent {
        /// The command, trailing newline stripped.
        command: String,
    },
    /// A command was logged instead of transmitted (no connection).
    Simulated {
        /// The command, trailing newline stripped.
        command: String,
    },
    /// A write to an open transport failed.
    TransmitFailed {
        /// Why the write failed.
        reason: String,
    },
    /// The port list was refreshed.
    PortsRefreshed {
        /// Number of ports found.
        count: usize,
    },
}

impl StatusEvent {
    /// Render the status text shown to the operator
    pub fn description(&self) -> String {
        match self {
            StatusEvent::AutoConnected { port } => {
                format!("Connected to robot automatically on {}", port)
            }
            StatusEvent::NoDeviceFound => {
                "No robot detected, running in simulation mode".to_string()
            }
            StatusEvent::Connected { port } => format!("Connected to robot on {}", port),
            StatusEvent::ConnectFailed { reason } => format!("Connection failed: {}", reason),
            StatusEvent::Disconnected => "Disconnected".to_string(),
            StatusEvent::Sent { command } => format!("Sent -> {}", command),
            StatusEvent::Simulated { command } => format!("[SIM] Command: {}", command),
            StatusEvent::TransmitFailed { reason } => format!("Error sending: {}", reason),
            StatusEvent::PortsRefreshed { count } => format!("Found {} serial port(s)", count),
        }
    }

    /// True for events produced by a command that never reached the wire
    pub fn is_simulated(&self) -> bool {
        matches!(self, StatusEvent::Simulated { .. })
    }
}

impl std::fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
