//! Connection lifecycle management.
//!
//! Owns at most one open serial transport and the Disconnected /
//! Connected state machine around it. All failures are surfaced as
//! errors to the caller, never panics; the session layer turns them
//! into status text.

pub mod serial;

use std::time::Duration;

use hexkit_core::{ConnectionError, Result};

use serial::{SerialBackend, SerialLink, SerialPortInfo, SystemBackend};

/// Fixed baud rate of the robot controller's serial interface
pub const BAUD_RATE: u32 = 9600;

/// Read timeout on an open port (the protocol is write-only; this only
/// bounds accidental reads)
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Manages the single serial connection to the robot controller
///
/// State machine: `Disconnected --connect--> Connected --disconnect-->
/// Disconnected`. The open transport is owned here for its entire
/// Connected lifetime and released on disconnect or drop.
pub struct ConnectionManager {
    backend: Box<dyn SerialBackend>,
    link: Option<Box<dyn SerialLink>>,
}

impl ConnectionManager {
    /// Create a manager backed by the host serial subsystem
    pub fn new() -> Self {
        Self::with_backend(Box::new(SystemBackend::new()))
    }

    /// Create a manager with an injected backend (used by tests)
    pub fn with_backend(backend: Box<dyn SerialBackend>) -> Self {
        Self {
            backend,
            link: None,
        }
    }

    /// List available ports, fresh from the host
    pub fn list_ports(&self) -> Vec<SerialPortInfo> {
        self.backend.list_ports()
    }

    /// Scan all ports and connect to the first one that opens
    ///
    /// Per-port open failures are expected (other devices, permission
    /// holes) and skipped without surfacing an error. Returns the name
    /// of the acquired port, or `None` when no port could be opened.
    pub fn auto_connect(&mut self) -> Option<String> {
        for info in self.backend.list_ports() {
            match self.backend.open(&info.port_name) {
                Ok(link) => {
                    tracing::info!("Auto-connected to {}", info.port_name);
                    self.link = Some(link);
                    return Some(info.port_name);
                }
                Err(e) => {
                    tracing::debug!("Skipping {}: {}", info.port_name, e);
                }
            }
        }
        None
    }

    /// Open a connection to an explicit port
    ///
    /// Replaces any existing connection. On failure the previous state
    /// is not restored; the manager is left Disconnected and the open
    /// error is returned. No automatic retry.
    pub fn connect(&mut self, port: &str) -> Result<()> {
        self.disconnect();
        let link = self.backend.open(port)?;
        tracing::info!("Connected to {}", port);
        self.link = Some(link);
        Ok(())
    }

    /// Release the transport if one is held; idempotent
    pub fn disconnect(&mut self) {
        if let Some(link) = self.link.take() {
            tracing::info!("Disconnected from {}", link.name());
        }
    }

    /// Whether a transport is currently held
    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    /// The port the current transport was opened on
    pub fn port_name(&self) -> Option<&str> {
        self.link.as_deref().map(|link| link.name())
    }

    /// Write raw bytes to the open transport
    ///
    /// Errors with `NotConnected` when no transport is held. A failed
    /// write is surfaced to the caller but does not change connection
    /// state; reconnection is the operator's call.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        let link = self
            .link
            .as_deref_mut()
            .ok_or(ConnectionError::NotConnected)?;
        link.write_all(data).map_err(|e| {
            tracing::warn!("Write to {} failed: {}", link.name(), e);
            ConnectionError::WriteFailed {
                port: link.name().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
