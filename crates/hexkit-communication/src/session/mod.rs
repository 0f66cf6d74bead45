//! Session controller.
//!
//! Orchestrates the connection manager, command encoder, and event log
//! behind the small API the presentation layer drives: movement
//! triggers, parameter changes, connect/disconnect, and the
//! movement-monitor expiry tick.

pub mod scheduler;

use std::time::Duration;

use hexkit_core::{EventLog, StatusEvent};

use crate::commands::{MovementIntent, ParameterIntent};
use crate::communication::serial::SerialPortInfo;
use crate::communication::ConnectionManager;
use scheduler::{Scheduler, TimerId};

/// Quiet period after which the movement monitor reverts to Idle
pub const RESET_DELAY: Duration = Duration::from_millis(1500);

/// The serial command session
///
/// When no connection is held, commands are logged as simulated instead
/// of sent. Simulation is a normal operating mode, not a failure; the
/// only difference is the log marker and the absence of wire traffic.
pub struct SessionController {
    connection: ConnectionManager,
    scheduler: Box<dyn Scheduler>,
    log: EventLog,
    active_action: Option<MovementIntent>,
    pending_reset: Option<TimerId>,
    reset_delay: Duration,
}

impl SessionController {
    /// Create a session over a connection manager and scheduler
    pub fn new(connection: ConnectionManager, scheduler: Box<dyn Scheduler>) -> Self {
        Self::with_reset_delay(connection, scheduler, RESET_DELAY)
    }

    /// Create a session with a custom movement reset delay
    pub fn with_reset_delay(
        connection: ConnectionManager,
        scheduler: Box<dyn Scheduler>,
        reset_delay: Duration,
    ) -> Self {
        Self {
            connection,
            scheduler,
            log: EventLog::new(),
            active_action: None,
            pending_reset: None,
            reset_delay,
        }
    }

    /// Scan all ports at startup and connect to the first that opens
    ///
    /// Logs the greeting the operator sees: which port was acquired, or
    /// that the session is running in simulation mode. Returns whether
    /// a port was acquired.
    pub fn try_auto_connect(&mut self) -> bool {
        match self.connection.auto_connect() {
            Some(port) => {
                self.log.append(StatusEvent::AutoConnected { port });
                true
            }
            None => {
                self.log.append(StatusEvent::NoDeviceFound);
                false
            }
        }
    }

    /// Re-enumerate available ports
    pub fn refresh_ports(&mut self) -> Vec<SerialPortInfo> {
        let ports = self.connection.list_ports();
        self.log.append(StatusEvent::PortsRefreshed { count: ports.len() });
        ports
    }

    /// Connect to an explicit port, logging the outcome
    ///
    /// A failed attempt leaves the session Disconnected and is reported
    /// only as status text; it never propagates.
    pub fn connect(&mut self, port: &str) -> bool {
        match self.connection.connect(port) {
            Ok(()) => {
                self.log.append(StatusEvent::Connected {
                    port: port.to_string(),
                });
                true
            }
            Err(e) => {
                self.log.append(StatusEvent::ConnectFailed {
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    /// Release the connection; a no-op when already disconnected
    pub fn disconnect(&mut self) {
        if self.connection.is_connected() {
            self.connection.disconnect();
            self.log.append(StatusEvent::Disconnected);
        }
    }

    /// Issue a directional movement command
    ///
    /// Transmits (or simulates) the wire command, then marks the intent
    /// as the current action and restarts the expiry timer. Each call
    /// cancels and replaces any pending expiry, so Idle is always
    /// measured from the last intent.
    pub fn issue_movement(&mut self, intent: MovementIntent) {
        self.send_command(&intent.encode());

        self.active_action = Some(intent);
        if let Some(id) = self.pending_reset.take() {
            self.scheduler.cancel(id);
        }
        self.pending_reset = Some(self.scheduler.schedule(self.reset_delay));
    }

    /// Issue a parameter change command
    ///
    /// Fire-and-forget; does not touch the movement monitor.
    pub fn issue_parameter(&mut self, param: ParameterIntent) {
        self.send_command(&param.encode());
    }

    /// Deliver an expiry tick from the scheduling substrate
    ///
    /// Resolves the movement monitor to Idle only when the tick belongs
    /// to the live timer; ticks from superseded timers are stale and
    /// ignored.
    pub fn on_expiry_tick(&mut self, id: TimerId) {
        if self.pending_reset == Some(id) {
            self.pending_reset = None;
            self.active_action = None;
        }
    }

    /// The movement shown in the movement monitor; `None` is Idle
    pub fn current_action(&self) -> Option<MovementIntent> {
        self.active_action
    }

    /// Whether a transport is currently held
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// The port the current transport was opened on
    pub fn port_name(&self) -> Option<&str> {
        self.connection.port_name()
    }

    /// The status log, oldest entry first
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Transmit a wire command, or log it as simulated when
    /// disconnected. Every call appends exactly one log entry.
    fn send_command(&mut self, wire: &str) {
        let command = wire.trim_end().to_string();
        if self.connection.is_connected() {
            match self.connection.write(wire.as_bytes()) {
                Ok(()) => self.log.append(StatusEvent::Sent { command }),
                // A failed write is reported but the connection is kept;
                // see DESIGN.md, reconnection stays operator-triggered.
                Err(e) => self.log.append(StatusEvent::TransmitFailed {
                    reason: e.to_string(),
                }),
            }
        } else {
            self.log.append(StatusEvent::Simulated { command });
        }
    }
}
