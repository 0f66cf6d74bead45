//! # Hexkit Communication
//!
//! Serial communication and session management for Hexkit.
//! Covers port discovery, the connection state machine, the wire
//! command encoder, and the session controller that the presentation
//! layer drives.

pub mod commands;
pub mod communication;
pub mod session;

pub use commands::{MovementIntent, ParameterIntent};
pub use communication::{
    serial::{list_ports, SerialBackend, SerialLink, SerialPortInfo, SystemBackend},
    ConnectionManager, BAUD_RATE, READ_TIMEOUT,
};
pub use session::{
    scheduler::{Scheduler, TimerId, TokioScheduler},
    SessionController, RESET_DELAY,
};
