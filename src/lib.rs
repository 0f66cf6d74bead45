//! # Hexkit
//!
//! A serial command console for a remotely operated hexapod robot.
//!
//! ## Architecture
//!
//! Hexkit is organized as a workspace with multiple crates:
//!
//! 1. **hexkit-core** - Errors, status events, and the event log
//! 2. **hexkit-communication** - Port discovery, connection manager,
//!    command encoder, session controller
//! 3. **hexkit** - Console front-end binary that drives the session
//!
//! The robot speaks a fire-and-forget ASCII protocol over USB serial at
//! 9600 baud: `F`/`B`/`L`/`R` for movement, `S<value>\n` and
//! `H<value>\n` for speed and leg height. When no robot is attached the
//! session runs in simulation mode and commands are only logged.

#![allow(dead_code)]

pub use hexkit_communication::{
    list_ports, ConnectionManager, MovementIntent, ParameterIntent, Scheduler, SerialBackend,
    SerialLink, SerialPortInfo, SessionController, TimerId, TokioScheduler, BAUD_RATE,
    READ_TIMEOUT, RESET_DELAY,
};
pub use hexkit_core::{ConnectionError, Error, EventLog, LogEntry, Result, StatusEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr (stdout belongs to the command console)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
