//! Serial port discovery and transport.
//!
//! Provides port enumeration and the low-level transport used by the
//! connection manager to reach the robot controller over USB serial.
//!
//! Supports:
//! - Port enumeration with USB metadata where available
//! - Opening ports at the fixed robot baud rate
//! - Write-only traffic (the robot protocol has no responses)

use std::io::{self, Write};
use std::time::Duration;

use hexkit_core::{ConnectionError, Result};

use super::{BAUD_RATE, READ_TIMEOUT};

/// Information about an available serial port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialPortInfo {
    /// Port name (e.g., "/dev/ttyUSB0", "COM3")
    pub port_name: String,

    /// Port description (e.g., "USB Serial Port")
    pub description: String,

    /// Manufacturer name if available
    pub manufacturer: Option<String>,

    /// Serial number if available
    pub serial_number: Option<String>,

    /// USB vendor ID if applicable
    pub vid: Option<u16>,

    /// USB product ID if applicable
    pub pid: Option<u16>,
}

impl SerialPortInfo {
    /// Create a new port info
    pub fn new(port_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            port_name: port_name.into(),
            description: description.into(),
            manufacturer: None,
            serial_number: None,
            vid: None,
            pid: None,
        }
    }

    /// Set manufacturer
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// Set serial number
    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }

    /// Set USB IDs
    pub fn with_usb_ids(mut self, vid: u16, pid: u16) -> Self {
        self.vid = Some(vid);
        self.pid = Some(pid);
        self
    }
}

/// List available serial ports on the system
///
/// Returns the ports in the order the host enumerates them; the
/// auto-connect scan tries them in exactly this order. The result
/// reflects current host state, nothing is cached. Enumeration failure
/// degrades to an empty list rather than an error, since a host with
/// no usable serial subsystem is equivalent to a host with no ports.
pub fn list_ports() -> Vec<SerialPortInfo> {
    match serialport::available_ports() {
        Ok(ports) => ports
            .iter()
            .map(|port| {
                let info = SerialPortInfo::new(&port.port_name, get_port_description(port));

                match &port.port_type {
                    serialport::SerialPortType::UsbPort(usb_info) => {
                        let mut info = info.with_usb_ids(usb_info.vid, usb_info.pid);
                        if let Some(ref mfg) = usb_info.manufacturer {
                            info = info.with_manufacturer(mfg);
                        }
                        if let Some(ref serial) = usb_info.serial_number {
                            info = info.with_serial_number(serial);
                        }
                        info
                    }
                    _ => info,
                }
            })
            .collect(),
        Err(e) => {
            tracing::error!("Failed to enumerate serial ports: {}", e);
            Vec::new()
        }
    }
}

/// Get a user-friendly description for a port
fn get_port_description(port: &serialport::SerialPortInfo) -> String {
    match &port.port_type {
        serialport::SerialPortType::UsbPort(usb_info) => {
            format!(
                "USB {} {}",
                usb_info.manufacturer.as_deref().unwrap_or("Device"),
                usb_info.product.as_deref().unwrap_or("Serial Port")
            )
        }
        serialport::SerialPortType::BluetoothPort => "Bluetooth Serial".to_string(),
        serialport::SerialPortType::PciPort => "PCI Serial".to_string(),
        _ => "Serial Port".to_string(),
    }
}

/// An open byte transport to the robot controller
///
/// Closing is by drop; the connection manager owns the boxed link for
/// the whole Connected lifetime.
pub trait SerialLink: Send {
    /// Write the full buffer to the port
    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// The port name this link was opened on
    fn name(&self) -> &str;
}

/// Factory for enumerating and opening serial ports
///
/// The connection manager talks to the host through this trait so
/// tests can substitute a fake backend.
pub trait SerialBackend: Send {
    /// List available ports, in host enumeration order
    fn list_ports(&self) -> Vec<SerialPortInfo>;

    /// Open a transport to the named port at the robot baud rate
    fn open(&self, port: &str) -> Result<Box<dyn SerialLink>>;
}

/// Real backend using the `serialport` crate
#[derive(Debug, Default)]
pub struct SystemBackend;

impl SystemBackend {
    /// Create a new system backend
    pub fn new() -> Self {
        Self
    }
}

impl SerialBackend for SystemBackend {
    fn list_ports(&self) -> Vec<SerialPortInfo> {
        list_ports()
    }

    fn open(&self, port: &str) -> Result<Box<dyn SerialLink>> {
        match serialport::new(port, BAUD_RATE).timeout(READ_TIMEOUT).open() {
            Ok(handle) => Ok(Box::new(SystemLink {
                port_name: port.to_string(),
                handle,
            })),
            Err(e) => {
                tracing::warn!("Failed to open serial port {}: {}", port, e);
                Err(ConnectionError::FailedToOpen {
                    port: port.to_string(),
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }
}

/// Transport over a real serial port
struct SystemLink {
    port_name: String,
    handle: Box<dyn serialport::SerialPort>,
}

impl SerialLink for SystemLink {
    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.handle.write_all(data)?;
        self.handle.flush()
    }

    fn name(&self) -> &str {
        &self.port_name
    }
}
