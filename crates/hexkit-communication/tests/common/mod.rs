//! Shared test doubles: an in-memory serial backend and a hand-driven
//! scheduler.

#![allow(dead_code)]

use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hexkit_communication::{
    Scheduler, SerialBackend, SerialLink, SerialPortInfo, TimerId,
};
use hexkit_core::{ConnectionError, Result};

/// Every write that reached a fake link, as (port, bytes)
pub type WriteRecord = Arc<Mutex<Vec<(String, Vec<u8>)>>>;

/// Serial backend over a fixed port list, with configurable failures
pub struct FakeBackend {
    ports: Vec<SerialPortInfo>,
    unopenable: HashSet<String>,
    broken_writes: HashSet<String>,
    writes: WriteRecord,
}

impl FakeBackend {
    pub fn new(port_names: &[&str]) -> Self {
        Self {
            ports: port_names
                .iter()
                .map(|name| SerialPortInfo::new(*name, "Fake Serial Port"))
                .collect(),
            unopenable: HashSet::new(),
            broken_writes: HashSet::new(),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make `port` fail on open
    pub fn failing_open(mut self, port: &str) -> Self {
        self.unopenable.insert(port.to_string());
        self
    }

    /// Make `port` open fine but fail every write
    pub fn failing_writes(mut self, port: &str) -> Self {
        self.broken_writes.insert(port.to_string());
        self
    }

    /// Handle to the record of all writes
    pub fn writes(&self) -> WriteRecord {
        self.writes.clone()
    }
}

impl SerialBackend for FakeBackend {
    fn list_ports(&self) -> Vec<SerialPortInfo> {
        self.ports.clone()
    }

    fn open(&self, port: &str) -> Result<Box<dyn SerialLink>> {
        if self.unopenable.contains(port) {
            return Err(ConnectionError::FailedToOpen {
                port: port.to_string(),
                reason: "device busy".to_string(),
            }
            .into());
        }
        Ok(Box::new(FakeLink {
            port_name: port.to_string(),
            broken: self.broken_writes.contains(port),
            writes: self.writes.clone(),
        }))
    }
}

struct FakeLink {
    port_name: String,
    broken: bool,
    writes: WriteRecord,
}

impl SerialLink for FakeLink {
    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        if self.broken {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device gone"));
        }
        self.writes
            .lock()
            .unwrap()
            .push((self.port_name.clone(), data.to_vec()));
        Ok(())
    }

    fn name(&self) -> &str {
        &self.port_name
    }
}

/// What a fake scheduler has been asked to do
#[derive(Debug, Default)]
pub struct SchedulerState {
    pub scheduled: Vec<(TimerId, Duration)>,
    pub canceled: Vec<TimerId>,
}

impl SchedulerState {
    /// Ids with a schedule call and no matching cancel
    pub fn live(&self) -> Vec<TimerId> {
        self.scheduled
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| !self.canceled.contains(id))
            .collect()
    }
}

/// Scheduler that records calls; the test fires ticks by hand
pub struct FakeScheduler {
    next_id: u64,
    state: Arc<Mutex<SchedulerState>>,
}

impl FakeScheduler {
    pub fn new() -> (Self, Arc<Mutex<SchedulerState>>) {
        let state = Arc::new(Mutex::new(SchedulerState::default()));
        (
            Self {
                next_id: 0,
                state: state.clone(),
            },
            state,
        )
    }
}

impl Scheduler for FakeScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId::from_raw(self.next_id);
        self.next_id += 1;
        self.state.lock().unwrap().scheduled.push((id, delay));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.state.lock().unwrap().canceled.push(id);
    }
}
