//! Host MIDI port seam.
//!
//! The host subsystem owns device discovery and permission negotiation; the
//! library reaches it through these traits only.

use std::collections::HashMap;
use std::sync::Arc;

/// Connection state of a host port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortState {
    Connected,
    Disconnected,
}

/// An output port handle usable for dispatch and state query.
pub trait MidiOutPort: Send + Sync {
    fn state(&self) -> PortState;

    /// Queue three wire bytes for delivery at `timestamp_ms`. Fire-and-forget;
    /// the host sink delivers at the requested instant on its own clock.
    fn send(&self, data: [u8; 3], timestamp_ms: f64);
}

/// Resolves stable port ids to handles. Absent ids are tolerated by callers.
pub trait PortRegistry: Send + Sync {
    fn port(&self, id: &str) -> Option<Arc<dyn MidiOutPort>>;
}

/// In-memory registry keyed by port id.
#[derive(Default)]
pub struct StaticPortRegistry {
    ports: HashMap<String, Arc<dyn MidiOutPort>>,
}

impl StaticPortRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, port: Arc<dyn MidiOutPort>) {
        self.ports.insert(id.into(), port);
    }
}

impl PortRegistry for StaticPortRegistry {
    fn port(&self, id: &str) -> Option<Arc<dyn MidiOutPort>> {
        self.ports.get(id).cloned()
    }
}

/// A port that logs every message instead of reaching hardware.
pub struct LogPort;

impl MidiOutPort for LogPort {
    fn state(&self) -> PortState {
        PortState::Connected
    }

    fn send(&self, data: [u8; 3], timestamp_ms: f64) {
        log::info!(
            "midi out [{:#04x} {} {}] at {:.3} ms",
            data[0],
            data[1],
            data[2],
            timestamp_ms
        );
    }
}
