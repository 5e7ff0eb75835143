//! MIDI output processor.

use crate::midi::message;
use crate::midi::port::{PortRegistry, PortState};
use crate::model::network::event::{ScheduledEvent, TickWindow};
use crate::model::network::processor::OutputSettings;

/// Dispatch buffered input events to the host port.
///
/// A missing or disconnected port drops the whole slice silently; events are
/// not queued for later. Event kinds without a wire mapping are skipped.
/// `origin` anchors tick zero of the document to the wall clock.
pub fn process(
    settings: &OutputSettings,
    input: &[ScheduledEvent],
    window: &TickWindow,
    origin: f64,
    ports: &dyn PortRegistry,
) {
    let Some(port) = ports.port(&settings.port_id) else {
        return;
    };
    if port.state() != PortState::Connected {
        return;
    }

    for event in input {
        if let Some(data) = message::to_wire_bytes(&event.kind) {
            let timestamp = origin + event.timestamp_ticks * window.ticks_to_ms_multiplier;
            port.send(data, timestamp);
        }
    }
}
