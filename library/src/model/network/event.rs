//! Scheduled events and the tick windows they are scanned in.

use serde::{Deserialize, Serialize};

/// One time slice handed to the scheduler by the external clock.
///
/// Windows form a non-overlapping, monotonically increasing partition of the
/// timeline: `scan_start` of each window equals `scan_end` of the previous
/// one. The interval is half-open, `[scan_start, scan_end)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickWindow {
    /// Window start in ticks from timeline start (inclusive).
    pub scan_start: f64,
    /// Window end in ticks from timeline start (exclusive).
    pub scan_end: f64,
    /// Ticks from the current timeline position to `scan_start`.
    pub now_to_scan_start: f64,
    /// Duration of one tick in milliseconds.
    pub ticks_to_ms_multiplier: f64,
    /// Ticks from document start to timeline start.
    pub offset: f64,
}

/// Event payload variants.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventKind {
    NoteOn { channel: u8, pitch: u8, velocity: u8 },
    NoteOff { channel: u8, pitch: u8, velocity: u8 },
    AllNotesOff { channel: u8 },
}

/// An event produced by a processor, awaiting dispatch.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ScheduledEvent {
    /// Ticks since transport start.
    pub timestamp_ticks: f64,
    #[serde(flatten)]
    pub kind: EventKind,
}
