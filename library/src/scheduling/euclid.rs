//! Euclidean pattern generator.

use crate::error::LibraryError;
use crate::model::network::event::{EventKind, ScheduledEvent, TickWindow};
use crate::model::network::processor::EuclidSettings;

/// Whether step `index` of the rotated pattern is an onset.
///
/// Bresenham formulation of the Euclidean rhythm: a step sounds when the
/// pulse accumulator wraps past the step count.
pub fn is_onset(settings: &EuclidSettings, index: u64) -> bool {
    if settings.steps == 0 || settings.pulses == 0 {
        return false;
    }
    let steps = u64::from(settings.steps);
    let pulses = u64::from(settings.pulses).min(steps);
    let rotated = (index + u64::from(settings.rotation)) % steps;
    (rotated * pulses) % steps < pulses
}

/// Emit the note pairs whose onsets fall inside `[scan_start, scan_end)`.
///
/// Both the note-on and its paired note-off are emitted in the window that
/// contains the onset; the note-off timestamp may lie past `scan_end`.
pub fn process(
    settings: &EuclidSettings,
    window: &TickWindow,
) -> Result<Vec<ScheduledEvent>, LibraryError> {
    if settings.step_ticks <= 0.0 {
        return Err(LibraryError::Runtime(format!(
            "step duration must be positive, got {}",
            settings.step_ticks
        )));
    }
    if settings.steps == 0 {
        return Ok(Vec::new());
    }

    let mut events = Vec::new();
    let mut step = (window.scan_start / settings.step_ticks).ceil() as u64;
    loop {
        let onset_ticks = step as f64 * settings.step_ticks;
        if onset_ticks >= window.scan_end {
            break;
        }
        if is_onset(settings, step) {
            events.push(ScheduledEvent {
                timestamp_ticks: onset_ticks,
                kind: EventKind::NoteOn {
                    channel: settings.channel,
                    pitch: settings.pitch,
                    velocity: settings.velocity,
                },
            });
            events.push(ScheduledEvent {
                timestamp_ticks: onset_ticks + settings.note_ticks,
                kind: EventKind::NoteOff {
                    channel: settings.channel,
                    pitch: settings.pitch,
                    velocity: 0,
                },
            });
        }
        step += 1;
    }
    Ok(events)
}
