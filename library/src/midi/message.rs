//! Wire message construction.

use crate::model::network::event::EventKind;

/// Status byte base for note-on messages, channel 1.
pub const NOTE_ON_STATUS: u8 = 0x90;
/// Status byte base for note-off messages, channel 1.
pub const NOTE_OFF_STATUS: u8 = 0x80;

/// Map an event to its three wire bytes.
///
/// Channels are 1-based internally and 0-based on the wire. Note-off velocity
/// is always zero on the wire, whatever the event carries. Kinds without a
/// wire mapping return `None`; callers skip them. Channel range is the event
/// producer's responsibility, this function does not clamp.
pub fn to_wire_bytes(kind: &EventKind) -> Option<[u8; 3]> {
    match kind {
        EventKind::NoteOn {
            channel,
            pitch,
            velocity,
        } => Some([NOTE_ON_STATUS + (channel - 1), *pitch, *velocity]),
        EventKind::NoteOff { channel, pitch, .. } => {
            Some([NOTE_OFF_STATUS + (channel - 1), *pitch, 0])
        }
        EventKind::AllNotesOff { .. } => None,
    }
}
