//! MIDI wire protocol types and the host port seam.

pub mod message;
pub mod port;
