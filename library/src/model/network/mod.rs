//! Data model for the processor network.

pub mod connection;
pub mod connector;
pub mod event;
pub mod network;
pub mod processor;

use serde::{Deserialize, Serialize};

/// A position in editor space.
///
/// `z` exists for the 3D canvas collaborator; nothing in the core reads it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }
}
