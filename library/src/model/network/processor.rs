//! Processor model: the nodes of the network.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Point;
use super::connector::Connector;
use super::event::ScheduledEvent;

/// Settings of the Euclidean pattern generator variant.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EuclidSettings {
    pub steps: u32,
    pub pulses: u32,
    pub rotation: u32,
    /// Duration of one step in ticks.
    pub step_ticks: f64,
    /// Gate length in ticks.
    pub note_ticks: f64,
    pub channel: u8,
    pub pitch: u8,
    pub velocity: u8,
}

impl Default for EuclidSettings {
    fn default() -> Self {
        Self {
            steps: 16,
            pulses: 4,
            rotation: 0,
            step_ticks: 120.0,
            note_ticks: 90.0,
            channel: 1,
            pitch: 60,
            velocity: 100,
        }
    }
}

/// Settings of the MIDI output variant.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OutputSettings {
    /// Stable id of the host MIDI port this processor dispatches to.
    pub port_id: String,
}

/// Behavior variant of a processor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProcessorKind {
    Euclid(EuclidSettings),
    Output(OutputSettings),
}

impl ProcessorKind {
    /// Whether this variant participates in scheduling.
    pub fn is_schedulable(&self) -> bool {
        matches!(self, ProcessorKind::Euclid(_) | ProcessorKind::Output(_))
    }
}

/// A node in the network.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Processor {
    pub id: Uuid,
    #[serde(flatten)]
    pub kind: ProcessorKind,
    #[serde(default)]
    pub position: Point,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub inputs: Vec<Connector>,
    #[serde(default)]
    pub outputs: Vec<Connector>,
    /// Events delivered by upstream processors, consumed on the next scan.
    #[serde(skip)]
    pub pending: Vec<ScheduledEvent>,
}

impl Processor {
    pub fn new(kind: ProcessorKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position: Point::default(),
            enabled: true,
            inputs: Vec::new(),
            outputs: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Find a connector of this processor, input or output, by id.
    pub fn connector(&self, id: Uuid) -> Option<&Connector> {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .find(|c| c.id == id)
    }
}

const fn default_enabled() -> bool {
    true
}
