//! Connector model: typed attachment points on a processor.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Point;

/// Direction of a connector.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorDirection {
    Input,
    Output,
}

/// A typed attachment point on a processor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Connector {
    pub id: Uuid,
    pub direction: ConnectorDirection,
    /// Offset relative to the owning processor, consumed by rendering collaborators.
    #[serde(default)]
    pub offset: Point,
    pub processor_id: Uuid,
}

impl Connector {
    pub fn input(processor_id: Uuid, offset: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            direction: ConnectorDirection::Input,
            offset,
            processor_id,
        }
    }

    pub fn output(processor_id: Uuid, offset: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            direction: ConnectorDirection::Output,
            offset,
            processor_id,
        }
    }
}
