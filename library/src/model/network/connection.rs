//! Connection model: directed edges between processor connectors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directed edge from an output connector to an input connector.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Connection {
    pub id: Uuid,
    pub source_processor_id: Uuid,
    pub source_connector_id: Uuid,
    pub destination_processor_id: Uuid,
    pub destination_connector_id: Uuid,
}

impl Connection {
    pub fn new(
        source_processor_id: Uuid,
        source_connector_id: Uuid,
        destination_processor_id: Uuid,
        destination_connector_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_processor_id,
            source_connector_id,
            destination_processor_id,
            destination_connector_id,
        }
    }
}
