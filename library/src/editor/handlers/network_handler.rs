use crate::error::LibraryError;
use crate::model::network::network::Network;
use crate::model::network::processor::Processor;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

pub struct NetworkHandler;

impl NetworkHandler {
    /// Insert a processor into the network. Returns the new processor's id.
    pub fn add_processor(
        network: &Arc<RwLock<Network>>,
        processor: Processor,
    ) -> Result<Uuid, LibraryError> {
        let mut net = super::write_network(network)?;
        net.add_processor(processor)
    }

    /// Remove a processor and cascade-delete its connections.
    ///
    /// Returns the ids of the removed connections.
    pub fn delete_processor(
        network: &Arc<RwLock<Network>>,
        processor_id: Uuid,
    ) -> Result<Vec<Uuid>, LibraryError> {
        let mut net = super::write_network(network)?;
        net.remove_processor(processor_id)
    }

    /// Connect an output connector to an input connector (with validation).
    pub fn connect_processors(
        network: &Arc<RwLock<Network>>,
        source_processor_id: Uuid,
        source_connector_id: Uuid,
        destination_processor_id: Uuid,
        destination_connector_id: Uuid,
    ) -> Result<Uuid, LibraryError> {
        let mut net = super::write_network(network)?;
        net.add_connection(
            source_processor_id,
            source_connector_id,
            destination_processor_id,
            destination_connector_id,
        )
    }

    /// Remove a connection by id. Absent ids are a no-op.
    pub fn disconnect_processors(
        network: &Arc<RwLock<Network>>,
        connection_id: Uuid,
    ) -> Result<(), LibraryError> {
        let mut net = super::write_network(network)?;
        net.remove_connection(connection_id);
        Ok(())
    }

    /// Toggle a processor's participation in scheduling.
    pub fn set_processor_enabled(
        network: &Arc<RwLock<Network>>,
        processor_id: Uuid,
        enabled: bool,
    ) -> Result<(), LibraryError> {
        let mut net = super::write_network(network)?;
        let processor = net.processor_mut(processor_id).ok_or_else(|| {
            LibraryError::NotFound(format!("Processor {} not found", processor_id))
        })?;
        processor.enabled = enabled;
        Ok(())
    }
}
