//! The processor network: topology store and integrity rules.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LibraryError;

use super::connection::Connection;
use super::connector::ConnectorDirection;
use super::event::ScheduledEvent;
use super::processor::Processor;

/// Owns all processors and connections of one editing session.
///
/// Creation order of processors is preserved and doubles as the scheduling
/// order. The graph is cycle-tolerant: loops and self-connections are legal
/// topology, since scheduling never walks the graph transitively.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Network {
    pub processors: Vec<Processor>,
    pub connections: Vec<Connection>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    pub fn save(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn processor(&self, id: Uuid) -> Option<&Processor> {
        self.processors.iter().find(|p| p.id == id)
    }

    pub fn processor_mut(&mut self, id: Uuid) -> Option<&mut Processor> {
        self.processors.iter_mut().find(|p| p.id == id)
    }

    pub fn connection(&self, id: Uuid) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    /// Insert a processor. The id must not collide with an existing one.
    pub fn add_processor(&mut self, processor: Processor) -> Result<Uuid, LibraryError> {
        if self.processor(processor.id).is_some() {
            return Err(LibraryError::DuplicateId(processor.id));
        }
        let id = processor.id;
        self.processors.push(processor);
        Ok(id)
    }

    /// Remove a processor and every connection touching it, atomically.
    ///
    /// Returns the ids of the removed connections.
    pub fn remove_processor(&mut self, id: Uuid) -> Result<Vec<Uuid>, LibraryError> {
        let index = self
            .processors
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LibraryError::NotFound(format!("Processor {} not found", id)))?;

        let removed = self.connections_of(id);
        self.connections
            .retain(|c| c.source_processor_id != id && c.destination_processor_id != id);
        self.processors.remove(index);

        Ok(removed)
    }

    /// Create a connection from an output connector to an input connector.
    ///
    /// Both endpoints must resolve and have the required directions. Endpoint
    /// tuples are not deduplicated: a second connection between the same two
    /// connectors fans the events out twice. Returns the new connection id.
    pub fn add_connection(
        &mut self,
        source_processor_id: Uuid,
        source_connector_id: Uuid,
        destination_processor_id: Uuid,
        destination_connector_id: Uuid,
    ) -> Result<Uuid, LibraryError> {
        self.validate_endpoint(
            source_processor_id,
            source_connector_id,
            ConnectorDirection::Output,
        )?;
        self.validate_endpoint(
            destination_processor_id,
            destination_connector_id,
            ConnectorDirection::Input,
        )?;

        let connection = Connection::new(
            source_processor_id,
            source_connector_id,
            destination_processor_id,
            destination_connector_id,
        );
        let id = connection.id;
        self.connections.push(connection);
        Ok(id)
    }

    fn validate_endpoint(
        &self,
        processor_id: Uuid,
        connector_id: Uuid,
        direction: ConnectorDirection,
    ) -> Result<(), LibraryError> {
        let processor = self.processor(processor_id).ok_or_else(|| {
            LibraryError::InvalidEndpoint(format!("Processor {} not found", processor_id))
        })?;
        let connector = processor.connector(connector_id).ok_or_else(|| {
            LibraryError::InvalidEndpoint(format!(
                "Connector {} not found on processor {}",
                connector_id, processor_id
            ))
        })?;
        if connector.direction != direction {
            return Err(LibraryError::InvalidEndpoint(format!(
                "Connector {} is {:?}, expected {:?}",
                connector_id, connector.direction, direction
            )));
        }
        Ok(())
    }

    /// Remove a connection by id. Removing an absent id is a no-op.
    pub fn remove_connection(&mut self, id: Uuid) {
        self.connections.retain(|c| c.id != id);
    }

    /// Ids of every connection where the processor is source or destination.
    pub fn connections_of(&self, processor_id: Uuid) -> Vec<Uuid> {
        self.connections
            .iter()
            .filter(|c| {
                c.source_processor_id == processor_id
                    || c.destination_processor_id == processor_id
            })
            .map(|c| c.id)
            .collect()
    }

    /// Ids of processors eligible for scheduling, in creation order.
    pub fn schedulable_processors_in_order(&self) -> Vec<Uuid> {
        self.processors
            .iter()
            .filter(|p| p.enabled && p.kind.is_schedulable())
            .map(|p| p.id)
            .collect()
    }

    /// Deliver a processor's produced events to every connected input buffer.
    ///
    /// Fan-out clones the slice once per outgoing connection.
    pub fn route_events(&mut self, source_processor_id: Uuid, events: &[ScheduledEvent]) {
        if events.is_empty() {
            return;
        }
        let destinations: Vec<Uuid> = self
            .connections
            .iter()
            .filter(|c| c.source_processor_id == source_processor_id)
            .map(|c| c.destination_processor_id)
            .collect();
        for destination in destinations {
            if let Some(processor) = self.processor_mut(destination) {
                processor.pending.extend_from_slice(events);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::Point;
    use crate::model::network::connector::Connector;
    use crate::model::network::processor::{
        EuclidSettings, OutputSettings, Processor, ProcessorKind,
    };

    fn generator() -> Processor {
        let mut p = Processor::new(ProcessorKind::Euclid(EuclidSettings::default()));
        p.inputs.push(Connector::input(p.id, Point::default()));
        p.outputs.push(Connector::output(p.id, Point::default()));
        p
    }

    fn sink() -> Processor {
        let mut p = Processor::new(ProcessorKind::Output(OutputSettings {
            port_id: "test".to_string(),
        }));
        p.inputs.push(Connector::input(p.id, Point::default()));
        p
    }

    fn setup_pair() -> (Network, Uuid, Uuid, Uuid, Uuid) {
        let mut network = Network::new();
        let source = generator();
        let destination = sink();
        let (source_id, out_id) = (source.id, source.outputs[0].id);
        let (destination_id, in_id) = (destination.id, destination.inputs[0].id);
        network.add_processor(source).unwrap();
        network.add_processor(destination).unwrap();
        (network, source_id, out_id, destination_id, in_id)
    }

    #[test]
    fn test_add_connection_appears_on_both_endpoints() {
        let (mut network, source_id, out_id, destination_id, in_id) = setup_pair();

        let connection_id = network
            .add_connection(source_id, out_id, destination_id, in_id)
            .unwrap();

        assert!(network.connections_of(source_id).contains(&connection_id));
        assert!(network.connections_of(destination_id).contains(&connection_id));
    }

    #[test]
    fn test_wrong_direction_rejected_and_graph_unchanged() {
        let (mut network, source_id, out_id, destination_id, in_id) = setup_pair();

        // Destination connector must be an input.
        let result = network.add_connection(source_id, out_id, source_id, out_id);
        assert!(matches!(result, Err(LibraryError::InvalidEndpoint(_))));

        // Source connector must be an output.
        let result = network.add_connection(destination_id, in_id, destination_id, in_id);
        assert!(matches!(result, Err(LibraryError::InvalidEndpoint(_))));

        assert!(network.connections.is_empty());
    }

    #[test]
    fn test_missing_endpoint_rejected() {
        let (mut network, source_id, out_id, _, _) = setup_pair();

        let result = network.add_connection(source_id, out_id, Uuid::new_v4(), Uuid::new_v4());
        assert!(matches!(result, Err(LibraryError::InvalidEndpoint(_))));
        assert!(network.connections.is_empty());
    }

    #[test]
    fn test_duplicate_processor_id_rejected() {
        let mut network = Network::new();
        let processor = generator();
        let duplicate = processor.clone();
        network.add_processor(processor).unwrap();

        let result = network.add_processor(duplicate);
        assert!(matches!(result, Err(LibraryError::DuplicateId(_))));
        assert_eq!(network.processors.len(), 1);
    }

    #[test]
    fn test_duplicate_endpoint_tuple_permitted() {
        let (mut network, source_id, out_id, destination_id, in_id) = setup_pair();

        let first = network
            .add_connection(source_id, out_id, destination_id, in_id)
            .unwrap();
        let second = network
            .add_connection(source_id, out_id, destination_id, in_id)
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(network.connections.len(), 2);
    }

    #[test]
    fn test_self_connection_permitted() {
        let mut network = Network::new();
        let processor = generator();
        let (id, out_id, in_id) = (processor.id, processor.outputs[0].id, processor.inputs[0].id);
        network.add_processor(processor).unwrap();

        network.add_connection(id, out_id, id, in_id).unwrap();
        assert_eq!(network.connections_of(id).len(), 1);
    }

    #[test]
    fn test_remove_processor_cascades_connections() {
        let (mut network, source_id, out_id, destination_id, in_id) = setup_pair();
        let connection_id = network
            .add_connection(source_id, out_id, destination_id, in_id)
            .unwrap();

        let removed = network.remove_processor(source_id).unwrap();

        assert_eq!(removed, vec![connection_id]);
        assert!(network.processor(source_id).is_none());
        assert!(network.connections_of(source_id).is_empty());
        assert!(
            network
                .connections
                .iter()
                .all(|c| c.source_processor_id != source_id
                    && c.destination_processor_id != source_id)
        );
    }

    #[test]
    fn test_remove_absent_processor_errors() {
        let mut network = Network::new();
        let result = network.remove_processor(Uuid::new_v4());
        assert!(matches!(result, Err(LibraryError::NotFound(_))));
    }

    #[test]
    fn test_remove_absent_connection_is_noop() {
        let (mut network, source_id, out_id, destination_id, in_id) = setup_pair();
        network
            .add_connection(source_id, out_id, destination_id, in_id)
            .unwrap();

        network.remove_connection(Uuid::new_v4());
        assert_eq!(network.connections.len(), 1);
    }

    #[test]
    fn test_schedulable_order_follows_creation_and_skips_disabled() {
        let (mut network, source_id, _, destination_id, _) = setup_pair();

        assert_eq!(
            network.schedulable_processors_in_order(),
            vec![source_id, destination_id]
        );

        network.processor_mut(source_id).unwrap().enabled = false;
        assert_eq!(
            network.schedulable_processors_in_order(),
            vec![destination_id]
        );
    }

    #[test]
    fn test_route_events_fans_out_per_connection() {
        let (mut network, source_id, out_id, destination_id, in_id) = setup_pair();
        network
            .add_connection(source_id, out_id, destination_id, in_id)
            .unwrap();
        network
            .add_connection(source_id, out_id, destination_id, in_id)
            .unwrap();

        let event = crate::model::network::event::ScheduledEvent {
            timestamp_ticks: 0.0,
            kind: crate::model::network::event::EventKind::NoteOn {
                channel: 1,
                pitch: 60,
                velocity: 100,
            },
        };
        network.route_events(source_id, &[event]);

        let destination = network.processor(destination_id).unwrap();
        assert_eq!(destination.pending.len(), 2);
    }

    #[test]
    fn test_save_load_round_trip_preserves_topology() {
        let (mut network, source_id, out_id, destination_id, in_id) = setup_pair();
        network
            .add_connection(source_id, out_id, destination_id, in_id)
            .unwrap();

        let json = network.save().unwrap();
        let loaded = Network::load(&json).unwrap();

        assert_eq!(loaded.processors.len(), 2);
        assert_eq!(loaded.connections, network.connections);
        assert_eq!(
            loaded.schedulable_processors_in_order(),
            network.schedulable_processors_in_order()
        );
    }
}
