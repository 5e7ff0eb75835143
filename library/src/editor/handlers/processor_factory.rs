//! Builds processors with their connector sets.

use crate::model::network::Point;
use crate::model::network::connector::Connector;
use crate::model::network::processor::{
    EuclidSettings, OutputSettings, Processor, ProcessorKind,
};

pub struct ProcessorFactory;

impl ProcessorFactory {
    /// A Euclidean pattern generator with one input and one output connector.
    pub fn create_euclid(settings: EuclidSettings) -> Processor {
        let mut processor = Processor::new(ProcessorKind::Euclid(settings));
        processor
            .inputs
            .push(Connector::input(processor.id, Point::new(-4.0, 0.0)));
        processor
            .outputs
            .push(Connector::output(processor.id, Point::new(4.0, 0.0)));
        processor
    }

    /// A MIDI output processor with a single input connector.
    pub fn create_output(port_id: impl Into<String>) -> Processor {
        let mut processor = Processor::new(ProcessorKind::Output(OutputSettings {
            port_id: port_id.into(),
        }));
        processor
            .inputs
            .push(Connector::input(processor.id, Point::new(-4.0, 0.0)));
        processor
    }
}
