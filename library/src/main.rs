use std::env;
use std::error::Error;
use std::fs;
use std::sync::{Arc, RwLock};

use library::editor::handlers::processor_factory::ProcessorFactory;
use library::midi::port::{LogPort, StaticPortRegistry};
use library::model::network::event::TickWindow;
use library::model::network::network::Network;
use library::model::network::processor::EuclidSettings;
use library::scheduling::{Scheduler, SystemClock};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let network = if args.len() > 1 {
        let json_str = fs::read_to_string(&args[1])?;
        Network::load(&json_str)?
    } else {
        demo_network()?
    };

    let network = Arc::new(RwLock::new(network));
    let mut registry = StaticPortRegistry::new();
    registry.insert("log", Arc::new(LogPort));

    let mut scheduler = Scheduler::new(network, Arc::new(registry), Arc::new(SystemClock::new()));

    // One bar of sixteenth-note windows at 120 BPM, 480 ticks per quarter.
    let ticks_to_ms_multiplier = 500.0 / 480.0;
    for i in 0..16 {
        let window = TickWindow {
            scan_start: f64::from(i) * 120.0,
            scan_end: f64::from(i + 1) * 120.0,
            now_to_scan_start: 0.0,
            ticks_to_ms_multiplier,
            offset: 0.0,
        };
        scheduler.process_window(&window)?;
    }

    Ok(())
}

/// A generator feeding the logging output port.
fn demo_network() -> Result<Network, Box<dyn Error>> {
    let mut network = Network::new();

    let euclid = ProcessorFactory::create_euclid(EuclidSettings::default());
    let output = ProcessorFactory::create_output("log");
    let (euclid_id, source_connector) = (euclid.id, euclid.outputs[0].id);
    let (output_id, destination_connector) = (output.id, output.inputs[0].id);

    network.add_processor(euclid)?;
    network.add_processor(output)?;
    network.add_connection(euclid_id, source_connector, output_id, destination_connector)?;

    Ok(network)
}
