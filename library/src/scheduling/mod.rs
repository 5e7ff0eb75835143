//! Per-window event scheduling.
//!
//! The external clock hands the scheduler non-overlapping tick windows; each
//! window is one synchronous pass over the schedulable processors. Events
//! produced in a pass are routed along connections into destination input
//! buffers; output processors drain theirs and dispatch to the host sink.

pub mod euclid;
pub mod output;

use std::sync::{Arc, RwLock};
use std::time::Instant;

use log::error;
use uuid::Uuid;

use crate::editor::handlers::write_network;
use crate::error::LibraryError;
use crate::midi::port::PortRegistry;
use crate::model::network::event::{ScheduledEvent, TickWindow};
use crate::model::network::network::Network;
use crate::model::network::processor::ProcessorKind;
use crate::util::timing::ScopedTimer;

/// Millisecond wall clock, the anchor for dispatch timestamps.
pub trait WallClock: Send + Sync {
    fn now_ms(&self) -> f64;
}

/// Milliseconds elapsed since construction.
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

/// Drives processors for each tick window and dispatches their events.
pub struct Scheduler {
    network: Arc<RwLock<Network>>,
    ports: Arc<dyn PortRegistry>,
    clock: Arc<dyn WallClock>,
    last_scan_end: Option<f64>,
}

impl Scheduler {
    pub fn new(
        network: Arc<RwLock<Network>>,
        ports: Arc<dyn PortRegistry>,
        clock: Arc<dyn WallClock>,
    ) -> Self {
        Self {
            network,
            ports,
            clock,
            last_scan_end: None,
        }
    }

    /// Process one tick window.
    ///
    /// Windows must partition the timeline: `scan_start` equals the previous
    /// window's `scan_end`. That contract belongs to the caller; debug builds
    /// assert it, because an overlap dispatches events twice and a gap drops
    /// them.
    ///
    /// A processor failing its scan is logged and skipped; the rest of the
    /// window still runs. Returns the number of processors that failed.
    pub fn process_window(&mut self, window: &TickWindow) -> Result<usize, LibraryError> {
        debug_assert!(
            window.scan_end >= window.scan_start,
            "tick window runs backwards: [{}, {})",
            window.scan_start,
            window.scan_end
        );
        if let Some(previous_end) = self.last_scan_end {
            debug_assert!(
                window.scan_start == previous_end,
                "tick windows must partition the timeline: window starts at {} but the previous one ended at {}",
                window.scan_start,
                previous_end
            );
        }
        self.last_scan_end = Some(window.scan_end);

        let _timer = ScopedTimer::debug("scheduler window");
        let origin = self.clock.now_ms() - window.offset * window.ticks_to_ms_multiplier;

        let mut network = write_network(&self.network)?;
        let order = network.schedulable_processors_in_order();
        let mut failures = 0;
        for processor_id in order {
            match Self::process_one(&mut network, processor_id, window, origin, self.ports.as_ref())
            {
                Ok(produced) => network.route_events(processor_id, &produced),
                Err(err) => {
                    failures += 1;
                    error!(
                        "processor {} failed to scan window [{}, {}): {}",
                        processor_id, window.scan_start, window.scan_end, err
                    );
                }
            }
        }
        Ok(failures)
    }

    /// Run one processor's scan. Returns the events it produced for routing.
    fn process_one(
        network: &mut Network,
        processor_id: Uuid,
        window: &TickWindow,
        origin: f64,
        ports: &dyn PortRegistry,
    ) -> Result<Vec<ScheduledEvent>, LibraryError> {
        let processor = network.processor_mut(processor_id).ok_or_else(|| {
            LibraryError::NotFound(format!("Processor {} not found", processor_id))
        })?;
        let pending = std::mem::take(&mut processor.pending);
        match &processor.kind {
            ProcessorKind::Euclid(settings) => euclid::process(settings, window),
            ProcessorKind::Output(settings) => {
                output::process(settings, &pending, window, origin, ports);
                Ok(Vec::new())
            }
        }
    }
}
