//! Connection authoring: pointer drags become network actions.
//!
//! The session is an owned value the host passes into each transition; there
//! is no process-wide drag state. At most one drag is active at a time;
//! starting a second one is rejected with [`LibraryError::DragInProgress`].

use uuid::Uuid;

use crate::error::LibraryError;
use crate::model::network::Point;

use super::editor_service::NetworkAction;

/// Transient cable geometry for the rendering collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CableSketch {
    pub from: Point,
    pub to: Point,
}

enum DragState {
    Idle,
    Dragging {
        source_processor_id: Uuid,
        source_connector_id: Uuid,
        source_connector_position: Point,
    },
}

/// State machine turning pointer input into connection actions.
#[derive(Default)]
pub struct AuthoringSession {
    state: DragState,
}

impl Default for DragState {
    fn default() -> Self {
        DragState::Idle
    }
}

impl AuthoringSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Begin a drag from an output connector.
    ///
    /// Returns the initial cable sketch, a zero-length cable at the source.
    /// The graph is not touched until the drop.
    pub fn start_drag(
        &mut self,
        source_processor_id: Uuid,
        source_connector_id: Uuid,
        source_connector_position: Point,
    ) -> Result<CableSketch, LibraryError> {
        if self.is_dragging() {
            return Err(LibraryError::DragInProgress);
        }
        self.state = DragState::Dragging {
            source_processor_id,
            source_connector_id,
            source_connector_position,
        };
        Ok(CableSketch {
            from: source_connector_position,
            to: source_connector_position,
        })
    }

    /// Move the loose cable end. No-op when no drag is active.
    pub fn move_drag(&mut self, pointer_position: Point) -> Option<CableSketch> {
        match self.state {
            DragState::Dragging {
                source_connector_position,
                ..
            } => Some(CableSketch {
                from: source_connector_position,
                to: pointer_position,
            }),
            DragState::Idle => None,
        }
    }

    /// Drop on a connector: yields the connect action and clears the session.
    ///
    /// Endpoint validation is the network's responsibility; the action is
    /// emitted whether or not it will be accepted.
    pub fn drop_on_connector(
        &mut self,
        destination_processor_id: Uuid,
        destination_connector_id: Uuid,
    ) -> Option<NetworkAction> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging {
                source_processor_id,
                source_connector_id,
                ..
            } => Some(NetworkAction::ConnectProcessors {
                source_processor_id,
                source_connector_id,
                destination_processor_id,
                destination_connector_id,
            }),
            DragState::Idle => None,
        }
    }

    /// Drop anywhere else: discard the transient cable, mutate nothing.
    pub fn drop_elsewhere(&mut self) {
        self.state = DragState::Idle;
    }
}
