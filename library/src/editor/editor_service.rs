//! Editor service: action dispatch over the shared network and typed
//! change notification.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, RwLock};

use uuid::Uuid;

use crate::error::LibraryError;
use crate::model::network::network::Network;
use crate::model::network::processor::Processor;

use super::handlers::network_handler::NetworkHandler;
use super::handlers::{read_network, write_network};

/// Graph mutation actions, as emitted by connection authoring and host shells.
#[derive(Clone, Debug, PartialEq)]
pub enum NetworkAction {
    AddProcessor {
        processor: Processor,
    },
    ConnectProcessors {
        source_processor_id: Uuid,
        source_connector_id: Uuid,
        destination_processor_id: Uuid,
        destination_connector_id: Uuid,
    },
    DisconnectProcessors {
        connection_id: Uuid,
    },
    DeleteProcessor {
        processor_id: Uuid,
    },
    SetProcessorEnabled {
        processor_id: Uuid,
        enabled: bool,
    },
}

/// Fired after a mutation has been applied, with the resulting state.
#[derive(Clone, Debug)]
pub struct ChangeEvent {
    pub action: NetworkAction,
    pub network: Network,
}

pub type SubscriptionId = Uuid;

/// Facade over the shared network: applies actions and notifies subscribers.
///
/// The network behind the service is the single authoritative copy;
/// collaborators hold the `Arc` and take short-lived guards, never a clone.
pub struct EditorService {
    network: Arc<RwLock<Network>>,
    subscribers: Mutex<Vec<(SubscriptionId, Sender<ChangeEvent>)>>,
}

impl EditorService {
    pub fn new(network: Arc<RwLock<Network>>) -> Self {
        Self {
            network,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn network(&self) -> Arc<RwLock<Network>> {
        self.network.clone()
    }

    /// Access the network immutably via a closure.
    /// Prefer this over `network()` to avoid exposing the lock.
    pub fn with_network<R>(&self, f: impl FnOnce(&Network) -> R) -> Result<R, LibraryError> {
        let guard = read_network(&self.network)?;
        Ok(f(&guard))
    }

    /// Access the network mutably via a closure. Subscribers are not
    /// notified; use [`EditorService::dispatch`] for user-visible mutations.
    pub fn with_network_mut<R>(
        &self,
        f: impl FnOnce(&mut Network) -> R,
    ) -> Result<R, LibraryError> {
        let mut guard = write_network(&self.network)?;
        Ok(f(&mut guard))
    }

    /// Replace the network with one loaded from a JSON document.
    ///
    /// Subscribers are not notified; hosts re-read the state after a load.
    pub fn load_network(&self, json_str: &str) -> Result<(), LibraryError> {
        let loaded = Network::load(json_str)?;
        let mut guard = write_network(&self.network)?;
        *guard = loaded;
        Ok(())
    }

    /// Serialize the current network to a JSON document.
    pub fn save_network(&self) -> Result<String, LibraryError> {
        let guard = read_network(&self.network)?;
        Ok(guard.save()?)
    }

    /// Apply an action and notify subscribers.
    ///
    /// Returns the id the mutation created, when it creates one. Failed
    /// actions leave the network untouched and notify nobody.
    pub fn dispatch(&self, action: NetworkAction) -> Result<Option<Uuid>, LibraryError> {
        let created = match &action {
            NetworkAction::AddProcessor { processor } => {
                Some(NetworkHandler::add_processor(&self.network, processor.clone())?)
            }
            NetworkAction::ConnectProcessors {
                source_processor_id,
                source_connector_id,
                destination_processor_id,
                destination_connector_id,
            } => Some(NetworkHandler::connect_processors(
                &self.network,
                *source_processor_id,
                *source_connector_id,
                *destination_processor_id,
                *destination_connector_id,
            )?),
            NetworkAction::DisconnectProcessors { connection_id } => {
                NetworkHandler::disconnect_processors(&self.network, *connection_id)?;
                None
            }
            NetworkAction::DeleteProcessor { processor_id } => {
                NetworkHandler::delete_processor(&self.network, *processor_id)?;
                None
            }
            NetworkAction::SetProcessorEnabled {
                processor_id,
                enabled,
            } => {
                NetworkHandler::set_processor_enabled(&self.network, *processor_id, *enabled)?;
                None
            }
        };

        self.notify(action)?;
        Ok(created)
    }

    /// Subscribe to change notifications.
    ///
    /// The returned receiver delivers one [`ChangeEvent`] per applied action
    /// until [`EditorService::unsubscribe`] is called or the receiver is
    /// dropped; dropped receivers are pruned on the next notification.
    pub fn subscribe(&self) -> (SubscriptionId, Receiver<ChangeEvent>) {
        let (sender, receiver) = mpsc::channel();
        let id = Uuid::new_v4();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push((id, sender));
        }
        (id, receiver)
    }

    /// Tear down a subscription. Absent ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|(subscription_id, _)| *subscription_id != id);
        }
    }

    fn notify(&self, action: NetworkAction) -> Result<(), LibraryError> {
        let snapshot = {
            let guard = read_network(&self.network)?;
            guard.clone()
        };
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|_| LibraryError::Runtime("Lock Poisoned".to_string()))?;
        subscribers.retain(|(_, sender)| {
            sender
                .send(ChangeEvent {
                    action: action.clone(),
                    network: snapshot.clone(),
                })
                .is_ok()
        });
        Ok(())
    }
}
