pub mod network_handler;
pub mod processor_factory;

use crate::error::LibraryError;
use crate::model::network::network::Network;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Acquire a write lock on the network, converting poison errors to LibraryError.
pub fn write_network(
    network: &Arc<RwLock<Network>>,
) -> Result<RwLockWriteGuard<'_, Network>, LibraryError> {
    network
        .write()
        .map_err(|_| LibraryError::Runtime("Lock Poisoned".to_string()))
}

/// Acquire a read lock on the network, converting poison errors to LibraryError.
pub fn read_network(
    network: &Arc<RwLock<Network>>,
) -> Result<RwLockReadGuard<'_, Network>, LibraryError> {
    network
        .read()
        .map_err(|_| LibraryError::Runtime("Lock Poisoned".to_string()))
}
