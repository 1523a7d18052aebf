//! Shared helpers for integration tests
//!
//! Builds factories wired to the in-memory mock transport so full flows run
//! without a network.

#![allow(dead_code)]

use std::sync::Arc;

use cosmo::transport::mock::MockStore;
use cosmo::{ClientHandle, ClientProvider, RepositoryFactory, Result, Settings};

/// Provider handing out one fixed client handle
pub struct FixedProvider {
    handle: ClientHandle,
}

impl FixedProvider {
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { handle: store }
    }
}

impl ClientProvider for FixedProvider {
    fn get_client(&self) -> Result<ClientHandle> {
        Ok(Arc::clone(&self.handle))
    }
}

/// Settings naming only a database
pub fn settings(database: &str) -> Settings {
    Settings {
        connection_string: None,
        endpoint: None,
        key: None,
        database_name: Some(database.to_string()),
    }
}

/// Factory whose repositories all share the given mock store
pub fn factory_with_store(store: &Arc<MockStore>) -> RepositoryFactory {
    RepositoryFactory::with_provider(
        &settings("integration-db"),
        Box::new(FixedProvider::new(Arc::clone(store))),
    )
}
