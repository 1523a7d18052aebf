//! Repository Factory
//!
//! Binds connection settings and a client-provider strategy, and hands out
//! repositories that share one lazily created client handle.
//!
//! # Caching Contract
//! The client handle is resolved on the first repository request and cached
//! for the factory's lifetime; every later request reuses it without
//! re-invoking the provider. One factory instance = one handle; a new factory
//! always re-resolves. Initialization goes through
//! [`once_cell::sync::OnceCell`], so the check-then-set transition is safe
//! even when a factory is shared across threads, and reads after
//! initialization are lock-free. A failed initialization leaves the cell
//! empty; the next request retries the provider.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::auth::{AccountKeyProvider, ClientProvider, ConnectionStringProvider};
use crate::config::Settings;
use crate::error::{CosmoError, Result};
use crate::repository::ContainerRepository;
use crate::transport::ClientHandle;

/// Error message for a missing database name
pub const DATABASE_NAME_MISSING: &str =
    "Database name not configured. Set the COSMO_DATABASE_NAME environment variable.";

/// Factory for repositories sharing one cached client handle
pub struct RepositoryFactory {
    provider: Box<dyn ClientProvider>,
    database_name: Option<String>,
    client: OnceCell<ClientHandle>,
}

impl RepositoryFactory {
    /// Build a factory, picking the auth strategy from the settings shape
    ///
    /// A connection string selects the connection-string strategy; otherwise
    /// a configured endpoint selects the account-key strategy. With neither
    /// present the connection-string strategy reports the missing credential
    /// on first use.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let database_name = settings.database_name.clone();
        let provider: Box<dyn ClientProvider> =
            if settings.connection_string.is_none() && settings.endpoint.is_some() {
                Box::new(AccountKeyProvider::new(settings))
            } else {
                Box::new(ConnectionStringProvider::new(settings))
            };
        Self { provider, database_name, client: OnceCell::new() }
    }

    /// Build a factory around an explicit provider
    ///
    /// Used by tests and by emulator tooling that supplies its own client.
    #[must_use]
    pub fn with_provider(settings: &Settings, provider: Box<dyn ClientProvider>) -> Self {
        Self { provider, database_name: settings.database_name.clone(), client: OnceCell::new() }
    }

    /// Repository for container lifecycle operations
    ///
    /// # Errors
    /// `InvalidInput` when no database name is configured; provider errors
    /// propagate unchanged.
    pub fn get_container_repository(&self) -> Result<ContainerRepository> {
        let database = self.database_name()?.to_string();
        let client = self.client()?;
        Ok(ContainerRepository::new(client, database))
    }

    /// Repository for item operations
    ///
    /// Item operations are methods on the same repository type, so this is
    /// the container repository under a second name.
    pub fn get_item_repository(&self) -> Result<ContainerRepository> {
        self.get_container_repository()
    }

    /// Resolve the configured database name
    fn database_name(&self) -> Result<&str> {
        match self.database_name.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(CosmoError::invalid_input(DATABASE_NAME_MISSING)),
        }
    }

    /// Get or lazily create the cached client handle
    fn client(&self) -> Result<ClientHandle> {
        // Database name is resolved before the provider is ever invoked
        self.database_name()?;
        let handle = self.client.get_or_try_init(|| self.provider.get_client())?;
        Ok(Arc::clone(handle))
    }
}
