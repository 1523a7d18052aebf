//! Cosmo - Container and Item Lifecycle CLI for Azure Cosmos DB
//!
//! Cosmo manages containers (collections) and items (documents) in one
//! configured Cosmos DB database. The library is organized around a small
//! data-access core; the CLI binary is a thin wrapper over it.
//!
//! # Core Principles
//! - Validate locally before any network call (fail fast, zero side effects)
//! - Translate every transport failure into one stable domain error kind
//! - Idempotent deletes: removing an absent container or item succeeds
//! - One lazily created client handle per factory, shared by its repositories
//! - No secret material in any log line or error message, on any path
//!
//! # Module Organization
//! - [`error`] - Domain error taxonomy and stable error codes
//! - [`config`] - Environment-backed connection settings
//! - [`transport`] - Native-client seam: trait, wire types, REST transport
//! - [`auth`] - Client-provider strategies (connection string, account key)
//! - [`factory`] - Repository factory with one cached client handle
//! - [`repository`] - Container and item operations (the core)
//! - [`output`] - JSON envelopes and human text rendering
//! - [`confirm`] - Confirmation prompts for destructive operations
//! - [`commands`] - CLI subcommand groups

pub mod auth;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod factory;
pub mod output;
pub mod repository;
pub mod transport;

// Re-export commonly used types for convenience
pub use auth::{AccountKeyProvider, ClientProvider, ConnectionStringProvider};
pub use config::Settings;
pub use error::{CosmoError, Result};
pub use factory::RepositoryFactory;
pub use output::{ErrorEnvelope, ErrorInfo, Metadata, OutputAdapter, SuccessEnvelope};
pub use repository::{ContainerRepository, DEFAULT_MAX_ITEM_COUNT, DEFAULT_THROUGHPUT};
pub use transport::{
    ClientHandle, ContainerProperties, ContainerSpec, DocumentStore, PartitionKeyDefinition,
    TransportError,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_exports() {
        // Verify that key types are accessible through the crate root
        let _settings = Settings::default();
        let _meta = Metadata::new();
        assert_eq!(CosmoError::invalid_input("x").error_code(), "INVALID_INPUT");
    }
}
