//! Client Provider Strategies
//!
//! A client provider turns connection settings into an authenticated
//! [`ClientHandle`]. Providers are polymorphic over a single capability,
//! [`ClientProvider::get_client`]; the factory picks a strategy from the
//! settings shape.
//!
//! # Strategies
//! - [`ConnectionStringProvider`]: full account connection string
//! - [`AccountKeyProvider`]: endpoint URL plus base64 account key
//!
//! # Failure Classification
//! Both strategies parse credentials, build the REST client, and issue one
//! account-read probe so that authentication rejections surface at
//! client-creation time:
//! - missing / empty / malformed credentials → `AuthFailure`
//! - transport status 401 → `AuthFailure`
//! - any other transport status → `ConnectionFailure` (status code only)
//! - network-class failures → `ConnectionFailure`
//! - unclassified failures → `AuthFailure`, unless the message indicates a
//!   connectivity problem
//!
//! Initialization is logged at info level. Log lines and error messages never
//! contain the connection string, key, or derived secret substrings; this is
//! a hard invariant enforced by tests.

use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::error::{CosmoError, Result};
use crate::transport::rest::RestStore;
use crate::transport::{ClientHandle, TransportError};

/// Strategy capable of producing an authenticated client handle
pub trait ClientProvider {
    /// Produce a connected client handle or fail with a classified error
    fn get_client(&self) -> Result<ClientHandle>;
}

/// Connection-string authentication strategy
pub struct ConnectionStringProvider {
    settings: Settings,
}

impl ConnectionStringProvider {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl ClientProvider for ConnectionStringProvider {
    fn get_client(&self) -> Result<ClientHandle> {
        let raw = self
            .settings
            .connection_string
            .as_deref()
            .ok_or_else(|| CosmoError::auth_failure("Connection string not provided"))?;
        if raw.trim().is_empty() {
            return Err(CosmoError::auth_failure("Connection string is empty"));
        }

        info!("Initializing connection string auth strategy");

        let store = RestStore::from_connection_string(raw).map_err(classify)?;
        store.read_account().map_err(classify)?;
        Ok(Arc::new(store))
    }
}

/// Endpoint/key authentication strategy
pub struct AccountKeyProvider {
    settings: Settings,
}

impl AccountKeyProvider {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl ClientProvider for AccountKeyProvider {
    fn get_client(&self) -> Result<ClientHandle> {
        let endpoint = self
            .settings
            .endpoint
            .as_deref()
            .ok_or_else(|| CosmoError::auth_failure("Endpoint not provided"))?;
        let key = self
            .settings
            .key
            .as_deref()
            .ok_or_else(|| CosmoError::auth_failure("Account key not provided"))?;
        if endpoint.trim().is_empty() {
            return Err(CosmoError::auth_failure("Endpoint is empty"));
        }
        if key.trim().is_empty() {
            return Err(CosmoError::auth_failure("Account key is empty"));
        }

        info!("Initializing account key auth strategy");

        let store = RestStore::with_key(endpoint, key).map_err(classify)?;
        store.read_account().map_err(classify)?;
        Ok(Arc::new(store))
    }
}

/// Translate a transport failure raised during client creation
fn classify(err: TransportError) -> CosmoError {
    match err {
        TransportError::Malformed(detail) => {
            CosmoError::auth_failure(format!("Malformed connection string: {detail}"))
        }
        TransportError::Status { status: 401, .. } => CosmoError::auth_failure(
            "Authentication failed: the service rejected the provided credentials (401)",
        ),
        TransportError::Status { status, .. } => {
            CosmoError::connection_failure(format!("Failed to connect: status {status}"))
        }
        TransportError::Network(detail) => {
            CosmoError::connection_failure(format!("Network error: {detail}"))
        }
        TransportError::Other(detail) => {
            if looks_like_network_problem(&detail) {
                CosmoError::connection_failure(format!("Network error: {detail}"))
            } else {
                CosmoError::auth_failure(format!(
                    "Unexpected error during authentication: {detail}"
                ))
            }
        }
    }
}

/// Heuristic for routing unclassified failures to the connection class
fn looks_like_network_problem(detail: &str) -> bool {
    let lowered = detail.to_lowercase();
    ["network", "connection", "timed out", "timeout", "dns", "unreachable"]
        .iter()
        .any(|marker| lowered.contains(marker))
}
