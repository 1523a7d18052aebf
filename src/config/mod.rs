//! Configuration Management
//!
//! This module loads connection settings from the process environment.
//!
//! # Environment Variables
//! - `COSMO_CONNECTION_STRING`: full account connection string
//! - `COSMO_ENDPOINT`: account endpoint URL (key auth)
//! - `COSMO_KEY`: base64 account key (key auth)
//! - `COSMO_DATABASE_NAME`: database every repository operates on
//!
//! # Invariant
//! A connection string and an endpoint/key pair are mutually exclusive.
//! Providing both is ambiguous and rejected at load time.
//!
//! Settings hold secret material. The `Debug` implementation redacts the
//! connection string and key so accidental `{:?}` formatting can never leak
//! them into logs or error output.

use std::fmt;

use crate::error::{CosmoError, Result};

/// Environment variable holding the account connection string
pub const CONNECTION_STRING_ENV: &str = "COSMO_CONNECTION_STRING";

/// Environment variable holding the account endpoint URL
pub const ENDPOINT_ENV: &str = "COSMO_ENDPOINT";

/// Environment variable holding the base64 account key
pub const KEY_ENV: &str = "COSMO_KEY";

/// Environment variable holding the target database name
pub const DATABASE_NAME_ENV: &str = "COSMO_DATABASE_NAME";

/// Immutable connection configuration
///
/// Loaded once at startup and passed by value into the repository factory.
#[derive(Clone, Default)]
pub struct Settings {
    /// Full account connection string (`AccountEndpoint=...;AccountKey=...`)
    pub connection_string: Option<String>,

    /// Account endpoint URL, used with `key`
    pub endpoint: Option<String>,

    /// Base64 account key, used with `endpoint`
    pub key: Option<String>,

    /// Database every repository produced from these settings operates on
    pub database_name: Option<String>,
}

impl Settings {
    /// Load settings from the process environment
    ///
    /// # Errors
    /// Returns `AuthFailure` when both a connection string and an
    /// endpoint/key pair are configured.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup
    ///
    /// Exists so tests can supply a deterministic environment without
    /// mutating process-global state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let settings = Self {
            connection_string: lookup(CONNECTION_STRING_ENV),
            endpoint: lookup(ENDPOINT_ENV),
            key: lookup(KEY_ENV),
            database_name: lookup(DATABASE_NAME_ENV),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Enforce the mutual-exclusion invariant between auth methods
    fn validate(&self) -> Result<()> {
        if self.connection_string.is_some() && (self.endpoint.is_some() || self.key.is_some()) {
            return Err(CosmoError::auth_failure(
                "Ambiguous auth configuration: provide either a connection string \
                 or an endpoint/key pair, not both",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            match value {
                Some(_) => "Some(<redacted>)",
                None => "None",
            }
        }

        f.debug_struct("Settings")
            .field("connection_string", &redact(&self.connection_string))
            .field("endpoint", &self.endpoint)
            .field("key", &redact(&self.key))
            .field("database_name", &self.database_name)
            .finish()
    }
}
