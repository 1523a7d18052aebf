//! Native Client Seam and Core Transport Types
//!
//! This module defines the abstraction over the Cosmos DB data-plane client.
//! The repository layer talks exclusively to the [`DocumentStore`] trait; the
//! production implementation lives in [`rest`], and an in-memory fake for
//! tests lives in [`mock`] (feature `test-utils`).
//!
//! # Error Vocabulary
//! [`TransportError`] is the transport's native failure vocabulary: HTTP
//! status classes, network failures, and malformed connection configuration.
//! It never crosses the repository boundary; the repository and the client
//! providers translate it into the domain taxonomy.
//!
//! # Secret Hygiene
//! No `TransportError` message carries credential material. Status errors
//! carry the numeric status and the service error code only.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

pub mod rest;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

/// Hostname markers identifying a local emulator endpoint
const EMULATOR_HOST_MARKERS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Shared handle to an authenticated native client
///
/// Created once per factory instance and shared read-only by every repository
/// the factory produces.
pub type ClientHandle = Arc<dyn DocumentStore>;

/// Result type alias for transport operations
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Native transport failure vocabulary
#[derive(Error, Debug)]
pub enum TransportError {
    /// The service answered with a non-success HTTP status
    ///
    /// `message` carries the service error code only, never request bodies
    /// or credentials.
    #[error("status {status} ({message})")]
    Status { status: u16, message: String },

    /// The service could not be reached (connect, DNS, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// Connection configuration could not be parsed
    #[error("malformed configuration: {0}")]
    Malformed(String),

    /// Failure that fits no other class (request building, response decoding)
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// HTTP status carried by this error, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 404 responses
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True for 409 responses
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    /// True for 401 responses
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// True for 429 responses
    #[must_use]
    pub fn is_throttled(&self) -> bool {
        self.status() == Some(429)
    }

    /// True for 400 responses
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }

    /// True when the service response indicates a quota problem
    #[must_use]
    pub fn mentions_quota(&self) -> bool {
        match self {
            Self::Status { message, .. } => message.to_lowercase().contains("quota"),
            _ => false,
        }
    }
}

/// Partition-key definition attached to a container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionKeyDefinition {
    /// Partition-key paths (single path in practice)
    pub paths: Vec<String>,

    /// Partitioning kind (the service default is `Hash`)
    #[serde(default = "default_partition_kind")]
    pub kind: String,
}

fn default_partition_kind() -> String {
    "Hash".to_string()
}

impl Default for PartitionKeyDefinition {
    fn default() -> Self {
        Self { paths: Vec::new(), kind: default_partition_kind() }
    }
}

impl PartitionKeyDefinition {
    /// Build a single-path hash definition
    #[must_use]
    pub fn hash(path: impl Into<String>) -> Self {
        Self { paths: vec![path.into()], kind: default_partition_kind() }
    }
}

/// Container metadata as stored by the service
///
/// The service read payload carries system fields (`_rid`, `_ts`, `_etag`)
/// that are not part of the logical descriptor and are dropped on
/// deserialization. Offer throughput is not part of the read payload; it is
/// populated on creation as an echo of the requested value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerProperties {
    /// Container name
    pub id: String,

    /// Partition-key definition
    #[serde(rename = "partitionKey", default)]
    pub partition_key: PartitionKeyDefinition,

    /// Provisioned throughput in RU/s, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throughput: Option<u32>,

    /// Indexing policy as returned by the service
    #[serde(rename = "indexingPolicy", skip_serializing_if = "Option::is_none")]
    pub indexing_policy: Option<Value>,
}

impl ContainerProperties {
    /// First partition-key path, or an empty string when undefined
    #[must_use]
    pub fn partition_key_path(&self) -> &str {
        self.partition_key.paths.first().map_or("", String::as_str)
    }
}

/// Parameters for creating a container
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    /// Container name
    pub id: String,

    /// Partition-key path (starts with `/`)
    pub partition_key_path: String,

    /// Provisioned throughput in RU/s
    pub throughput: u32,
}

/// Parsed account connection string
///
/// Grammar: `AccountEndpoint=<url>;AccountKey=<base64>;` with segments in any
/// order; the trailing semicolon is optional.
#[derive(Debug, Clone)]
pub struct ConnectionString {
    /// Account endpoint URL
    pub endpoint: String,

    /// Base64 account key
    pub key: String,
}

impl ConnectionString {
    /// Parse a connection string into its endpoint and key
    ///
    /// # Errors
    /// Returns [`TransportError::Malformed`] when either field is missing or
    /// a segment is not a `Name=Value` pair. The error text never echoes the
    /// input.
    pub fn parse(raw: &str) -> TransportResult<Self> {
        let mut endpoint = None;
        let mut key = None;

        for segment in raw.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (name, value) = segment.split_once('=').ok_or_else(|| {
                TransportError::Malformed("expected 'Name=Value' segments".to_string())
            })?;
            match name.trim() {
                "AccountEndpoint" => endpoint = Some(value.trim().to_string()),
                "AccountKey" => key = Some(value.trim().to_string()),
                // Unknown segments are tolerated for forward compatibility
                _ => {}
            }
        }

        let endpoint = endpoint
            .filter(|value| !value.is_empty())
            .ok_or_else(|| TransportError::Malformed("missing AccountEndpoint".to_string()))?;
        let key = key
            .filter(|value| !value.is_empty())
            .ok_or_else(|| TransportError::Malformed("missing AccountKey".to_string()))?;

        Ok(Self { endpoint, key })
    }
}

/// True when the endpoint points at a local emulator
///
/// Emulator endpoints use self-signed certificates, so the REST transport
/// relaxes certificate verification for them.
#[must_use]
pub fn is_emulator(endpoint: &str) -> bool {
    let lowered = endpoint.to_lowercase();
    EMULATOR_HOST_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Native client surface consumed by the repository
///
/// One method per remote primitive; every method issues exactly one
/// synchronous remote call. Implementations must be safe to share behind an
/// [`Arc`] across repositories.
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Enumerate containers in a database
    fn list_containers(&self, database: &str) -> TransportResult<Vec<ContainerProperties>>;

    /// Create a container with the given partition key and throughput
    fn create_container(
        &self,
        database: &str,
        spec: &ContainerSpec,
    ) -> TransportResult<ContainerProperties>;

    /// Delete a container by name
    fn delete_container(&self, database: &str, name: &str) -> TransportResult<()>;

    /// Read container metadata
    fn read_container(&self, database: &str, name: &str) -> TransportResult<ContainerProperties>;

    /// Insert a new item
    fn create_item(
        &self,
        database: &str,
        container: &str,
        partition_key: &str,
        item: &Value,
    ) -> TransportResult<Value>;

    /// Point-read an item by id and partition key
    fn read_item(
        &self,
        database: &str,
        container: &str,
        partition_key: &str,
        item_id: &str,
    ) -> TransportResult<Value>;

    /// Create-or-replace an item
    fn upsert_item(
        &self,
        database: &str,
        container: &str,
        partition_key: &str,
        item: &Value,
    ) -> TransportResult<Value>;

    /// Delete an item by id and partition key
    fn delete_item(
        &self,
        database: &str,
        container: &str,
        partition_key: &str,
        item_id: &str,
    ) -> TransportResult<()>;

    /// Read up to `max_count` items from a container feed
    fn read_items(
        &self,
        database: &str,
        container: &str,
        max_count: usize,
    ) -> TransportResult<Vec<Value>>;
}
