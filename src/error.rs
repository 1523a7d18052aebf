//! Error Handling Infrastructure
//!
//! This module defines the domain error taxonomy used throughout Cosmo.
//! All errors are structured and map to specific error codes for JSON output.
//!
//! # Error Categories
//! - `ConnectionFailure`: the service could not be reached or answered with an
//!   unexpected status
//! - `AuthFailure`: authentication configuration is missing, malformed, or
//!   rejected by the service
//! - `ResourceNotFound`: a container or database does not exist
//! - `ResourceAlreadyExists`: a container with the same name already exists
//! - `QuotaExceeded`: throughput or account quota rejected the request
//! - `InvalidPartitionKeyPath`: a partition-key path failed validation
//! - `ItemNotFound`: an item read missed
//! - `PartitionKeyMismatch`: the supplied partition-key value does not match
//!   the item
//! - `DuplicateItem`: an item with the same id already exists in the partition
//! - `InvalidInput`: local validation failure, raised before any network call
//!
//! Every remote-call failure is translated into exactly one of these kinds
//! before it crosses the repository boundary. Messages never contain
//! connection strings, keys, or other secret material.

use thiserror::Error;

/// Main error type for Cosmo operations
#[derive(Error, Debug)]
pub enum CosmoError {
    /// The service could not be reached, or answered with an unexpected status
    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    /// Authentication configuration missing, malformed, or rejected
    #[error("Authentication failure: {0}")]
    AuthFailure(String),

    /// Container or database does not exist
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Container with the same name already exists
    #[error("Resource already exists: {0}")]
    ResourceAlreadyExists(String),

    /// Throughput or account quota rejected the request
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Partition-key path failed validation
    #[error("Invalid partition key path: {0}")]
    InvalidPartitionKeyPath(String),

    /// Item read missed
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Supplied partition-key value does not match the item
    #[error("Partition key mismatch: {0}")]
    PartitionKeyMismatch(String),

    /// Item with the same id already exists in the partition
    #[error("Duplicate item: {0}")]
    DuplicateItem(String),

    /// Local validation failure, raised before any network call
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CosmoError {
    /// Convert error to error code string for JSON output
    ///
    /// Error codes are stable and suitable for programmatic handling.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionFailure(_) => "CONNECTION_FAILURE",
            Self::AuthFailure(_) => "AUTH_FAILURE",
            Self::ResourceNotFound(_) => "RESOURCE_NOT_FOUND",
            Self::ResourceAlreadyExists(_) => "RESOURCE_ALREADY_EXISTS",
            Self::QuotaExceeded(_) => "QUOTA_EXCEEDED",
            Self::InvalidPartitionKeyPath(_) => "INVALID_PARTITION_KEY_PATH",
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::PartitionKeyMismatch(_) => "PARTITION_KEY_MISMATCH",
            Self::DuplicateItem(_) => "DUPLICATE_ITEM",
            Self::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    /// Get human-readable error message (safe for output, no sensitive data)
    ///
    /// This message is safe to include in JSON output. It does not contain
    /// credentials or other secret material.
    #[must_use]
    pub fn message(&self) -> String {
        // Use Display implementation from thiserror
        self.to_string()
    }

    /// Create a connection failure error
    pub fn connection_failure(message: impl Into<String>) -> Self {
        Self::ConnectionFailure(message.into())
    }

    /// Create an authentication failure error
    pub fn auth_failure(message: impl Into<String>) -> Self {
        Self::AuthFailure(message.into())
    }

    /// Create a resource-not-found error
    pub fn resource_not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound(message.into())
    }

    /// Create a resource-already-exists error
    pub fn resource_already_exists(message: impl Into<String>) -> Self {
        Self::ResourceAlreadyExists(message.into())
    }

    /// Create a quota-exceeded error
    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::QuotaExceeded(message.into())
    }

    /// Create an invalid-partition-key-path error
    pub fn invalid_partition_key_path(message: impl Into<String>) -> Self {
        Self::InvalidPartitionKeyPath(message.into())
    }

    /// Create an item-not-found error
    pub fn item_not_found(message: impl Into<String>) -> Self {
        Self::ItemNotFound(message.into())
    }

    /// Create a partition-key-mismatch error
    pub fn partition_key_mismatch(message: impl Into<String>) -> Self {
        Self::PartitionKeyMismatch(message.into())
    }

    /// Create a duplicate-item error
    pub fn duplicate_item(message: impl Into<String>) -> Self {
        Self::DuplicateItem(message.into())
    }

    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result type alias for Cosmo operations
pub type Result<T> = std::result::Result<T, CosmoError>;
