//! Container Repository
//!
//! The principal data-access component: container and item lifecycle
//! operations against one configured database. Every operation follows the
//! same shape:
//!
//! 1. validate inputs locally ([`validate`], zero network)
//! 2. issue exactly one remote call through the shared [`ClientHandle`]
//! 3. translate any [`TransportError`] into one domain error kind
//! 4. log an identifier-level summary (never payloads, never secrets)
//!
//! # Idempotent Deletes
//! `delete_container` and `delete_item` swallow not-found: deleting an absent
//! resource succeeds. Every read and update path treats not-found as an
//! error. This asymmetry is intentional and load-bearing for callers that
//! retry deletes.

use serde_json::Value;
use tracing::{error, info};

use crate::error::{CosmoError, Result};
use crate::transport::{ClientHandle, ContainerProperties, ContainerSpec};

pub mod validate;

/// Default provisioned throughput for new containers (service minimum)
pub const DEFAULT_THROUGHPUT: u32 = 400;

/// Default bound for item listings
pub const DEFAULT_MAX_ITEM_COUNT: i64 = 100;

/// Repository for container and item lifecycle operations
#[derive(Debug)]
pub struct ContainerRepository {
    client: ClientHandle,
    database: String,
}

impl ContainerRepository {
    /// Bind a shared client handle to one database
    #[must_use]
    pub fn new(client: ClientHandle, database: impl Into<String>) -> Self {
        Self { client, database: database.into() }
    }

    /// The shared client handle backing this repository
    #[must_use]
    pub fn client(&self) -> &ClientHandle {
        &self.client
    }

    /// Name of the database this repository operates on
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// List all containers in the configured database
    pub fn list_containers(&self) -> Result<Vec<ContainerProperties>> {
        match self.client.list_containers(&self.database) {
            Ok(containers) => {
                info!("Listed {} containers in database '{}'", containers.len(), self.database);
                Ok(containers)
            }
            Err(err) => {
                error!("Failed to list containers: {err}");
                Err(CosmoError::connection_failure(format!("Failed to list containers: {err}")))
            }
        }
    }

    /// Create a container with the given partition key and throughput
    pub fn create_container(
        &self,
        name: &str,
        partition_key_path: &str,
        throughput: u32,
    ) -> Result<ContainerProperties> {
        validate::container_name(name)?;
        validate::partition_key_path(partition_key_path)?;
        validate::throughput(throughput)?;

        let spec = ContainerSpec {
            id: name.to_string(),
            partition_key_path: partition_key_path.to_string(),
            throughput,
        };

        match self.client.create_container(&self.database, &spec) {
            Ok(created) => {
                info!(
                    "Created container '{name}' with partition key '{partition_key_path}' \
                     and throughput {throughput} RU/s"
                );
                Ok(created)
            }
            Err(err) if err.is_conflict() => Err(CosmoError::resource_already_exists(format!(
                "Container '{name}' already exists"
            ))),
            Err(err) if err.is_throttled() || err.mentions_quota() => {
                Err(CosmoError::quota_exceeded(format!(
                    "Throughput quota exceeded when creating container '{name}'. \
                     Reduce the requested throughput or check account limits"
                )))
            }
            Err(err) => {
                error!("Failed to create container '{name}': {err}");
                Err(CosmoError::connection_failure(format!(
                    "Failed to create container '{name}': {err}"
                )))
            }
        }
    }

    /// Delete a container by name (idempotent)
    ///
    /// Not-found is swallowed: deleting an absent container succeeds.
    pub fn delete_container(&self, name: &str) -> Result<()> {
        match self.client.delete_container(&self.database, name) {
            Ok(()) => {
                info!("Deleted container '{name}'");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                info!("Container '{name}' not found during delete (idempotent)");
                Ok(())
            }
            Err(err) => {
                error!("Failed to delete container '{name}': {err}");
                Err(CosmoError::connection_failure(format!(
                    "Failed to delete container '{name}': {err}"
                )))
            }
        }
    }

    /// Read container metadata (partition key, throughput, indexing policy)
    pub fn get_container_properties(&self, name: &str) -> Result<ContainerProperties> {
        match self.client.read_container(&self.database, name) {
            Ok(properties) => {
                info!("Retrieved properties for container '{name}'");
                Ok(properties)
            }
            Err(err) if err.is_not_found() => {
                Err(CosmoError::resource_not_found(format!("Container '{name}' not found")))
            }
            Err(err) => {
                error!("Failed to get properties for container '{name}': {err}");
                Err(CosmoError::connection_failure(format!(
                    "Failed to get properties for container '{name}': {err}"
                )))
            }
        }
    }

    /// Create a new item in a container
    pub fn create_item(
        &self,
        container_name: &str,
        item: &Value,
        partition_key_value: &str,
    ) -> Result<Value> {
        let item_id = validate::require_item_id(item)?.to_string();
        validate::partition_key_value(partition_key_value)?;
        validate::container_reference(container_name)?;

        match self.client.create_item(&self.database, container_name, partition_key_value, item) {
            Ok(created) => {
                info!("Created item '{item_id}' in container '{container_name}'");
                Ok(created)
            }
            Err(err) if err.is_conflict() => Err(CosmoError::duplicate_item(format!(
                "Item with id '{item_id}' already exists in partition"
            ))),
            Err(err) if err.is_bad_request() => Err(partition_key_mismatch(&item_id)),
            Err(err) => {
                error!("Failed to create item '{item_id}': {err}");
                Err(CosmoError::connection_failure(format!("Failed to create item: {err}")))
            }
        }
    }

    /// Point-read a single item by id and partition key
    pub fn get_item(
        &self,
        container_name: &str,
        item_id: &str,
        partition_key_value: &str,
    ) -> Result<Value> {
        validate::container_reference(container_name)?;
        validate::partition_key_value(partition_key_value)?;

        match self.client.read_item(&self.database, container_name, partition_key_value, item_id) {
            Ok(item) => {
                info!("Retrieved item '{item_id}' from container '{container_name}'");
                Ok(item)
            }
            Err(err) if err.is_not_found() => Err(CosmoError::item_not_found(format!(
                "Item '{item_id}' not found in container '{container_name}'"
            ))),
            Err(err) if err.is_bad_request() => Err(partition_key_mismatch(item_id)),
            Err(err) => {
                error!("Failed to get item '{item_id}': {err}");
                Err(CosmoError::connection_failure(format!(
                    "Failed to get item '{item_id}': {err}"
                )))
            }
        }
    }

    /// Update an existing item (upsert: create if not exists)
    ///
    /// The payload's `id` field must equal the `item_id` argument.
    pub fn update_item(
        &self,
        container_name: &str,
        item_id: &str,
        item: &Value,
        partition_key_value: &str,
    ) -> Result<Value> {
        let payload_id = validate::require_item_id(item)?;
        if payload_id != item_id {
            return Err(CosmoError::invalid_input(format!(
                "Item 'id' field must match the item_id argument '{item_id}'"
            )));
        }
        validate::partition_key_value(partition_key_value)?;
        validate::container_reference(container_name)?;

        match self.client.upsert_item(&self.database, container_name, partition_key_value, item) {
            Ok(updated) => {
                info!("Updated item '{item_id}' in container '{container_name}'");
                Ok(updated)
            }
            Err(err) if err.is_bad_request() => Err(partition_key_mismatch(item_id)),
            Err(err) => {
                error!("Failed to update item '{item_id}': {err}");
                Err(CosmoError::connection_failure(format!(
                    "Failed to update item '{item_id}': {err}"
                )))
            }
        }
    }

    /// Delete an item by id and partition key (idempotent)
    ///
    /// Not-found is swallowed: deleting an absent item succeeds.
    pub fn delete_item(
        &self,
        container_name: &str,
        item_id: &str,
        partition_key_value: &str,
    ) -> Result<()> {
        validate::container_reference(container_name)?;
        validate::partition_key_value(partition_key_value)?;

        match self.client.delete_item(&self.database, container_name, partition_key_value, item_id)
        {
            Ok(()) => {
                info!("Deleted item '{item_id}' from container '{container_name}'");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                info!("Item '{item_id}' not found during delete (idempotent)");
                Ok(())
            }
            Err(err) if err.is_bad_request() => Err(partition_key_mismatch(item_id)),
            Err(err) => {
                error!("Failed to delete item '{item_id}': {err}");
                Err(CosmoError::connection_failure(format!(
                    "Failed to delete item '{item_id}': {err}"
                )))
            }
        }
    }

    /// List items in a container, bounded by `max_count`
    ///
    /// Order is whatever the service returns; no total order across
    /// partitions is guaranteed.
    pub fn list_items(&self, container_name: &str, max_count: i64) -> Result<Vec<Value>> {
        validate::container_reference(container_name)?;
        let limit = validate::max_count(max_count)?;

        match self.client.read_items(&self.database, container_name, limit) {
            Ok(items) => {
                info!("Listed {} items from container '{container_name}'", items.len());
                Ok(items)
            }
            Err(err) => {
                error!("Failed to list items: {err}");
                Err(CosmoError::connection_failure(format!("Failed to list items: {err}")))
            }
        }
    }
}

fn partition_key_mismatch(item_id: &str) -> CosmoError {
    CosmoError::partition_key_mismatch(format!("Partition key mismatch for item '{item_id}'"))
}
