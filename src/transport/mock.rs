//! In-Memory Mock Transport
//!
//! A [`DocumentStore`] fake backed by in-process maps, used by unit and
//! integration tests (feature `test-utils`). It mirrors the service's status
//! semantics (404 on missing resources, 409 on conflicts) so repository
//! translation paths can be exercised without a network.
//!
//! # Failure Injection
//! [`MockStore::fail_next`] queues one [`TransportError`] that the next call
//! returns instead of executing. Every call, failed or not, is recorded and
//! can be inspected through [`MockStore::calls`], which is how tests prove
//! that validation failures never reach the transport.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use crate::transport::{
    ContainerProperties, ContainerSpec, DocumentStore, PartitionKeyDefinition, TransportError,
    TransportResult,
};

#[derive(Default, Debug)]
struct State {
    containers: BTreeMap<String, ContainerProperties>,
    // items[container][(partition_key, item_id)]
    items: BTreeMap<String, BTreeMap<(String, String), Value>>,
    calls: Vec<String>,
    fail_next: Option<TransportError>,
}

/// In-memory document store with call recording and failure injection
#[derive(Default, Debug)]
pub struct MockStore {
    state: Mutex<State>,
}

impl MockStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an error returned by the next call (one-shot)
    pub fn fail_next(&self, err: TransportError) {
        self.lock().fail_next = Some(err);
    }

    /// Names of every call issued so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Number of calls issued so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Record a call and surface any queued failure
    fn begin(&self, call: &str) -> TransportResult<MutexGuard<'_, State>> {
        let mut state = self.lock();
        state.calls.push(call.to_string());
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }
        Ok(state)
    }
}

fn status(status: u16, message: &str) -> TransportError {
    TransportError::Status { status, message: message.to_string() }
}

fn item_id_of(item: &Value) -> String {
    item.get("id").and_then(Value::as_str).unwrap_or_default().to_string()
}

impl DocumentStore for MockStore {
    fn list_containers(&self, _database: &str) -> TransportResult<Vec<ContainerProperties>> {
        let state = self.begin("list_containers")?;
        Ok(state.containers.values().cloned().collect())
    }

    fn create_container(
        &self,
        _database: &str,
        spec: &ContainerSpec,
    ) -> TransportResult<ContainerProperties> {
        let mut state = self.begin("create_container")?;
        if state.containers.contains_key(&spec.id) {
            return Err(status(409, "Conflict"));
        }

        let properties = ContainerProperties {
            id: spec.id.clone(),
            partition_key: PartitionKeyDefinition::hash(spec.partition_key_path.as_str()),
            throughput: Some(spec.throughput),
            indexing_policy: None,
        };
        state.containers.insert(spec.id.clone(), properties.clone());
        Ok(properties)
    }

    fn delete_container(&self, _database: &str, name: &str) -> TransportResult<()> {
        let mut state = self.begin("delete_container")?;
        if state.containers.remove(name).is_none() {
            return Err(status(404, "NotFound"));
        }
        state.items.remove(name);
        Ok(())
    }

    fn read_container(
        &self,
        _database: &str,
        name: &str,
    ) -> TransportResult<ContainerProperties> {
        let state = self.begin("read_container")?;
        state.containers.get(name).cloned().ok_or_else(|| status(404, "NotFound"))
    }

    fn create_item(
        &self,
        _database: &str,
        container: &str,
        partition_key: &str,
        item: &Value,
    ) -> TransportResult<Value> {
        let mut state = self.begin("create_item")?;
        let key = (partition_key.to_string(), item_id_of(item));
        let bucket = state.items.entry(container.to_string()).or_default();
        if bucket.contains_key(&key) {
            return Err(status(409, "Conflict"));
        }
        bucket.insert(key, item.clone());
        Ok(item.clone())
    }

    fn read_item(
        &self,
        _database: &str,
        container: &str,
        partition_key: &str,
        item_id: &str,
    ) -> TransportResult<Value> {
        let state = self.begin("read_item")?;
        state
            .items
            .get(container)
            .and_then(|bucket| bucket.get(&(partition_key.to_string(), item_id.to_string())))
            .cloned()
            .ok_or_else(|| status(404, "NotFound"))
    }

    fn upsert_item(
        &self,
        _database: &str,
        container: &str,
        partition_key: &str,
        item: &Value,
    ) -> TransportResult<Value> {
        let mut state = self.begin("upsert_item")?;
        let key = (partition_key.to_string(), item_id_of(item));
        state.items.entry(container.to_string()).or_default().insert(key, item.clone());
        Ok(item.clone())
    }

    fn delete_item(
        &self,
        _database: &str,
        container: &str,
        partition_key: &str,
        item_id: &str,
    ) -> TransportResult<()> {
        let mut state = self.begin("delete_item")?;
        let removed = state
            .items
            .get_mut(container)
            .and_then(|bucket| bucket.remove(&(partition_key.to_string(), item_id.to_string())));
        match removed {
            Some(_) => Ok(()),
            None => Err(status(404, "NotFound")),
        }
    }

    fn read_items(
        &self,
        _database: &str,
        container: &str,
        max_count: usize,
    ) -> TransportResult<Vec<Value>> {
        let state = self.begin("read_items")?;
        Ok(state
            .items
            .get(container)
            .map(|bucket| bucket.values().take(max_count).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(id: &str) -> ContainerSpec {
        ContainerSpec {
            id: id.to_string(),
            partition_key_path: "/pk".to_string(),
            throughput: 400,
        }
    }

    #[test]
    fn test_container_round_trip() {
        let store = MockStore::new();
        store.create_container("db", &spec("products")).unwrap();

        let listed = store.list_containers("db").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "products");

        let read = store.read_container("db", "products").unwrap();
        assert_eq!(read.partition_key_path(), "/pk");

        store.delete_container("db", "products").unwrap();
        assert!(store.read_container("db", "products").unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_container_conflicts() {
        let store = MockStore::new();
        store.create_container("db", &spec("products")).unwrap();
        let err = store.create_container("db", &spec("products")).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_item_round_trip() {
        let store = MockStore::new();
        let item = json!({"id": "sku-1", "name": "lamp"});

        store.create_item("db", "products", "lighting", &item).unwrap();
        let read = store.read_item("db", "products", "lighting", "sku-1").unwrap();
        assert_eq!(read, item);

        // Same id under a different partition key is a distinct item
        assert!(store.read_item("db", "products", "garden", "sku-1").unwrap_err().is_not_found());

        store.delete_item("db", "products", "lighting", "sku-1").unwrap();
        assert!(store
            .delete_item("db", "products", "lighting", "sku-1")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_fail_next_is_one_shot() {
        let store = MockStore::new();
        store.fail_next(TransportError::Network("connection refused".to_string()));

        assert!(store.list_containers("db").is_err());
        assert!(store.list_containers("db").is_ok());
        assert_eq!(store.call_count(), 2);
    }

    #[test]
    fn test_read_items_respects_max_count() {
        let store = MockStore::new();
        for n in 0..5 {
            let item = json!({"id": format!("sku-{n}")});
            store.create_item("db", "products", "pk", &item).unwrap();
        }

        let items = store.read_items("db", "products", 3).unwrap();
        assert_eq!(items.len(), 3);
    }
}
