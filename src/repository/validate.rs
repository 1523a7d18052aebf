//! Pre-Flight Input Validation
//!
//! Every rule here runs before any network call and raises a local taxonomy
//! error on violation: fail fast, zero side effects. The repository calls
//! these at the top of each operation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{CosmoError, Result};

/// Container names: alphanumeric and hyphens, 1–255 characters
static CONTAINER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]{1,255}$").expect("container name pattern"));

/// Validate a container name against the service naming rules
pub fn container_name(name: &str) -> Result<()> {
    if !CONTAINER_NAME.is_match(name) {
        return Err(CosmoError::invalid_input(format!(
            "Invalid container name '{name}'. Must be alphanumeric with hyphens, \
             max 255 characters"
        )));
    }
    Ok(())
}

/// Validate a partition-key path (non-empty, starts with `/`)
pub fn partition_key_path(path: &str) -> Result<()> {
    if path.is_empty() || !path.starts_with('/') {
        return Err(CosmoError::invalid_partition_key_path(format!(
            "Invalid partition key path '{path}'. Partition key must start with '/'"
        )));
    }
    Ok(())
}

/// Validate a provisioned throughput value
pub fn throughput(value: u32) -> Result<()> {
    if value == 0 {
        return Err(CosmoError::invalid_input(
            "Throughput must be a positive number of RU/s",
        ));
    }
    Ok(())
}

/// Validate the container name argument of an item operation
pub fn container_reference(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CosmoError::invalid_input("Container name cannot be empty"));
    }
    Ok(())
}

/// Validate the partition-key value argument of an item operation
pub fn partition_key_value(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(CosmoError::invalid_input("Partition key value cannot be empty"));
    }
    Ok(())
}

/// Validate a listing bound, returning it as a usize
pub fn max_count(value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(CosmoError::invalid_input("max_count must be a positive integer"));
    }
    Ok(value as usize)
}

/// Require an item payload to be a JSON object with a string `id` field
///
/// Returns the id for use in log lines and error messages.
pub fn require_item_id(item: &Value) -> Result<&str> {
    let object = item
        .as_object()
        .ok_or_else(|| CosmoError::invalid_input("Item must be a JSON object"))?;
    object
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| CosmoError::invalid_input("Item must contain a string 'id' field"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_container_name_accepts_valid_names() {
        for name in ["products", "a", "A-1", "0", "my-Container-2024", &"a".repeat(255)] {
            assert!(container_name(name).is_ok(), "expected '{name}' to validate");
        }
    }

    #[test]
    fn test_container_name_rejects_invalid_names() {
        for name in ["", "with space", "under_score", "dot.name", "slash/name", "émoji", &"a".repeat(256)]
        {
            let err = container_name(name).unwrap_err();
            assert!(matches!(err, CosmoError::InvalidInput(_)), "expected '{name}' to fail");
        }
    }

    #[test]
    fn test_partition_key_path_requires_leading_slash() {
        assert!(partition_key_path("/category").is_ok());
        assert!(partition_key_path("/nested/path").is_ok());

        for path in ["", "category", "category/"] {
            let err = partition_key_path(path).unwrap_err();
            assert!(matches!(err, CosmoError::InvalidPartitionKeyPath(_)));
        }
    }

    #[test]
    fn test_throughput_must_be_positive() {
        assert!(throughput(400).is_ok());
        assert!(throughput(1).is_ok());
        assert!(matches!(throughput(0).unwrap_err(), CosmoError::InvalidInput(_)));
    }

    #[test]
    fn test_container_reference_rejects_empty() {
        assert!(container_reference("products").is_ok());
        assert!(matches!(container_reference("").unwrap_err(), CosmoError::InvalidInput(_)));
    }

    #[test]
    fn test_partition_key_value_rejects_empty() {
        assert!(partition_key_value("electronics").is_ok());
        assert!(matches!(partition_key_value("").unwrap_err(), CosmoError::InvalidInput(_)));
    }

    #[test]
    fn test_max_count_bounds() {
        assert_eq!(max_count(50).unwrap(), 50);
        assert_eq!(max_count(1).unwrap(), 1);
        assert!(matches!(max_count(0).unwrap_err(), CosmoError::InvalidInput(_)));
        assert!(matches!(max_count(-1).unwrap_err(), CosmoError::InvalidInput(_)));
    }

    #[test]
    fn test_require_item_id() {
        let item = json!({"id": "sku-1", "name": "lamp"});
        assert_eq!(require_item_id(&item).unwrap(), "sku-1");

        let missing = json!({"name": "lamp"});
        assert!(matches!(require_item_id(&missing).unwrap_err(), CosmoError::InvalidInput(_)));

        let non_string = json!({"id": 7});
        assert!(matches!(require_item_id(&non_string).unwrap_err(), CosmoError::InvalidInput(_)));

        let not_object = json!(["id"]);
        assert!(matches!(require_item_id(&not_object).unwrap_err(), CosmoError::InvalidInput(_)));
    }
}
