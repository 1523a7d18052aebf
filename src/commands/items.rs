//! Item Management Commands
//!
//! `cosmo items create|get|update|delete|list`
//!
//! Item payloads are read from a JSON file or stdin (`--data -`) and must be
//! a single JSON object; the repository enforces the `id` field rules.

use std::io::Read;

use clap::Subcommand;
use serde_json::{json, Value};

use crate::commands::{repository, CommandOutcome};
use crate::confirm::require_confirmation;
use crate::error::{CosmoError, Result};
use crate::output::{items_table, Metadata, OutputAdapter};
use crate::repository::DEFAULT_MAX_ITEM_COUNT;

/// Item lifecycle subcommands
#[derive(Subcommand, Debug)]
pub enum ItemsCommand {
    /// Create a new item in a container from a JSON payload
    Create {
        /// Container name where the item will be created
        container: String,

        /// Path to a JSON file with the item data, or '-' for stdin
        #[arg(long)]
        data: String,

        /// Partition key value for the item
        #[arg(long = "partition-key")]
        partition_key: String,
    },

    /// Retrieve a single item by id and partition key
    Get {
        /// Container name
        container: String,

        /// Item id to retrieve
        item_id: String,

        /// Partition key value for the item
        #[arg(long = "partition-key")]
        partition_key: String,
    },

    /// Update an existing item (or create it if absent) from a JSON payload
    Update {
        /// Container name
        container: String,

        /// Item id to update
        item_id: String,

        /// Path to a JSON file with the updated item data, or '-' for stdin
        #[arg(long)]
        data: String,

        /// Partition key value for the item
        #[arg(long = "partition-key")]
        partition_key: String,
    },

    /// Delete an item (asks for confirmation unless --yes)
    Delete {
        /// Container name
        container: String,

        /// Item id to delete
        item_id: String,

        /// Partition key value for the item
        #[arg(long = "partition-key")]
        partition_key: String,
    },

    /// List items in a container
    List {
        /// Container name
        container: String,

        /// Maximum number of items to retrieve
        #[arg(long = "max-count", default_value_t = DEFAULT_MAX_ITEM_COUNT)]
        max_count: i64,
    },
}

impl ItemsCommand {
    /// Stable command label used in output envelopes
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Create { .. } => "items create",
            Self::Get { .. } => "items get",
            Self::Update { .. } => "items update",
            Self::Delete { .. } => "items delete",
            Self::List { .. } => "items list",
        }
    }
}

/// Read an item payload from a file or stdin and require a JSON object
fn read_item_payload(source: &str) -> Result<Value> {
    let content = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|err| CosmoError::invalid_input(format!("Could not read stdin: {err}")))?;
        buffer
    } else {
        std::fs::read_to_string(source)
            .map_err(|_| CosmoError::invalid_input(format!("File not found: {source}")))?
    };

    let payload: Value = serde_json::from_str(&content)
        .map_err(|_| CosmoError::invalid_input(format!("Invalid JSON in: {source}")))?;
    if !payload.is_object() {
        return Err(CosmoError::invalid_input(
            "Item payload must be a single JSON object, not an array or scalar",
        ));
    }
    Ok(payload)
}

/// Pretty JSON used for single-item human output
fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Execute one item subcommand
pub fn run(command: ItemsCommand, output: &OutputAdapter, yes: bool) -> Result<CommandOutcome> {
    match command {
        ItemsCommand::Create { container, data, partition_key } => {
            let payload = read_item_payload(&data)?;
            let repo = repository()?;
            let created = repo.create_item(&container, &payload, &partition_key)?;

            let item_id = created.get("id").and_then(Value::as_str).unwrap_or_default();
            let human =
                format!("Created item '{item_id}' in container '{container}'\n{}", pretty(&created));
            output.success(
                "items create",
                &json!({ "status": "created", "item": created }),
                Metadata::new(),
                &human,
            );
            Ok(CommandOutcome::Completed)
        }

        ItemsCommand::Get { container, item_id, partition_key } => {
            let repo = repository()?;
            let item = repo.get_item(&container, &item_id, &partition_key)?;

            output.success("items get", &json!({ "item": item }), Metadata::new(), &pretty(&item));
            Ok(CommandOutcome::Completed)
        }

        ItemsCommand::Update { container, item_id, data, partition_key } => {
            let payload = read_item_payload(&data)?;
            let repo = repository()?;
            let updated = repo.update_item(&container, &item_id, &payload, &partition_key)?;

            let human =
                format!("Updated item '{item_id}' in container '{container}'\n{}", pretty(&updated));
            output.success(
                "items update",
                &json!({ "status": "updated", "item": updated }),
                Metadata::new(),
                &human,
            );
            Ok(CommandOutcome::Completed)
        }

        ItemsCommand::Delete { container, item_id, partition_key } => {
            let message =
                format!("Delete item '{item_id}' from container '{container}'? This cannot be undone.");
            if !require_confirmation(&message, yes) {
                return Ok(CommandOutcome::Aborted);
            }

            let repo = repository()?;
            repo.delete_item(&container, &item_id, &partition_key)?;

            output.success(
                "items delete",
                &json!({ "status": "deleted", "item_id": item_id, "container": container }),
                Metadata::new(),
                &format!("Deleted item '{item_id}' from container '{container}'"),
            );
            Ok(CommandOutcome::Completed)
        }

        ItemsCommand::List { container, max_count } => {
            let repo = repository()?;
            let items = repo.list_items(&container, max_count)?;

            let human = if items.is_empty() {
                format!("No items found in container '{container}'")
            } else {
                items_table(&items)
            };
            output.success(
                "items list",
                &json!({ "items": items, "count": items.len() }),
                Metadata::with_count(items.len()),
                &human,
            );
            Ok(CommandOutcome::Completed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_item_payload_from_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("cosmo_test_payload.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"id": "sku-1", "name": "lamp"}}"#).unwrap();

        let payload = read_item_payload(path.to_str().unwrap()).unwrap();
        assert_eq!(payload["id"], "sku-1");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_read_item_payload_missing_file() {
        let err = read_item_payload("/nonexistent/cosmo-payload.json").unwrap_err();
        assert!(matches!(err, CosmoError::InvalidInput(_)));
        assert!(err.message().contains("File not found"));
    }

    #[test]
    fn test_read_item_payload_rejects_invalid_json() {
        let dir = std::env::temp_dir();
        let path = dir.join("cosmo_test_invalid.json");
        std::fs::write(&path, "not json").unwrap();

        let err = read_item_payload(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CosmoError::InvalidInput(_)));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_read_item_payload_rejects_arrays() {
        let dir = std::env::temp_dir();
        let path = dir.join("cosmo_test_array.json");
        std::fs::write(&path, r#"[{"id": "sku-1"}]"#).unwrap();

        let err = read_item_payload(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CosmoError::InvalidInput(_)));
        assert!(err.message().contains("single JSON object"));

        let _ = std::fs::remove_file(&path);
    }
}
