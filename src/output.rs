//! Output Envelopes and Rendering
//!
//! Defines the structured JSON output format and the human text rendering
//! used by the CLI layer.
//!
//! # Output Contract
//! - Success: `{"ok": true, "command": "...", "data": {...}, "meta": {...}}`
//! - Error: `{"ok": false, "command": "...", "error": {"code": "...", "message": "..."}}`
//!
//! JSON goes to stdout and is stable for programmatic parsing; human text
//! goes to stdout on success and stderr on failure. Logs never share stdout.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CosmoError;
use crate::transport::ContainerProperties;

/// Cell values longer than this are truncated in human tables
const MAX_CELL_WIDTH: usize = 50;

/// Success envelope for operation results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    /// Always true for success envelopes
    pub ok: bool,

    /// Command that was executed (e.g. "containers list")
    pub command: String,

    /// Operation-specific data
    pub data: T,

    /// Execution metadata
    pub meta: Metadata,
}

impl<T> SuccessEnvelope<T> {
    /// Create a new success envelope
    pub fn new(command: impl Into<String>, data: T, meta: Metadata) -> Self {
        Self { ok: true, command: command.into(), data, meta }
    }
}

/// Error envelope for operation failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Always false for error envelopes
    pub ok: bool,

    /// Command that was attempted
    pub command: String,

    /// Error information
    pub error: ErrorInfo,
}

impl ErrorEnvelope {
    /// Create a new error envelope
    pub fn new(command: impl Into<String>, error: ErrorInfo) -> Self {
        Self { ok: false, command: command.into(), error }
    }

    /// Create error envelope from a domain error
    pub fn from_error(command: impl Into<String>, err: &CosmoError) -> Self {
        Self::new(command, ErrorInfo { code: err.error_code().to_string(), message: err.message() })
    }
}

/// Error information structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable error code (e.g. "RESOURCE_NOT_FOUND")
    pub code: String,

    /// Human-readable error message (no sensitive data)
    pub message: String,
}

/// Execution metadata included in success responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Number of entities returned, for listing operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Metadata {
    /// Metadata with no listing count
    #[must_use]
    pub const fn new() -> Self {
        Self { count: None }
    }

    /// Metadata carrying a listing count
    #[must_use]
    pub const fn with_count(count: usize) -> Self {
        Self { count: Some(count) }
    }
}

/// Output mode selector shared by every command
#[derive(Debug, Clone, Copy)]
pub struct OutputAdapter {
    json: bool,
}

impl OutputAdapter {
    #[must_use]
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    /// True when machine-readable JSON output is selected
    #[must_use]
    pub const fn json_mode(&self) -> bool {
        self.json
    }

    /// Render a successful result
    ///
    /// JSON mode prints the envelope on one line; text mode prints `human`
    /// when non-empty.
    pub fn success<T: Serialize>(&self, command: &str, data: &T, meta: Metadata, human: &str) {
        if self.json {
            emit(&SuccessEnvelope::new(command, data, meta));
        } else if !human.is_empty() {
            println!("{human}");
        }
    }

    /// Render a failure
    ///
    /// JSON mode prints the error envelope to stdout; text mode prints the
    /// actionable message to stderr.
    pub fn failure(&self, command: &str, err: &CosmoError) {
        if self.json {
            emit(&ErrorEnvelope::from_error(command, err));
        } else {
            eprintln!("{}", actionable_message(err));
        }
    }
}

/// Serialize and print one JSON line
fn emit<T: Serialize>(value: &T) {
    if let Ok(line) = serde_json::to_string(value) {
        println!("{line}");
    }
}

/// One actionable message per taxonomy kind
///
/// The first line is the classified error; the second tells the user what to
/// do about it.
#[must_use]
pub fn actionable_message(err: &CosmoError) -> String {
    let hint = match err {
        CosmoError::ConnectionFailure(_) => {
            "Check the connection string and that the service is reachable."
        }
        CosmoError::AuthFailure(_) => {
            "Set COSMO_CONNECTION_STRING (or COSMO_ENDPOINT and COSMO_KEY) with valid credentials."
        }
        CosmoError::ResourceNotFound(_) => {
            "Run 'cosmo containers list' to see existing containers."
        }
        CosmoError::ResourceAlreadyExists(_) => {
            "Run 'cosmo containers list' to see existing containers."
        }
        CosmoError::QuotaExceeded(_) => {
            "Reduce the requested throughput or check account limits."
        }
        CosmoError::InvalidPartitionKeyPath(_) => {
            "Partition key paths start with '/', e.g. /category."
        }
        CosmoError::ItemNotFound(_) => "Check the item id and the partition key value.",
        CosmoError::PartitionKeyMismatch(_) => "Check the partition key value for this item.",
        CosmoError::DuplicateItem(_) => {
            "Use 'cosmo items update' to replace the existing item."
        }
        CosmoError::InvalidInput(_) => "Adjust the arguments and try again.",
    };
    format!("{err}\n{hint}")
}

/// Text table for container listings
#[must_use]
pub fn containers_table(containers: &[ContainerProperties]) -> String {
    let header = ["NAME", "PARTITION KEY", "THROUGHPUT (RU/S)"];
    let rows: Vec<[String; 3]> = containers
        .iter()
        .map(|container| {
            [
                container.id.clone(),
                container.partition_key_path().to_string(),
                container.throughput.map_or_else(|| "-".to_string(), |ru| ru.to_string()),
            ]
        })
        .collect();

    render_table(&header.map(String::from), &rows)
}

/// Text table for item listings
///
/// Columns come from the first item's fields; values are truncated to keep
/// rows readable.
#[must_use]
pub fn items_table(items: &[Value]) -> String {
    let Some(first) = items.first().and_then(Value::as_object) else {
        return String::new();
    };
    let columns: Vec<String> = first.keys().cloned().collect();

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| columns.iter().map(|column| cell_text(item.get(column))).collect())
        .collect();

    let header: Vec<String> = columns.iter().map(|column| column.to_uppercase()).collect();
    render_rows(&header, &rows)
}

fn cell_text(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    };
    if text.len() > MAX_CELL_WIDTH {
        let mut truncated: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
        truncated.push_str("...");
        truncated
    } else {
        text
    }
}

fn render_table<const N: usize>(header: &[String; N], rows: &[[String; N]]) -> String {
    let header_vec: Vec<String> = header.to_vec();
    let row_vecs: Vec<Vec<String>> = rows.iter().map(|row| row.to_vec()).collect();
    render_rows(&header_vec, &row_vecs)
}

fn render_rows(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if index < widths.len() && cell.len() > widths[index] {
                widths[index] = cell.len();
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(header, &widths));
    for row in rows {
        lines.push(format_row(row, &widths));
    }
    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let formatted: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    formatted.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::PartitionKeyDefinition;
    use serde_json::json;

    #[test]
    fn test_success_envelope_serialization() {
        let envelope = SuccessEnvelope::new(
            "containers list",
            json!({"containers": []}),
            Metadata::with_count(0),
        );

        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains(r#""ok":true"#));
        assert!(json.contains(r#""command":"containers list"#));
        assert!(json.contains(r#""count":0"#));
    }

    #[test]
    fn test_error_envelope_serialization() {
        let envelope = ErrorEnvelope::new(
            "items get",
            ErrorInfo { code: "ITEM_NOT_FOUND".to_string(), message: "missing".to_string() },
        );

        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains(r#""ok":false"#));
        assert!(json.contains(r#""code":"ITEM_NOT_FOUND"#));
        assert!(json.contains(r#""message":"missing"#));
    }

    #[test]
    fn test_error_envelope_from_domain_error() {
        let err = CosmoError::resource_already_exists("Container 'products' already exists");
        let envelope = ErrorEnvelope::from_error("containers create", &err);

        assert!(!envelope.ok);
        assert_eq!(envelope.command, "containers create");
        assert_eq!(envelope.error.code, "RESOURCE_ALREADY_EXISTS");
        assert!(envelope.error.message.contains("products"));
    }

    #[test]
    fn test_metadata_count_omitted_when_absent() {
        let json = serde_json::to_string(&Metadata::new()).unwrap();
        assert!(!json.contains("count"));

        let json = serde_json::to_string(&Metadata::with_count(3)).unwrap();
        assert!(json.contains(r#""count":3"#));
    }

    #[test]
    fn test_actionable_message_covers_every_kind() {
        let cases = [
            CosmoError::connection_failure("x"),
            CosmoError::auth_failure("x"),
            CosmoError::resource_not_found("x"),
            CosmoError::resource_already_exists("x"),
            CosmoError::quota_exceeded("x"),
            CosmoError::invalid_partition_key_path("x"),
            CosmoError::item_not_found("x"),
            CosmoError::partition_key_mismatch("x"),
            CosmoError::duplicate_item("x"),
            CosmoError::invalid_input("x"),
        ];

        for err in &cases {
            let message = actionable_message(err);
            let mut lines = message.lines();
            assert_eq!(lines.next(), Some(err.to_string().as_str()));
            assert!(lines.next().is_some(), "missing hint for {}", err.error_code());
        }
    }

    #[test]
    fn test_containers_table_layout() {
        let containers = vec![
            ContainerProperties {
                id: "products".to_string(),
                partition_key: PartitionKeyDefinition::hash("/category"),
                throughput: Some(400),
                indexing_policy: None,
            },
            ContainerProperties {
                id: "orders".to_string(),
                partition_key: PartitionKeyDefinition::hash("/customer-id"),
                throughput: None,
                indexing_policy: None,
            },
        ];

        let table = containers_table(&containers);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].contains("products"));
        assert!(lines[1].contains("/category"));
        assert!(lines[1].contains("400"));
        assert!(lines[2].contains('-'));
    }

    #[test]
    fn test_items_table_truncates_long_values() {
        let long_value = "x".repeat(80);
        let items = vec![json!({"id": "sku-1", "notes": long_value})];

        let table = items_table(&items);
        assert!(table.contains("..."));
        assert!(!table.contains(&"x".repeat(60)));
        assert!(table.lines().next().unwrap().contains("ID"));
    }

    #[test]
    fn test_items_table_empty_is_blank() {
        assert_eq!(items_table(&[]), "");
    }
}
