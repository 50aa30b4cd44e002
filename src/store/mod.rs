use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::model::{Order, StoredOrder};

pub const DEFAULT_STORE_KEY: &str = "orders";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file: {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store file is not valid JSON: {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("store file must hold a JSON object of keys to values: {path}")]
    NotAnObject { path: String },
}

/// A string-valued key-value store, read the way browser local storage is.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }
}

/// A JSON object on disk mapping keys to values, e.g. a dump of a browser's
/// local storage. The file is read on every lookup.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path.display().to_string();
        let contents = std::fs::read_to_string(&self.path).map_err(|e| StoreError::Read {
            path: path.clone(),
            source: e,
        })?;
        let root: Value =
            serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
                path: path.clone(),
                source: e,
            })?;
        let Value::Object(mut entries) = root else {
            return Err(StoreError::NotAnObject { path });
        };
        Ok(match entries.remove(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        })
    }
}

/// Decode a serialized order list and normalize each record.
///
/// Anything that is not a JSON array yields no orders. Array entries that
/// are not objects are skipped.
pub fn decode_orders(raw: &str) -> Vec<Order> {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(Value::Null) => return Vec::new(),
        Ok(_) => {
            tracing::warn!("stored orders are not a list, treating as empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored orders could not be parsed, treating as empty");
            return Vec::new();
        }
    };

    let mut orders = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<StoredOrder>(entry) {
            Ok(stored) => orders.push(stored.normalize()),
            Err(e) => tracing::warn!(index, error = %e, "skipping unreadable order record"),
        }
    }
    orders
}

/// Read the order list stored under `key`. Absent or unreadable data is an
/// empty list.
pub fn load_orders(store: &dyn KeyValueStore, key: &str) -> Vec<Order> {
    match store.get_item(key) {
        Ok(Some(raw)) => {
            let orders = decode_orders(&raw);
            tracing::debug!(key, count = orders.len(), "loaded orders");
            orders
        }
        Ok(None) => {
            tracing::debug!(key, "no orders stored");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "order store unavailable, treating as empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "orderboard-store-{}-{name}.json",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_key_is_empty() {
        let store = MemoryStore::new();
        assert!(load_orders(&store, DEFAULT_STORE_KEY).is_empty());
    }

    #[test]
    fn garbage_is_empty() {
        let store = MemoryStore::new().with_item("orders", "{not json");
        assert!(load_orders(&store, "orders").is_empty());
        let store = MemoryStore::new().with_item("orders", "\"a string\"");
        assert!(load_orders(&store, "orders").is_empty());
        let store = MemoryStore::new().with_item("orders", "null");
        assert!(load_orders(&store, "orders").is_empty());
    }

    #[test]
    fn non_object_records_are_skipped() {
        let store = MemoryStore::new().with_item(
            "orders",
            r#"[{"orderId": "A1", "orderType": "Takeaway"}, 42, null, {"orderId": "A2"}]"#,
        );
        let orders = load_orders(&store, "orders");
        let ids: Vec<_> = orders.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2"]);
        assert_eq!(orders[1].order_type, "Dine In");
    }

    #[test]
    fn file_store_reads_string_and_inline_values() {
        let path = temp_store_file(
            "values",
            r#"{"orders": "[{\"orderId\": \"S1\"}]", "inline": [{"orderId": "I1"}]}"#,
        );
        let store = JsonFileStore::new(&path);
        let stringly = load_orders(&store, "orders");
        let inline = load_orders(&store, "inline");
        let _ = std::fs::remove_file(&path);
        assert_eq!(stringly[0].order_id, "S1");
        assert_eq!(inline[0].order_id, "I1");
    }

    #[test]
    fn file_store_errors_are_reported_by_get_item() {
        let store = JsonFileStore::new(std::env::temp_dir().join("orderboard-does-not-exist.json"));
        assert!(matches!(store.get_item("orders"), Err(StoreError::Read { .. })));
        assert!(load_orders(&store, "orders").is_empty());

        let path = temp_store_file("array-root", "[]");
        let store = JsonFileStore::new(&path);
        let result = store.get_item("orders");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(StoreError::NotAnObject { .. })));
    }
}
