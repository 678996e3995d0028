//! Settings payloads: book categories and storage providers.
//!
//! Only the identifying fields are declared. Everything else the backend
//! sends is kept in `extra` and written back untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageProvider {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    #[serde(default)]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewStorage {
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_provider_keeps_unknown_fields() {
        let json = r#"{"id": 3, "name": "NAS", "type": "webdav", "active": true, "endpoint": "https://nas.local/dav", "username": "reader"}"#;
        let storage: StorageProvider = serde_json::from_str(json).expect("parse storage");

        assert_eq!(storage.provider_type, "webdav");
        assert!(storage.active);
        assert_eq!(storage.extra.get("endpoint"), Some(&Value::from("https://nas.local/dav")));

        let back = serde_json::to_value(&storage).expect("serialize");
        assert_eq!(back["username"], "reader");
        assert_eq!(back["type"], "webdav");
    }

    #[test]
    fn test_category_without_extra_fields() {
        let category: Category =
            serde_json::from_str(r#"{"id": 1, "name": "Sci-Fi"}"#).expect("parse");
        assert!(category.extra.is_empty());
        assert_eq!(NewCategory::named("Poetry").name, "Poetry");
    }
}
