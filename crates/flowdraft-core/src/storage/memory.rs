//! Storage that keeps encoded documents in memory.
//!
//! Documents are held as the same JSON text [`FileStorage`](super::FileStorage)
//! writes, so loads go through the full decode path and a stored document is
//! independent of the value it was saved from.

use super::{BoxFuture, DocumentFile, Storage, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Encoded documents keyed by name. Used by tests and as a scratch backend.
#[derive(Default)]
pub struct MemoryStorage {
    blobs: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The encoded text stored under `key`.
    pub fn raw(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.blobs()?.get(key).cloned())
    }

    /// Store text under `key` without encoding it, e.g. a document written by
    /// another version of the editor.
    pub fn insert_raw(&self, key: &str, text: impl Into<String>) -> StorageResult<()> {
        self.blobs()?.insert(key.to_string(), text.into());
        Ok(())
    }

    fn blobs(&self) -> StorageResult<MutexGuard<'_, BTreeMap<String, String>>> {
        self.blobs
            .lock()
            .map_err(|_| StorageError::Other("memory storage lock poisoned".to_string()))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, document: &DocumentFile) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        let encoded = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()));
        Box::pin(async move { self.insert_raw(&key, encoded?) })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<DocumentFile>> {
        let key = key.to_string();
        Box::pin(async move {
            let text = self.raw(&key)?.ok_or(StorageError::NotFound(key))?;
            DocumentFile::from_json(&text).map_err(|e| StorageError::Serialization(e.to_string()))
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            self.blobs()?.remove(&key);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move { Ok(self.blobs()?.keys().cloned().collect()) })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.blobs()?.contains_key(&key)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Shape, ShapeKind, TextMetrics};
    use kurbo::Rect;
    use pollster::block_on;

    fn one_node() -> DocumentFile {
        let node = Shape::from_kind(
            ShapeKind::Decision,
            3,
            Rect::new(0.5, 0.25, 80.125, 40.0),
            &TextMetrics::default(),
        );
        DocumentFile::from_shapes([&node])
    }

    #[test]
    fn test_stores_encoded_text() {
        let storage = MemoryStorage::new();
        let doc = one_node();
        block_on(storage.save("chart", &doc)).unwrap();

        assert_eq!(storage.raw("chart").unwrap(), Some(doc.to_json().unwrap()));
        assert_eq!(block_on(storage.load("chart")).unwrap(), doc);
    }

    #[test]
    fn test_stored_copy_is_independent() {
        let storage = MemoryStorage::new();
        let mut doc = one_node();
        block_on(storage.save("chart", &doc)).unwrap();
        doc.shapes.clear();

        assert_eq!(block_on(storage.load("chart")).unwrap().shapes.len(), 1);
    }

    #[test]
    fn test_undecodable_text_is_a_serialization_error() {
        let storage = MemoryStorage::new();
        storage.insert_raw("broken", "{\"version\": 1, \"shapes\": [").unwrap();

        let err = block_on(storage.load("broken")).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn test_missing_keys() {
        let storage = MemoryStorage::new();
        assert_eq!(
            block_on(storage.load("nowhere")),
            Err(StorageError::NotFound("nowhere".to_string()))
        );
        block_on(storage.delete("nowhere")).unwrap();
        assert!(!block_on(storage.exists("nowhere")).unwrap());
    }

    #[test]
    fn test_keys_listed_in_order() {
        let storage = MemoryStorage::new();
        for key in ["backup-2", "chart", "backup-1"] {
            block_on(storage.save(key, &DocumentFile::default())).unwrap();
        }
        assert_eq!(
            block_on(storage.list()).unwrap(),
            vec!["backup-1", "backup-2", "chart"]
        );
    }
}
