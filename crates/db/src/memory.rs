//! In-process [`SchemaStore`] mirroring the server's schema semantics.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::Document;

use iaroute_kernel::{IndexOrder, IndexSpec};

use crate::error::SchemaError;
use crate::store::{IndexDescription, SchemaStore};

#[derive(Debug)]
struct MemoryCollection {
    indexes: Vec<IndexDescription>,
    documents: Vec<Document>,
}

impl MemoryCollection {
    fn new() -> Self {
        Self {
            indexes: vec![IndexDescription {
                name: "_id_".to_string(),
                keys: vec![("_id".to_string(), Some(IndexOrder::Ascending))],
            }],
            documents: Vec::new(),
        }
    }
}

/// Collections, indexes and documents held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, MemoryCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, creating the collection implicitly like the server does.
    pub fn insert(&self, collection: &str, document: Document) {
        let mut collections = self.lock();
        collections
            .entry(collection.to_string())
            .or_insert_with(MemoryCollection::new)
            .documents
            .push(document);
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.lock()
            .get(collection)
            .map(|c| c.documents.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, MemoryCollection>> {
        // A poisoned lock only means a test panicked mid-update.
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SchemaStore for MemoryStore {
    async fn collection_names(&self) -> Result<Vec<String>, SchemaError> {
        Ok(self.lock().keys().cloned().collect())
    }

    async fn create_collection(&self, name: &str) -> Result<(), SchemaError> {
        let mut collections = self.lock();
        if collections.contains_key(name) {
            return Err(SchemaError::CollectionExists(name.to_string()));
        }
        collections.insert(name.to_string(), MemoryCollection::new());
        Ok(())
    }

    async fn create_index(
        &self,
        collection: &str,
        index: &IndexSpec,
    ) -> Result<String, SchemaError> {
        let mut collections = self.lock();
        let target = collections
            .entry(collection.to_string())
            .or_insert_with(MemoryCollection::new);

        if let Some(existing) = target.indexes.iter().find(|i| i.matches(index)) {
            return Ok(existing.name.clone());
        }

        let name = index.default_name();
        if target.indexes.iter().any(|i| i.name == name) {
            return Err(SchemaError::IndexConflict {
                collection: collection.to_string(),
                index: name,
                message: "an index with the same name has different keys".to_string(),
            });
        }

        target.indexes.push(IndexDescription {
            name: name.clone(),
            keys: vec![(index.field.clone(), Some(index.order))],
        });
        Ok(name)
    }

    async fn indexes(&self, collection: &str) -> Result<Vec<IndexDescription>, SchemaError> {
        self.lock()
            .get(collection)
            .map(|c| c.indexes.clone())
            .ok_or_else(|| SchemaError::UnknownCollection(collection.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_collection_carries_id_index() {
        let store = MemoryStore::new();
        store.create_collection("prompts").await.unwrap();

        let indexes = store.indexes("prompts").await.unwrap();
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].name, "_id_");
    }

    #[tokio::test]
    async fn creating_existing_collection_reports_namespace_exists() {
        let store = MemoryStore::new();
        store.create_collection("prompts").await.unwrap();

        let err = store.create_collection("prompts").await.unwrap_err();
        assert!(matches!(err, SchemaError::CollectionExists(name) if name == "prompts"));
    }

    #[tokio::test]
    async fn identical_index_is_not_duplicated() {
        let store = MemoryStore::new();
        let spec = IndexSpec::ascending("ia_model");

        let first = store.create_index("prompts", &spec).await.unwrap();
        let second = store.create_index("prompts", &spec).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.indexes("prompts").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_collection_has_no_indexes() {
        let store = MemoryStore::new();
        let err = store.indexes("missing").await.unwrap_err();
        assert!(matches!(err, SchemaError::UnknownCollection(_)));
    }
}
