//! Idempotent schema initializer.
//!
//! Runs a linear sequence of "create if missing" operations. Nothing is
//! retried: the first store error aborts the run and is returned to the
//! caller unchanged.

use std::fmt;

use iaroute_kernel::{CollectionSpec, IndexSpec};

use crate::error::SchemaError;
use crate::store::SchemaStore;

/// Outcome of applying the plan to one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport {
    pub name: String,
    /// `false` when the collection was already present.
    pub created: bool,
    /// Names of the declared indexes, as reported by the store.
    pub indexes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    pub collections: Vec<CollectionReport>,
}

impl SchemaReport {
    pub fn created_count(&self) -> usize {
        self.collections.iter().filter(|c| c.created).count()
    }
}

/// Something the plan declares that the store does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaDrift {
    MissingCollection(String),
    MissingIndex { collection: String, index: IndexSpec },
}

impl fmt::Display for SchemaDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaDrift::MissingCollection(name) => write!(f, "missing collection '{}'", name),
            SchemaDrift::MissingIndex { collection, index } => write!(
                f,
                "missing index {} on '{}'",
                index.default_name(),
                collection
            ),
        }
    }
}

pub struct SchemaInitializer<'a, S: SchemaStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SchemaStore + ?Sized> SchemaInitializer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create `name` unless it is already present. Returns whether it was created.
    pub async fn ensure_collection_exists(&self, name: &str) -> Result<bool, SchemaError> {
        let existing = self.store.collection_names().await?;
        if existing.iter().any(|candidate| candidate == name) {
            tracing::debug!(collection = name, "collection already present");
            return Ok(false);
        }

        match self.store.create_collection(name).await {
            Ok(()) => {
                tracing::info!(collection = name, "collection created");
                Ok(true)
            }
            // Another initializer created it between the listing and the create.
            Err(SchemaError::CollectionExists(_)) => {
                tracing::debug!(collection = name, "collection created concurrently");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Declare `index` on `collection`. Declaring an existing index is a no-op.
    pub async fn ensure_index(
        &self,
        collection: &str,
        index: &IndexSpec,
    ) -> Result<String, SchemaError> {
        let name = self.store.create_index(collection, index).await?;
        tracing::info!(
            collection,
            field = %index.field,
            order = ?index.order,
            index = %name,
            "index ensured"
        );
        Ok(name)
    }

    /// Ensure every collection in `plan` exists, then declare its indexes.
    pub async fn apply(&self, plan: &[CollectionSpec]) -> Result<SchemaReport, SchemaError> {
        let mut report = SchemaReport::default();

        for spec in plan {
            let created = self.ensure_collection_exists(&spec.name).await?;

            let mut indexes = Vec::with_capacity(spec.indexes.len());
            for index in &spec.indexes {
                indexes.push(self.ensure_index(&spec.name, index).await?);
            }

            report.collections.push(CollectionReport {
                name: spec.name.clone(),
                created,
                indexes,
            });
        }

        tracing::info!(
            collections = report.collections.len(),
            created = report.created_count(),
            "schema applied"
        );
        Ok(report)
    }

    /// List everything in `plan` the store is missing. Read-only.
    pub async fn verify(&self, plan: &[CollectionSpec]) -> Result<Vec<SchemaDrift>, SchemaError> {
        let existing = self.store.collection_names().await?;
        let mut drift = Vec::new();

        for spec in plan {
            if !existing.iter().any(|name| *name == spec.name) {
                drift.push(SchemaDrift::MissingCollection(spec.name.clone()));
                continue;
            }

            let present = self.store.indexes(&spec.name).await?;
            for index in &spec.indexes {
                if !present.iter().any(|description| description.matches(index)) {
                    drift.push(SchemaDrift::MissingIndex {
                        collection: spec.name.clone(),
                        index: index.clone(),
                    });
                }
            }
        }

        for item in &drift {
            tracing::warn!(drift = %item, "schema drift detected");
        }
        Ok(drift)
    }
}
