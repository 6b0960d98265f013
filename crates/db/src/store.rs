use async_trait::async_trait;
use iaroute_kernel::{IndexOrder, IndexSpec};

use crate::error::SchemaError;

/// An index as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescription {
    pub name: String,
    /// Key fields in declaration order. Non-directional keys (text, hashed)
    /// have no order.
    pub keys: Vec<(String, Option<IndexOrder>)>,
}

impl IndexDescription {
    /// True when this is exactly the single-field index `spec` describes.
    pub fn matches(&self, spec: &IndexSpec) -> bool {
        matches!(
            self.keys.as_slice(),
            [(field, Some(order))] if *field == spec.field && *order == spec.order
        )
    }
}

/// Schema capabilities the initializer needs from a document store.
///
/// `create_collection` reports [`SchemaError::CollectionExists`] when the
/// name is taken. `create_index` must be a no-op returning the existing name
/// when an identical index is already present.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    async fn collection_names(&self) -> Result<Vec<String>, SchemaError>;

    async fn create_collection(&self, name: &str) -> Result<(), SchemaError>;

    async fn create_index(&self, collection: &str, index: &IndexSpec)
        -> Result<String, SchemaError>;

    async fn indexes(&self, collection: &str) -> Result<Vec<IndexDescription>, SchemaError>;
}
