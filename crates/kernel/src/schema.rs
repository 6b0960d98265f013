//! Declarative description of the collections and indexes a module needs.

use serde::Serialize;

/// Sort direction of an index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexOrder {
    Ascending,
    Descending,
}

impl IndexOrder {
    /// Numeric direction as written in an index key document.
    pub fn as_i32(self) -> i32 {
        match self {
            IndexOrder::Ascending => 1,
            IndexOrder::Descending => -1,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(IndexOrder::Ascending),
            -1 => Some(IndexOrder::Descending),
            _ => None,
        }
    }
}

/// A single-field secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IndexSpec {
    pub field: String,
    pub order: IndexOrder,
}

impl IndexSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: IndexOrder::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: IndexOrder::Descending,
        }
    }

    /// Name the server assigns when none is given, e.g. `ia_model_1`.
    pub fn default_name(&self) -> String {
        format!("{}_{}", self.field, self.order.as_i32())
    }
}

/// A collection together with the secondary indexes it must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSpec {
    pub name: String,
    pub indexes: Vec<IndexSpec>,
}

impl CollectionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            indexes: Vec::new(),
        }
    }

    pub fn with_index(mut self, index: IndexSpec) -> Self {
        if !self.indexes.contains(&index) {
            self.indexes.push(index);
        }
        self
    }

    /// Fold another declaration of the same collection into this one.
    pub fn merge(&mut self, other: CollectionSpec) {
        debug_assert_eq!(self.name, other.name);
        for index in other.indexes {
            if !self.indexes.contains(&index) {
                self.indexes.push(index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_matches_server_convention() {
        assert_eq!(IndexSpec::ascending("ia_model").default_name(), "ia_model_1");
        assert_eq!(IndexSpec::descending("timestamp").default_name(), "timestamp_-1");
    }

    #[test]
    fn duplicate_indexes_are_collapsed() {
        let mut spec = CollectionSpec::new("executions")
            .with_index(IndexSpec::ascending("prompt_id"))
            .with_index(IndexSpec::ascending("prompt_id"));
        assert_eq!(spec.indexes.len(), 1);

        spec.merge(
            CollectionSpec::new("executions")
                .with_index(IndexSpec::ascending("prompt_id"))
                .with_index(IndexSpec::ascending("timestamp")),
        );
        assert_eq!(
            spec.indexes,
            vec![
                IndexSpec::ascending("prompt_id"),
                IndexSpec::ascending("timestamp")
            ]
        );
    }

    #[test]
    fn order_round_trips_through_key_values() {
        assert_eq!(IndexOrder::from_i64(1), Some(IndexOrder::Ascending));
        assert_eq!(IndexOrder::from_i64(-1), Some(IndexOrder::Descending));
        assert_eq!(IndexOrder::from_i64(2), None);
    }
}
