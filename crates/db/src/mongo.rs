//! Driver-backed [`SchemaStore`].

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document};
use mongodb::{Database, IndexModel};

use iaroute_kernel::{IndexOrder, IndexSpec};

use crate::error::{
    SchemaError, INDEX_KEY_SPECS_CONFLICT, INDEX_OPTIONS_CONFLICT, NAMESPACE_EXISTS,
};
use crate::store::{IndexDescription, SchemaStore};

/// MongoDB server error code for "namespace not found".
const NAMESPACE_NOT_FOUND: i32 = 26;

pub struct MongoSchemaStore {
    database: Database,
}

impl MongoSchemaStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl SchemaStore for MongoSchemaStore {
    async fn collection_names(&self) -> Result<Vec<String>, SchemaError> {
        Ok(self.database.list_collection_names().await?)
    }

    async fn create_collection(&self, name: &str) -> Result<(), SchemaError> {
        match self.database.create_collection(name).await {
            Ok(()) => Ok(()),
            Err(err) if SchemaError::command_code(&err) == Some(NAMESPACE_EXISTS) => {
                Err(SchemaError::CollectionExists(name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn create_index(
        &self,
        collection: &str,
        index: &IndexSpec,
    ) -> Result<String, SchemaError> {
        let model = IndexModel::builder().keys(key_document(index)).build();

        match self
            .database
            .collection::<Document>(collection)
            .create_index(model)
            .await
        {
            Ok(result) => Ok(result.index_name),
            Err(err)
                if matches!(
                    SchemaError::command_code(&err),
                    Some(INDEX_OPTIONS_CONFLICT | INDEX_KEY_SPECS_CONFLICT)
                ) =>
            {
                Err(SchemaError::IndexConflict {
                    collection: collection.to_string(),
                    index: index.default_name(),
                    message: err.to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn indexes(&self, collection: &str) -> Result<Vec<IndexDescription>, SchemaError> {
        let cursor = match self
            .database
            .collection::<Document>(collection)
            .list_indexes()
            .await
        {
            Ok(cursor) => cursor,
            Err(err) if SchemaError::command_code(&err) == Some(NAMESPACE_NOT_FOUND) => {
                return Err(SchemaError::UnknownCollection(collection.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let models: Vec<IndexModel> = cursor.try_collect().await?;
        Ok(models.iter().map(describe).collect())
    }
}

pub(crate) fn key_document(index: &IndexSpec) -> Document {
    let mut keys = Document::new();
    keys.insert(index.field.clone(), index.order.as_i32());
    keys
}

fn describe(model: &IndexModel) -> IndexDescription {
    let keys = model
        .keys
        .iter()
        .map(|(field, value)| (field.clone(), order_from_bson(value)))
        .collect::<Vec<_>>();

    let name = model
        .options
        .as_ref()
        .and_then(|options| options.name.clone())
        .unwrap_or_else(|| {
            keys.iter()
                .map(|(field, order)| match order {
                    Some(order) => format!("{}_{}", field, order.as_i32()),
                    None => field.clone(),
                })
                .collect::<Vec<_>>()
                .join("_")
        });

    IndexDescription { name, keys }
}

/// Key values may come back as any numeric BSON type.
pub(crate) fn order_from_bson(value: &Bson) -> Option<IndexOrder> {
    match value {
        Bson::Int32(v) => IndexOrder::from_i64(i64::from(*v)),
        Bson::Int64(v) => IndexOrder::from_i64(*v),
        Bson::Double(v) if v.fract() == 0.0 => IndexOrder::from_i64(*v as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use mongodb::options::IndexOptions;

    #[test]
    fn key_document_uses_numeric_direction() {
        assert_eq!(
            key_document(&IndexSpec::ascending("ia_model")),
            doc! { "ia_model": 1 }
        );
        assert_eq!(
            key_document(&IndexSpec::descending("timestamp")),
            doc! { "timestamp": -1 }
        );
    }

    #[test]
    fn order_accepts_every_numeric_encoding() {
        assert_eq!(order_from_bson(&Bson::Int32(1)), Some(IndexOrder::Ascending));
        assert_eq!(order_from_bson(&Bson::Int64(-1)), Some(IndexOrder::Descending));
        assert_eq!(order_from_bson(&Bson::Double(1.0)), Some(IndexOrder::Ascending));
        assert_eq!(order_from_bson(&Bson::String("text".into())), None);
        assert_eq!(order_from_bson(&Bson::Double(0.5)), None);
    }

    #[test]
    fn describe_prefers_server_reported_name() {
        let named = IndexModel::builder()
            .keys(doc! { "prompt_id": 1 })
            .options(IndexOptions::builder().name("prompt_id_1".to_string()).build())
            .build();
        let description = describe(&named);
        assert_eq!(description.name, "prompt_id_1");
        assert!(description.matches(&IndexSpec::ascending("prompt_id")));
        assert!(!description.matches(&IndexSpec::descending("prompt_id")));

        let unnamed = IndexModel::builder().keys(doc! { "body": "text" }).build();
        let description = describe(&unnamed);
        assert_eq!(description.name, "body");
        assert_eq!(description.keys, vec![("body".to_string(), None)]);
    }
}
