//! Runs against a live server: `IAROUTE_TEST_MONGO_URI=mongodb://... cargo test -- --ignored`

use iaroute_db::{connect, MongoSchemaStore, SchemaInitializer, SchemaStore};
use iaroute_kernel::settings::DatabaseSettings;
use iaroute_kernel::{CollectionSpec, IndexSpec};
use mongodb::bson::doc;

fn plan() -> Vec<CollectionSpec> {
    vec![
        CollectionSpec::new("prompts").with_index(IndexSpec::ascending("ia_model")),
        CollectionSpec::new("executions")
            .with_index(IndexSpec::ascending("prompt_id"))
            .with_index(IndexSpec::ascending("timestamp")),
    ]
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn apply_twice_against_live_server() {
    let uri = std::env::var("IAROUTE_TEST_MONGO_URI")
        .unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string());
    let settings = DatabaseSettings {
        uri,
        name: format!("iaroute_test_{}", std::process::id()),
        ..DatabaseSettings::default()
    };

    let database = connect(&settings).await.unwrap();
    database.drop().await.unwrap();

    let seeded = doc! { "name": "seed", "template": "t", "ia_model": "gpt-4o" };
    database
        .collection::<mongodb::bson::Document>("prompts")
        .insert_one(seeded)
        .await
        .unwrap();

    let store = MongoSchemaStore::new(database.clone());
    let initializer = SchemaInitializer::new(&store);

    let first = initializer.apply(&plan()).await.unwrap();
    assert!(!first.collections[0].created);
    assert!(first.collections[1].created);

    let second = initializer.apply(&plan()).await.unwrap();
    assert_eq!(second.created_count(), 0);
    assert_eq!(first.collections[1].indexes, second.collections[1].indexes);

    assert!(initializer.verify(&plan()).await.unwrap().is_empty());
    assert_eq!(store.indexes("executions").await.unwrap().len(), 3);

    let count = database
        .collection::<mongodb::bson::Document>("prompts")
        .count_documents(doc! {})
        .await
        .unwrap();
    assert_eq!(count, 1);

    database.drop().await.unwrap();
}
