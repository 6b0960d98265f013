//! MongoDB client factory and the idempotent schema initializer.

use std::time::Duration;

use anyhow::Context;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use iaroute_kernel::settings::DatabaseSettings;

pub mod error;
pub mod initializer;
pub mod memory;
pub mod mongo;
pub mod store;

pub use error::SchemaError;
pub use initializer::{CollectionReport, SchemaDrift, SchemaInitializer, SchemaReport};
pub use memory::MemoryStore;
pub use mongo::MongoSchemaStore;
pub use store::{IndexDescription, SchemaStore};

/// Connect to the configured deployment and select the target database.
///
/// The database itself is created by the server on first write.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Database> {
    let mut options = ClientOptions::parse(settings.uri.as_str())
        .await
        .with_context(|| "failed to parse MongoDB connection string")?;
    options.server_selection_timeout = Some(Duration::from_millis(settings.connect_timeout_ms));
    options
        .app_name
        .get_or_insert_with(|| "iaroute".to_string());

    let client = Client::with_options(options).context("failed to build MongoDB client")?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .context("failed to ping MongoDB")?;

    tracing::info!(target: "iaroute-db", database = %settings.name, "connected to MongoDB");
    Ok(client.database(&settings.name))
}
