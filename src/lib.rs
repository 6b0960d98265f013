//! IA routing schema bootstrap
//!
//! Declares the `prompts` and `executions` collections with their secondary
//! indexes and applies them idempotently to the configured database.

pub mod modules;

use anyhow::Context;
use iaroute_db::{MongoSchemaStore, SchemaDrift, SchemaInitializer, SchemaReport, SchemaStore};
use iaroute_kernel::settings::Settings;
use iaroute_kernel::{CollectionSpec, InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::executions::models::Execution;
pub use modules::prompts::models::Prompt;

/// Registry with every module of this application registered
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// The declared schema, without touching any database
pub fn schema_plan() -> Vec<CollectionSpec> {
    registry().collect_collections()
}

/// Initialize modules and apply their schema through `store`.
pub async fn apply_schema<S: SchemaStore + ?Sized>(
    store: &S,
    settings: &Settings,
) -> anyhow::Result<SchemaReport> {
    let registry = registry();
    registry
        .init_modules(&InitCtx { settings })
        .await
        .context("failed to initialize modules")?;

    let plan = registry.collect_collections();
    SchemaInitializer::new(store)
        .apply(&plan)
        .await
        .context("failed to apply schema")
}

/// Connect to the configured database and apply the schema once.
pub async fn bootstrap(settings: &Settings) -> anyhow::Result<SchemaReport> {
    let database = iaroute_db::connect(&settings.database)
        .await
        .context("failed to connect to database")?;
    let store = MongoSchemaStore::new(database);

    apply_schema(&store, settings).await
}

/// Connect to the configured database and report schema drift.
pub async fn verify(settings: &Settings) -> anyhow::Result<Vec<SchemaDrift>> {
    let database = iaroute_db::connect(&settings.database)
        .await
        .context("failed to connect to database")?;
    let store = MongoSchemaStore::new(database);

    SchemaInitializer::new(&store)
        .verify(&schema_plan())
        .await
        .context("failed to inspect schema")
}
