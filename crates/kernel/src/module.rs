use async_trait::async_trait;

use crate::schema::CollectionSpec;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Core module trait that all schema-owning modules implement
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    /// Called before the schema plan is collected
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Collections and secondary indexes this module owns
    fn collections(&self) -> Vec<CollectionSpec> {
        vec![]
    }
}
