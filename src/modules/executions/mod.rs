pub mod models;

use async_trait::async_trait;
use iaroute_kernel::{CollectionSpec, IndexSpec, InitCtx, Module};

use models::Execution;

/// Owns the `executions` collection
pub struct ExecutionsModule;

impl ExecutionsModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for ExecutionsModule {
    fn name(&self) -> &'static str {
        "executions"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "executions module initialized"
        );
        Ok(())
    }

    fn collections(&self) -> Vec<CollectionSpec> {
        // Per-prompt history and time-range metrics.
        vec![CollectionSpec::new(Execution::COLLECTION)
            .with_index(IndexSpec::ascending(Execution::PROMPT_ID))
            .with_index(IndexSpec::ascending(Execution::TIMESTAMP))]
    }
}

/// Create a new instance of the executions module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(ExecutionsModule::new())
}
