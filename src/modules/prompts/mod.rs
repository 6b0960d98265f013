pub mod models;

use async_trait::async_trait;
use iaroute_kernel::{CollectionSpec, IndexSpec, InitCtx, Module};

use models::Prompt;

/// Owns the `prompts` collection
pub struct PromptsModule;

impl PromptsModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for PromptsModule {
    fn name(&self) -> &'static str {
        "prompts"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "prompts module initialized"
        );
        Ok(())
    }

    fn collections(&self) -> Vec<CollectionSpec> {
        // Lookup and filtering by model.
        vec![CollectionSpec::new(Prompt::COLLECTION)
            .with_index(IndexSpec::ascending(Prompt::IA_MODEL))]
    }
}

/// Create a new instance of the prompts module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(PromptsModule::new())
}
