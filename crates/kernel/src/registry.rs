use anyhow::Context;
use std::sync::Arc;

use crate::module::{InitCtx, Module};
use crate::schema::CollectionSpec;

/// Module registry holding every module that contributes to the schema
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new module registry
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module with the registry
    pub fn register(&mut self, module: Arc<dyn Module>) {
        self.modules.push(module);
    }

    /// Get all registered modules in registration order
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    /// Get a module by name
    pub fn get_module(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules.iter().find(|module| module.name() == name)
    }

    /// Get the number of registered modules
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Initialize modules in registration order
    pub async fn init_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("initializing {} modules", self.modules.len());

        for module in &self.modules {
            tracing::info!(module = module.name(), "initializing module");

            module
                .init(ctx)
                .await
                .with_context(|| format!("failed to initialize module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Collect the schema plan from all modules.
    ///
    /// Collections keep the order in which they were first declared; repeated
    /// declarations of the same collection are merged.
    pub fn collect_collections(&self) -> Vec<CollectionSpec> {
        let mut plan: Vec<CollectionSpec> = Vec::new();

        for module in &self.modules {
            for spec in module.collections() {
                match plan.iter_mut().find(|existing| existing.name == spec.name) {
                    Some(existing) => {
                        tracing::debug!(
                            module = module.name(),
                            collection = %spec.name,
                            "merging repeated collection declaration"
                        );
                        existing.merge(spec);
                    }
                    None => plan.push(spec),
                }
            }
        }

        plan
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
