pub mod executions;
pub mod prompts;

use iaroute_kernel::ModuleRegistry;

/// Register all schema-owning modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(prompts::create_module());
    registry.register(executions::create_module());
}
