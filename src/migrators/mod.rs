//! Concrete migrators (spec's "per-resource catalogs" treated as data
//! input): five illustrative strategies, one per edit shape the pipeline
//! supports, registered here at startup the way a real per-resource
//! catalog would be.

mod access_rule;
mod block_to_attr;
mod fallback_domain;
mod kind_rename;
mod rename_only;

use std::sync::Arc;

use crate::error::EngineError;
use crate::registry::Registry;

/// Registers every demonstration migrator for the 1 -> 2 schema upgrade.
/// Called once during startup; a duplicate registration is a fatal error
/// and aborts the process before any file is transformed.
pub fn register_all(registry: &mut Registry) -> Result<(), EngineError> {
    registry.register("example_widget", 1, 2, Arc::new(rename_only::WidgetRenameMigrator))?;
    registry.register(
        "example_cors_config",
        1,
        2,
        Arc::new(block_to_attr::CorsConfigMigrator),
    )?;
    registry.register("example_old_queue", 1, 2, Arc::new(kind_rename::OldQueueMigrator))?;
    registry.register(
        "example_access_rule",
        1,
        2,
        Arc::new(access_rule::AccessRuleMigrator),
    )?;
    registry.register(
        "example_fallback_domain",
        1,
        2,
        Arc::new(fallback_domain::FallbackDomainMigrator),
    )?;
    Ok(())
}
