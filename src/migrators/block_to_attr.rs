//! A demonstration migrator exercising block-to-attribute conversion:
//! a single nested `cors { ... }` block becomes a `cors = { ... }`
//! attribute.

use hcl_edit::structure::Block;
use serde_json::Value;

use crate::context::TransformationContext;
use crate::error::EngineError;
use crate::hcl::transform::convert_block_to_attribute;
use crate::migrator::{MigratorStrategy, TransformResult};

pub struct CorsConfigMigrator;

impl MigratorStrategy for CorsConfigMigrator {
    fn can_handle(&self, kind: &str) -> bool {
        kind == "example_cors_config"
    }

    fn target_kind(&self) -> &str {
        "example_cors_config"
    }

    fn transform_config(
        &self,
        _ctx: &mut TransformationContext,
        mut block: Block,
    ) -> Result<TransformResult, EngineError> {
        convert_block_to_attribute(&mut block.body, "cors", "cors");
        Ok(TransformResult::in_place(block))
    }

    fn transform_state(
        &self,
        _ctx: &mut TransformationContext,
        instance: &mut Value,
        _resource_path: &str,
        _resource_name: &str,
    ) -> Result<(), EngineError> {
        // State already stores a MaxItems=1 block as a one-element array;
        // collapse it to the bare object to mirror the config shape.
        if let Some(Value::Object(attrs)) = instance.get_mut("attributes") {
            if let Some(Value::Array(items)) = attrs.get("cors").cloned() {
                if let Some(first) = items.into_iter().next() {
                    attrs.insert("cors".to_string(), first);
                }
            }
        }
        Ok(())
    }
}
