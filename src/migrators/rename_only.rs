//! A demonstration migrator exercising a pure attribute rename with no
//! kind change: `old_name` becomes `new_name` in both config and state.

use hcl_edit::structure::Block;
use serde_json::Value;

use crate::context::TransformationContext;
use crate::error::EngineError;
use crate::hcl::transform::rename_attribute;
use crate::json::state_ops::rename_field;
use crate::migrator::{MigratorStrategy, TransformResult};

pub struct WidgetRenameMigrator;

impl MigratorStrategy for WidgetRenameMigrator {
    fn can_handle(&self, kind: &str) -> bool {
        kind == "example_widget"
    }

    fn target_kind(&self) -> &str {
        "example_widget"
    }

    fn transform_config(
        &self,
        _ctx: &mut TransformationContext,
        mut block: Block,
    ) -> Result<TransformResult, EngineError> {
        rename_attribute(&mut block.body, "old_name", "new_name");
        Ok(TransformResult::in_place(block))
    }

    fn transform_state(
        &self,
        _ctx: &mut TransformationContext,
        instance: &mut Value,
        _resource_path: &str,
        _resource_name: &str,
    ) -> Result<(), EngineError> {
        rename_field(instance, "attributes", "old_name", "new_name");
        Ok(())
    }
}
