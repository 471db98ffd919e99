//! A demonstration migrator exercising a static kind rename: the
//! (old-kind, new-kind) pair is fixed and the pipeline itself emits the
//! `moved` side-car block from the strategy's `rename()` declaration.

use hcl_edit::structure::Block;
use serde_json::Value;

use crate::context::TransformationContext;
use crate::error::EngineError;
use crate::hcl::transform::rename_resource_kind;
use crate::json::state_ops::set_state_type_rename;
use crate::migrator::{MigratorStrategy, TransformResult};

const OLD_KIND: &str = "example_old_queue";
const NEW_KIND: &str = "example_new_queue";

pub struct OldQueueMigrator;

impl MigratorStrategy for OldQueueMigrator {
    fn can_handle(&self, kind: &str) -> bool {
        kind == OLD_KIND
    }

    fn target_kind(&self) -> &str {
        NEW_KIND
    }

    fn rename(&self) -> Option<(&str, &str)> {
        Some((OLD_KIND, NEW_KIND))
    }

    fn transform_config(
        &self,
        _ctx: &mut TransformationContext,
        mut block: Block,
    ) -> Result<TransformResult, EngineError> {
        rename_resource_kind(&mut block, NEW_KIND);
        Ok(TransformResult::split(vec![block]))
    }

    fn transform_state(
        &self,
        ctx: &mut TransformationContext,
        _instance: &mut Value,
        _resource_path: &str,
        resource_name: &str,
    ) -> Result<(), EngineError> {
        set_state_type_rename(ctx, resource_name, OLD_KIND, NEW_KIND);
        Ok(())
    }
}
