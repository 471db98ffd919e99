//! A demonstration migrator exercising a conditional split: the source
//! kind becomes one of two target kinds depending on whether a
//! discriminator attribute (`policy_id`) is present and non-null.

use hcl_edit::structure::Block;
use serde_json::Value;

use crate::context::TransformationContext;
use crate::error::EngineError;
use crate::hcl::transform::{create_moved_block, rename_resource_kind};
use crate::hcl::{self, BodyExt};
use crate::json::state_ops::set_state_type_rename;
use crate::migrator::{MigratorStrategy, TransformResult};

const SOURCE_KIND: &str = "example_fallback_domain";
const CUSTOM_KIND: &str = "example_fallback_domain_custom";
const DEFAULT_KIND: &str = "example_fallback_domain_default";

pub struct FallbackDomainMigrator;

impl FallbackDomainMigrator {
    fn has_discriminator(body: &hcl::Body) -> bool {
        body.get_attribute("policy_id")
            .map(|a| a.value.to_string().trim() != "null")
            .unwrap_or(false)
    }
}

impl MigratorStrategy for FallbackDomainMigrator {
    fn can_handle(&self, kind: &str) -> bool {
        kind == SOURCE_KIND
    }

    fn target_kind(&self) -> &str {
        CUSTOM_KIND
    }

    fn transform_config(
        &self,
        _ctx: &mut TransformationContext,
        mut block: Block,
    ) -> Result<TransformResult, EngineError> {
        let local_name = hcl::block_local_name(&block).unwrap_or_default().to_string();
        let target = if Self::has_discriminator(&block.body) {
            CUSTOM_KIND
        } else {
            DEFAULT_KIND
        };
        rename_resource_kind(&mut block, target);

        let from = format!("{SOURCE_KIND}.{local_name}");
        let to = format!("{target}.{local_name}");
        let moved = create_moved_block(&from, &to);

        Ok(TransformResult::split(vec![block]).with_moved_block(moved))
    }

    fn transform_state(
        &self,
        ctx: &mut TransformationContext,
        instance: &mut Value,
        _resource_path: &str,
        resource_name: &str,
    ) -> Result<(), EngineError> {
        let has_discriminator = instance
            .get("attributes")
            .and_then(|a| a.get("policy_id"))
            .map(|v| !v.is_null())
            .unwrap_or(false);
        let target = if has_discriminator { CUSTOM_KIND } else { DEFAULT_KIND };
        set_state_type_rename(ctx, resource_name, SOURCE_KIND, target);
        if !has_discriminator {
            if let Some(attrs) = instance.get_mut("attributes").and_then(Value::as_object_mut) {
                attrs.remove("policy_id");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_to_default_when_discriminator_absent() {
        let body =
            hcl::parse(br#"resource "example_fallback_domain" "n" { account_id = "a" }"#).unwrap();
        let block = hcl::find_block_by_type(&body, "resource").unwrap().clone();
        let mut ctx = TransformationContext::new(Vec::new(), "t.tf", 1, 2, Vec::new());
        let result = FallbackDomainMigrator.transform_config(&mut ctx, block).unwrap();
        assert_eq!(result.replacement_blocks.len(), 2);
        assert!(result.replacement_blocks[0].to_string().contains(DEFAULT_KIND));
        assert_eq!(result.replacement_blocks[1].ident.as_str(), "moved");
    }

    #[test]
    fn splits_to_custom_when_discriminator_present() {
        let body = hcl::parse(
            br#"resource "example_fallback_domain" "n" { account_id = "a"; policy_id = "p" }"#,
        )
        .unwrap();
        let block = hcl::find_block_by_type(&body, "resource").unwrap().clone();
        let mut ctx = TransformationContext::new(Vec::new(), "t.tf", 1, 2, Vec::new());
        let result = FallbackDomainMigrator.transform_config(&mut ctx, block).unwrap();
        assert!(result.replacement_blocks[0].to_string().contains(CUSTOM_KIND));
    }
}
