//! A demonstration migrator exercising selector explosion: a single
//! `include { email = [...], everyone = true }` block becomes an
//! `include = [...]` list attribute with one element per selector value.

use hcl_edit::structure::Block;
use serde_json::Value;

use crate::context::TransformationContext;
use crate::error::EngineError;
use crate::hcl::{self, build, expr_ext, BodyExt};
use crate::migrator::{MigratorStrategy, TransformResult};

pub struct AccessRuleMigrator;

impl MigratorStrategy for AccessRuleMigrator {
    fn can_handle(&self, kind: &str) -> bool {
        kind == "example_access_rule"
    }

    fn target_kind(&self) -> &str {
        "example_access_rule"
    }

    fn transform_config(
        &self,
        _ctx: &mut TransformationContext,
        mut block: Block,
    ) -> Result<TransformResult, EngineError> {
        let mut includes = block.body.remove_blocks_of_type("include");
        if let Some(include) = includes.pop() {
            let mut elements = Vec::new();

            if let Some(emails) = include
                .body
                .get_attribute("email")
                .and_then(|a| expr_ext::array_elements(&a.value))
            {
                for email in &emails {
                    let Some(value) = expr_ext::string_literal(email) else {
                        continue;
                    };
                    let inner = build::object_literal(&[("email", build::string_lit(&value))]);
                    elements.push(build::object_literal(&[("email", inner)]));
                }
            }

            if include
                .body
                .get_attribute("everyone")
                .and_then(|a| expr_ext::bool_literal(&a.value))
                .unwrap_or(false)
            {
                elements.push(build::object_literal(&[("everyone", build::empty_object())]));
            }

            block.body.set_attribute("include", build::array_literal(elements));
        }
        Ok(TransformResult::in_place(block))
    }

    fn transform_state(
        &self,
        _ctx: &mut TransformationContext,
        instance: &mut Value,
        _resource_path: &str,
        _resource_name: &str,
    ) -> Result<(), EngineError> {
        let Some(attrs) = instance.get_mut("attributes").and_then(Value::as_object_mut) else {
            return Ok(());
        };
        let Some(include) = attrs.get("include").cloned() else {
            return Ok(());
        };
        let mut exploded = Vec::new();
        if let Some(emails) = include.get("email").and_then(Value::as_array) {
            for email in emails {
                if let Some(s) = email.as_str() {
                    exploded.push(serde_json::json!({"email": {"email": s}}));
                }
            }
        }
        if include.get("everyone").and_then(Value::as_bool).unwrap_or(false) {
            exploded.push(serde_json::json!({"everyone": {}}));
        }
        attrs.insert("include".to_string(), Value::Array(exploded));
        Ok(())
    }
}
