//! The state pipeline (spec §4.5): preprocess -> transform-state -> format-state.

use serde_json::Value;

use crate::context::{Diagnostic, TransformationContext};
use crate::error::EngineError;
use crate::registry::Registry;

use super::stage::{Pipeline, Stage};

pub fn state_pipeline() -> Pipeline {
    Pipeline::new(vec![
        Box::new(PreprocessStage),
        Box::new(TransformStateStage),
        Box::new(FormatStateStage),
    ])
}

/// Applies every registered strategy's `preprocess` to the raw state bytes,
/// mirroring the config pipeline's preprocess stage.
struct PreprocessStage;

impl Stage for PreprocessStage {
    fn name(&self) -> &'static str {
        "preprocess"
    }

    fn run(&self, ctx: &mut TransformationContext, registry: &Registry) -> Result<(), EngineError> {
        let strategies = registry.list(ctx.source_version, ctx.target_version, None);
        let mut content = std::mem::take(&mut ctx.content);
        for strategy in &strategies {
            content = strategy.preprocess(content)?;
        }
        ctx.content = content;
        Ok(())
    }
}

/// Walks `resources[*].instances[*]`. For each instance, resolves a
/// strategy by the resource's `type` and (source, target); if found and
/// the strategy does not declare `uses_provider_state_upgrader`, invokes
/// `transform_state` and stamps the invariant schema-version on the
/// instance. Resource-kind renames a strategy records via
/// `set_state_type_rename` are applied to the enclosing resource's `type`
/// field once all of its instances have been processed.
struct TransformStateStage;

impl Stage for TransformStateStage {
    fn name(&self) -> &'static str {
        "transform-state"
    }

    fn run(&self, ctx: &mut TransformationContext, registry: &Registry) -> Result<(), EngineError> {
        let text = std::str::from_utf8(&ctx.content).map_err(|e| EngineError::StateParseError {
            message: format!("invalid utf-8: {e}"),
        })?;
        let mut doc: Value = serde_json::from_str(text).map_err(|e| EngineError::StateParseError {
            message: e.to_string(),
        })?;

        let Some(resources) = doc.get_mut("resources").and_then(Value::as_array_mut) else {
            ctx.state_json = Some(doc.to_string());
            return Ok(());
        };

        for (resource_index, resource) in resources.iter_mut().enumerate() {
            let kind = resource
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let resource_name = resource
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            let Some(strategy) = registry.lookup(&kind, ctx.source_version, ctx.target_version) else {
                ctx.diagnostics.push(Diagnostic::warning(format!(
                    "no migrator registered for resource kind '{kind}' ({} -> {})",
                    ctx.source_version, ctx.target_version
                )));
                continue;
            };

            if !strategy.uses_provider_state_upgrader() {
                let Some(instances) = resource.get_mut("instances").and_then(Value::as_array_mut)
                else {
                    continue;
                };
                for (instance_index, instance) in instances.iter_mut().enumerate() {
                    let resource_path = format!("resources.{resource_index}.instances.{instance_index}");
                    strategy.transform_state(ctx, instance, &resource_path, &resource_name)?;
                    crate::json::set(
                        instance,
                        &crate::json::JsonPath::parse("schema_version"),
                        Value::from(ctx.target_version),
                    );
                }
            }

            if let Some(rename) = ctx
                .renames()
                .iter()
                .find(|r| r.local_name == resource_name && r.old_kind == kind)
            {
                resource["type"] = Value::String(rename.new_kind.clone());
            }
        }

        ctx.state_json = Some(doc.to_string());
        Ok(())
    }
}

/// Re-indents the state JSON with two-space indentation and sorts the
/// elements of any attribute a matched strategy declares as a set.
/// Arrays of objects, and anything not declared a set, preserve order.
struct FormatStateStage;

impl Stage for FormatStateStage {
    fn name(&self) -> &'static str {
        "format-state"
    }

    fn run(&self, ctx: &mut TransformationContext, registry: &Registry) -> Result<(), EngineError> {
        let text = ctx
            .state_json
            .as_ref()
            .expect("transform-state stage must run before format-state");
        let mut doc: Value = serde_json::from_str(text).map_err(|e| EngineError::StateParseError {
            message: e.to_string(),
        })?;

        if let Some(resources) = doc.get_mut("resources").and_then(Value::as_array_mut) {
            for resource in resources.iter_mut() {
                let kind = resource
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let Some(strategy) = registry.lookup(&kind, ctx.source_version, ctx.target_version)
                else {
                    continue;
                };
                let set_attrs = strategy.set_valued_attributes();
                if set_attrs.is_empty() {
                    continue;
                }
                if let Some(instances) = resource.get_mut("instances").and_then(Value::as_array_mut) {
                    for instance in instances.iter_mut() {
                        if let Some(attributes) = instance.get_mut("attributes") {
                            for attr in set_attrs {
                                if let Some(Value::Array(items)) = attributes.get_mut(*attr) {
                                    items.sort_by_key(|v| v.to_string());
                                }
                            }
                        }
                    }
                }
            }
        }

        let formatted = serde_json::to_string_pretty(&doc).map_err(|e| EngineError::StateParseError {
            message: e.to_string(),
        })?;
        ctx.output = Some(format!("{formatted}\n").into_bytes());
        Ok(())
    }
}
