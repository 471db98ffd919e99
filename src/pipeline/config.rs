//! The config pipeline (spec §4.5): preprocess -> parse -> transform -> format.

use std::collections::HashSet;

use hcl_edit::structure::{Body, Structure};

use crate::context::{Diagnostic, TransformationContext};
use crate::error::EngineError;
use crate::hcl;
use crate::registry::Registry;

use super::stage::{Pipeline, Stage};

pub fn config_pipeline() -> Pipeline {
    Pipeline::new(vec![
        Box::new(PreprocessStage),
        Box::new(ParseStage),
        Box::new(TransformStage),
        Box::new(FormatStage),
    ])
}

/// Applies every registered strategy's `preprocess` to the content bytes,
/// in registry insertion order, so later strategies observe earlier
/// rewrites (spec §4.5, §5).
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

struct ParseStage;

impl Stage for ParseStage {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn run(&self, ctx: &mut TransformationContext, _registry: &Registry) -> Result<(), EngineError> {
        let body = hcl::parse(&ctx.content)?;
        ctx.hcl_body = Some(body);
        Ok(())
    }
}

/// Walks top-level blocks; for each `resource` block, looks up a strategy
/// by kind and (source, target), applies its `transform_config`, and
/// applies the returned `TransformResult` — in-place edits stay at their
/// original position, splits/deletes replace the original position with
/// zero or more blocks (preserving the order of unrelated top-level
/// items), and any declared rename produces a `moved` block appended at
/// end of file.
struct TransformStage;

impl Stage for TransformStage {
    fn name(&self) -> &'static str {
        "transform"
    }

    fn run(&self, ctx: &mut TransformationContext, registry: &Registry) -> Result<(), EngineError> {
        let body = ctx
            .hcl_body
            .take()
            .expect("parse stage must run before transform");

        // Snapshot (kind, local_name) of every resource/data block present in
        // the input, so a declared rename can be checked against blocks that
        // already occupy the target address — including ones later in the
        // file, which `new_body` has not been built up to yet.
        let existing_blocks: HashSet<(String, String)> = body
            .iter()
            .filter_map(|s| match s {
                Structure::Block(b) if b.ident.as_str() == "resource" || b.ident.as_str() == "data" => {
                    Some((hcl::block_kind(b)?.to_string(), hcl::block_local_name(b)?.to_string()))
                }
                _ => None,
            })
            .collect();

        let mut new_body = Body::new();
        let mut moved_blocks = Vec::new();

        for structure in body.into_iter() {
            let Structure::Block(block) = structure else {
                new_body.push(structure);
                continue;
            };

            if block.ident.as_str() != "resource" {
                new_body.push(Structure::Block(block));
                continue;
            }

            let Some(kind) = hcl::block_kind(&block).map(str::to_string) else {
                new_body.push(Structure::Block(block));
                continue;
            };
            let local_name = hcl::block_local_name(&block).unwrap_or_default().to_string();

            let Some(strategy) =
                registry.lookup(&kind, ctx.source_version, ctx.target_version)
            else {
                ctx.diagnostics.push(Diagnostic::warning(format!(
                    "no migrator registered for resource kind '{kind}' ({} -> {})",
                    ctx.source_version, ctx.target_version
                )));
                new_body.push(Structure::Block(block));
                continue;
            };

            let result = strategy.transform_config(ctx, block)?;

            for replacement in result.replacement_blocks {
                if replacement.ident.as_str() == "moved" {
                    moved_blocks.push(replacement);
                } else {
                    new_body.push(Structure::Block(replacement));
                }
            }

            if let Some((old_kind, new_kind)) = strategy.rename() {
                let from = format!("{old_kind}.{local_name}");
                let to = format!("{new_kind}.{local_name}");
                if existing_blocks.contains(&(new_kind.to_string(), local_name.clone())) {
                    ctx.diagnostics
                        .push_error(&EngineError::InvalidRename { from: from.clone(), to: to.clone() });
                }
                moved_blocks.push(hcl::transform::create_moved_block(&from, &to));
            }
        }

        for moved in moved_blocks {
            new_body.push(Structure::Block(moved));
        }

        ctx.hcl_body = Some(new_body);
        Ok(())
    }
}

/// Normalizes whitespace on the serialized output: realigns attribute
/// equals signs, collapses blank-line runs, ensures a single trailing
/// newline.
struct FormatStage;

impl Stage for FormatStage {
    fn name(&self) -> &'static str {
        "format"
    }

    fn run(&self, ctx: &mut TransformationContext, _registry: &Registry) -> Result<(), EngineError> {
        let body = ctx
            .hcl_body
            .as_ref()
            .expect("transform stage must run before format");
        let serialized = hcl::serialize(body);
        let text = String::from_utf8_lossy(&serialized);
        let formatted = hcl::format::format_source(&text);
        ctx.output = Some(formatted.into_bytes());
        Ok(())
    }
}
