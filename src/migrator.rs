//! The per-resource migration strategy contract (spec §3, §4.4).

use hcl_edit::structure::Block;
use serde_json::Value;

use crate::context::TransformationContext;
use crate::error::EngineError;

/// Return value from a per-block config migrator call.
///
/// - `{1 block, remove_original: false}` — in-place edit.
/// - `{N blocks, remove_original: true}` — split into N blocks.
/// - `{0 blocks, remove_original: true}` — delete.
/// - `{N+1 blocks, remove_original: true}` where one is a side-car `moved`
///   block — rename with a state hint.
#[derive(Debug, Default)]
pub struct TransformResult {
    pub replacement_blocks: Vec<Block>,
    pub remove_original: bool,
}

impl TransformResult {
    /// The block was edited in place; it stays at its original position.
    pub fn in_place(block: Block) -> Self {
        TransformResult {
            replacement_blocks: vec![block],
            remove_original: false,
        }
    }

    /// The block is replaced by `blocks`, inserted contiguously at the
    /// original block's position.
    pub fn split(blocks: Vec<Block>) -> Self {
        TransformResult {
            replacement_blocks: blocks,
            remove_original: true,
        }
    }

    /// The block is removed with no replacement.
    pub fn delete() -> Self {
        TransformResult {
            replacement_blocks: Vec::new(),
            remove_original: true,
        }
    }

    /// A `split` result with one extra block (typically a `moved` side-car)
    /// appended at end of file rather than at the original position; the
    /// pipeline is responsible for separating the two on apply.
    pub fn with_moved_block(mut self, moved: Block) -> Self {
        self.replacement_blocks.push(moved);
        self
    }
}

/// Per-kind migration capability set (spec §3, §4.4).
pub trait MigratorStrategy: Send + Sync {
    /// Answers whether this strategy handles `kind` — some strategies
    /// handle both an old and a new name during the overlap window.
    fn can_handle(&self, kind: &str) -> bool;

    /// The kind name this migrator produces in output.
    fn target_kind(&self) -> &str;

    /// An (old-kind, new-kind) pair used by the pipeline to emit a `moved`
    /// side-car block, when this migrator renames its resource kind.
    fn rename(&self) -> Option<(&str, &str)> {
        None
    }

    /// A string-level rewrite applied before parsing. The default is a
    /// no-op; strategies override it only for edits the token-level editor
    /// cannot express cleanly (spec §4.4, §9).
    fn preprocess(&self, content: Vec<u8>) -> Result<Vec<u8>, EngineError> {
        Ok(content)
    }

    /// The per-block config rewrite. Takes the block by value so a simple
    /// in-place edit can mutate it and hand it straight back inside
    /// `TransformResult::in_place`.
    fn transform_config(
        &self,
        ctx: &mut TransformationContext,
        block: Block,
    ) -> Result<TransformResult, EngineError>;

    /// The per-instance state rewrite. `instance` is the "attributes" bag
    /// plus surrounding metadata (schema version, dependencies) for one
    /// resource instance; `resource_path` is its location in the state
    /// document's `resources` array (the dotted-path prefix), and
    /// `resource_name` is its local name.
    fn transform_state(
        &self,
        ctx: &mut TransformationContext,
        instance: &mut Value,
        resource_path: &str,
        resource_name: &str,
    ) -> Result<(), EngineError>;

    /// When `true`, the pipeline skips `transform_state` for this kind
    /// because the downstream provider performs the state upgrade at first
    /// apply. The config side still emits renames and `moved` blocks.
    fn uses_provider_state_upgrader(&self) -> bool {
        false
    }

    /// Names of `attributes` entries that are unordered sets rather than
    /// ordered lists. The format-state stage sorts these for determinism;
    /// every other array is left in input order.
    fn set_valued_attributes(&self) -> &[&str] {
        &[]
    }
}
