use thiserror::Error;

/// Fatal and advisory error conditions the engine can surface on the
/// diagnostics channel. Fatal variants are returned from a pipeline stage
/// and short-circuit the remaining stages; the rest accumulate as warnings
/// on the transformation context and never abort a run by themselves.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to parse configuration at byte {byte_offset}: {message}")]
    ParseError {
        byte_offset: usize,
        message: String,
    },

    #[error("failed to parse state JSON: {message}")]
    StateParseError { message: String },

    #[error("resource kind '{kind}' has no migrator registered for {source_version} -> {target_version}")]
    UnknownResourceKind {
        kind: String,
        source_version: u32,
        target_version: u32,
    },

    #[error(
        "duplicate migrator registration for ({kind}, {source_version}, {target_version}): already registered"
    )]
    DuplicateRegistration {
        kind: String,
        source_version: u32,
        target_version: u32,
    },

    #[error("migrator for '{kind}' failed: {message}")]
    TransformFailure { kind: String, message: String },

    #[error("rename {from} -> {to} conflicts with an existing block named '{to}'")]
    InvalidRename { from: String, to: String },
}

impl EngineError {
    /// Whether this error kind is fatal to the containing pipeline run, per
    /// the error taxonomy: parse failures, duplicate registration, and
    /// transform failures halt the file; unknown kinds and invalid renames
    /// are advisory only.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            EngineError::UnknownResourceKind { .. } | EngineError::InvalidRename { .. }
        )
    }
}
