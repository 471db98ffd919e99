use std::collections::HashMap;

use crate::error::EngineError;

/// Severity of a single diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One entry on a context's append-only diagnostics list.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub byte_offset: Option<usize>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            byte_offset: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            byte_offset: None,
        }
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.byte_offset = Some(offset);
        self
    }

    pub fn from_engine_error(err: &EngineError) -> Self {
        let severity = if err.is_fatal() {
            Severity::Error
        } else {
            Severity::Warning
        };
        Diagnostic {
            severity,
            message: err.to_string(),
            byte_offset: None,
        }
    }
}

/// An append-only diagnostics accumulator threaded through a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn push_error(&mut self, err: &EngineError) {
        self.push(Diagnostic::from_engine_error(err));
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn first_error(&self) -> Option<&Diagnostic> {
        self.0.iter().find(|d| d.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A resource-kind rename recorded in a context's metadata bag, consumed by
/// the format stage to emit a `moved` side-car block.
#[derive(Debug, Clone)]
pub struct ResourceRename {
    pub old_kind: String,
    pub new_kind: String,
    pub local_name: String,
}

/// The cross-stage communication bag described in spec §3. Typed as a small
/// enum rather than `Box<dyn Any>` since renames are the only documented
/// payload shape that crosses stage boundaries.
#[derive(Debug, Clone)]
pub enum MetadataValue {
    Text(String),
    Renames(Vec<ResourceRename>),
}

/// The value threaded through a pipeline: raw bytes in, serialized bytes
/// out, with a diagnostics trail and a metadata bag for stage-to-stage
/// signals. Created per file by the driver; never shared across threads.
pub struct TransformationContext {
    pub content: Vec<u8>,
    pub filename: String,
    pub source_version: u32,
    pub target_version: u32,
    pub hcl_body: Option<hcl_edit::structure::Body>,
    pub state_json: Option<String>,
    pub diagnostics: Diagnostics,
    pub metadata: HashMap<String, MetadataValue>,
    pub known_kinds: Vec<String>,
    pub output: Option<Vec<u8>>,
}

impl TransformationContext {
    pub fn new(
        content: Vec<u8>,
        filename: impl Into<String>,
        source_version: u32,
        target_version: u32,
        known_kinds: Vec<String>,
    ) -> Self {
        Self {
            content,
            filename: filename.into(),
            source_version,
            target_version,
            hcl_body: None,
            state_json: None,
            diagnostics: Diagnostics::default(),
            metadata: HashMap::new(),
            known_kinds,
            output: None,
        }
    }

    pub fn record_rename(&mut self, rename: ResourceRename) {
        match self.metadata.get_mut("renames") {
            Some(MetadataValue::Renames(renames)) => renames.push(rename),
            _ => {
                self.metadata
                    .insert("renames".to_string(), MetadataValue::Renames(vec![rename]));
            }
        }
    }

    pub fn renames(&self) -> &[ResourceRename] {
        match self.metadata.get("renames") {
            Some(MetadataValue::Renames(renames)) => renames.as_slice(),
            _ => &[],
        }
    }
}
