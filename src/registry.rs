//! The migrator registry (spec §4.3): a process-wide, write-once-then-read
//! mapping from (kind, source-version, target-version) to a strategy.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::EngineError;
use crate::migrator::MigratorStrategy;

type Key = (String, u32, u32);

/// Built once during an explicit init phase (spec §5, §9) and treated as
/// read-only for the lifetime of every pipeline run that follows.
#[derive(Default)]
pub struct Registry {
    strategies: HashMap<Key, Arc<dyn MigratorStrategy>>,
    insertion_order: Vec<Key>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a strategy for (kind, source, target). Returns a fatal
    /// `DuplicateRegistration` error if the triple is already taken —
    /// per spec §9, a double registration is a hard error, never a silent
    /// last-wins replacement.
    pub fn register(
        &mut self,
        kind: &str,
        source: u32,
        target: u32,
        strategy: Arc<dyn MigratorStrategy>,
    ) -> Result<(), EngineError> {
        let key = (kind.to_string(), source, target);
        if self.strategies.contains_key(&key) {
            return Err(EngineError::DuplicateRegistration {
                kind: kind.to_string(),
                source_version: source,
                target_version: target,
            });
        }
        self.insertion_order.push(key.clone());
        self.strategies.insert(key, strategy);
        Ok(())
    }

    /// Resolves a strategy for the exact (kind, source, target) triple.
    pub fn lookup(&self, kind: &str, source: u32, target: u32) -> Option<Arc<dyn MigratorStrategy>> {
        self.strategies
            .get(&(kind.to_string(), source, target))
            .cloned()
    }

    /// All strategies applicable to (source, target), optionally filtered
    /// by kind, in stable insertion order — deterministic for the
    /// preprocess stage's "apply every registered strategy's preprocess in
    /// registry order" contract (spec §4.5).
    pub fn list(
        &self,
        source: u32,
        target: u32,
        kinds: Option<&[&str]>,
    ) -> Vec<Arc<dyn MigratorStrategy>> {
        self.insertion_order
            .iter()
            .filter(|(_, s, t)| *s == source && *t == target)
            .filter(|(kind, _, _)| kinds.map(|ks| ks.contains(&kind.as_str())).unwrap_or(true))
            .filter_map(|key| self.strategies.get(key).cloned())
            .collect()
    }

    /// Every resource kind with at least one registered strategy.
    pub fn known_kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self
            .insertion_order
            .iter()
            .map(|(kind, _, _)| kind.clone())
            .collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hcl_edit::structure::Block;
    use serde_json::Value;

    struct NoopMigrator;

    impl MigratorStrategy for NoopMigrator {
        fn can_handle(&self, kind: &str) -> bool {
            kind == "example_widget"
        }

        fn target_kind(&self) -> &str {
            "example_widget"
        }

        fn transform_config(
            &self,
            _ctx: &mut crate::context::TransformationContext,
            block: Block,
        ) -> Result<crate::migrator::TransformResult, EngineError> {
            Ok(crate::migrator::TransformResult::in_place(block))
        }

        fn transform_state(
            &self,
            _ctx: &mut crate::context::TransformationContext,
            _instance: &mut Value,
            _resource_path: &str,
            _resource_name: &str,
        ) -> Result<(), EngineError> {
            Ok(())
        }
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = Registry::new();
        registry
            .register("example_widget", 1, 2, Arc::new(NoopMigrator))
            .unwrap();
        let err = registry
            .register("example_widget", 1, 2, Arc::new(NoopMigrator))
            .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateRegistration { .. }));
    }

    #[test]
    fn lookup_and_list_round_trip() {
        let mut registry = Registry::new();
        registry
            .register("example_widget", 1, 2, Arc::new(NoopMigrator))
            .unwrap();
        assert!(registry.lookup("example_widget", 1, 2).is_some());
        assert!(registry.lookup("example_widget", 1, 3).is_none());
        assert_eq!(registry.list(1, 2, None).len(), 1);
        assert_eq!(registry.list(1, 2, Some(&["other_kind"])).len(), 0);
        assert_eq!(registry.known_kinds(), vec!["example_widget".to_string()]);
    }
}
