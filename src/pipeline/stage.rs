//! The stage chain (spec §4.5): each stage mutates the context in place and
//! hands it to the next. Modeled as an ordered `Vec<Box<dyn Stage>>` run in
//! sequence rather than a literal linked list of `next` pointers — the
//! observable contract (strict declared order, short-circuit on the first
//! fatal error) is identical, and a `Vec` is the idiomatic way to express a
//! fixed, known-at-construction-time chain in Rust.

use crate::context::TransformationContext;
use crate::error::EngineError;
use crate::registry::Registry;

pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    fn run(&self, ctx: &mut TransformationContext, registry: &Registry) -> Result<(), EngineError>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Pipeline { stages }
    }

    /// Runs every stage in order. On the first fatal error, pushes it to
    /// the context's diagnostics and returns it immediately; subsequent
    /// stages do not run. Warnings raised by a stage do not halt the chain.
    pub fn run(
        &self,
        ctx: &mut TransformationContext,
        registry: &Registry,
    ) -> Result<(), EngineError> {
        for stage in &self.stages {
            if let Err(err) = stage.run(ctx, registry) {
                ctx.diagnostics.push_error(&err);
                if err.is_fatal() {
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}
