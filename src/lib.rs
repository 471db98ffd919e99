pub mod context;
pub mod error;
pub mod hcl;
pub mod json;
pub mod migrator;
pub mod migrators;
pub mod pipeline;
pub mod registry;

pub use context::TransformationContext;
pub use error::EngineError;
pub use migrator::{MigratorStrategy, TransformResult};
pub use registry::Registry;
