//! The JSON path mutator (spec §4.2) and the state edit primitives built on
//! top of it (spec §4.4 "state edit primitives").
//!
//! Path-based mutation rather than a full AST/DOM: state documents are
//! large and nearly all migrator edits are localized, so addressing a value
//! by a dotted path and rewriting just that subtree keeps diffs small and
//! keeps this module independent of any particular JSON editing crate —
//! `serde_json::Value`, already part of the stack, is all it needs.

pub mod path;
pub mod state_ops;

pub use path::{delete, get, set, set_raw, JsonPath};
