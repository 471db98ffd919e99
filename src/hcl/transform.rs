//! The HCL transform helpers (spec §4.4 "edit primitives"): the small
//! domain-specific vocabulary migrators compose instead of hand-editing
//! tokens.

use hcl_edit::expr::Expression;
use hcl_edit::structure::{Attribute, Block, BlockLabel, Body};
use hcl_edit::Ident;

use super::body_ext::BodyExt;
use super::build;
use super::expr_ext;

/// The meta-arguments `hcl-edit` must carry across a rename or a split,
/// copied onto every replacement resource block but never onto an emitted
/// `moved` block.
pub const META_ARGUMENTS: &[&str] = &[
    "count",
    "for_each",
    "depends_on",
    "provider",
    "lifecycle",
    "timeouts",
];

/// Rewrites a block's first label (its resource kind) in place.
pub fn rename_resource_kind(block: &mut Block, new_kind: &str) {
    if let Some(label) = block.labels.first_mut() {
        *label = BlockLabel::String(new_kind.to_string().into());
    }
}

/// Sets `name = default` iff the attribute is absent.
pub fn ensure_attribute(body: &mut Body, name: &str, default: Expression) {
    if !body.has_attribute(name) {
        body.set_attribute(name, default);
    }
}

/// Removes a set of attributes by name; absent names are no-ops.
pub fn remove_attributes(body: &mut Body, names: &[&str]) {
    for name in names {
        body.remove_attribute(name);
    }
}

/// Renames an attribute, preserving its expression tokens exactly.
pub fn rename_attribute(body: &mut Body, old: &str, new: &str) -> bool {
    match body.remove_attribute(old) {
        Some(attr) => {
            body.push(Attribute::new(Ident::new(new), attr.value.clone()));
            true
        }
        None => false,
    }
}

/// Extracts the meta-arguments present on `source` as a list of attributes
/// to copy verbatim onto one or more replacement blocks.
pub fn extract_meta_arguments(source: &Body) -> Vec<Attribute> {
    META_ARGUMENTS
        .iter()
        .filter_map(|name| source.get_attribute(name).cloned())
        .collect()
}

/// Copies previously-extracted meta-arguments onto a replacement block's
/// body, skipping any that already exist there.
pub fn copy_meta_arguments(target: &mut Body, meta: &[Attribute]) {
    for attr in meta {
        if !target.has_attribute(attr.key.as_str()) {
            target.push(attr.clone());
        }
    }
}

/// A `MaxItems=1` nested block becomes an object attribute:
/// `foo { a = 1 }` -> `foo = { a = 1 }`.
///
/// Returns `false` if no block of `block_type` was present.
pub fn convert_block_to_attribute(body: &mut Body, block_type: &str, target_attr_name: &str) -> bool {
    let mut blocks = body.remove_blocks_of_type(block_type);
    let Some(block) = blocks.pop() else {
        return false;
    };
    let object = build_object_from_block(&block);
    body.set_attribute(target_attr_name, object);
    true
}

/// N nested blocks of the same type become one list attribute of object
/// literals, in their original declaration order.
pub fn convert_blocks_to_attribute_list(body: &mut Body, block_type: &str) -> bool {
    let blocks = body.remove_blocks_of_type(block_type);
    if blocks.is_empty() {
        return false;
    }
    let objects = blocks.iter().map(build_object_from_block);
    body.set_attribute(block_type, build::array_literal(objects));
    true
}

/// Each element of a list attribute becomes an object, built by
/// `build_object_fn(element, zero_based_index)`.
pub fn convert_array_attribute_to_object_array(
    body: &mut Body,
    attr: &str,
    build_object_fn: impl Fn(&Expression, usize) -> Expression,
) -> bool {
    let Some(existing) = body.get_attribute(attr).map(|a| a.value.clone()) else {
        return false;
    };
    let Some(elements) = expr_ext::array_elements(&existing) else {
        return false;
    };
    let objects = elements
        .iter()
        .enumerate()
        .map(|(i, e)| build_object_fn(e, i));
    body.set_attribute(attr, build::array_literal(objects));
    true
}

/// Each key/value pair of a map (object-literal) attribute becomes
/// `{ k_field = key, v_field = value }`.
pub fn convert_map_attribute_to_object_array(
    body: &mut Body,
    attr: &str,
    build_object_fn: impl Fn(&str, &Expression) -> Expression,
) -> bool {
    let Some(existing) = body.get_attribute(attr).map(|a| a.value.clone()) else {
        return false;
    };
    let Some(entries) = expr_ext::object_entries(&existing) else {
        return false;
    };
    let objects = entries.iter().map(|(k, v)| build_object_fn(k, v));
    body.set_attribute(attr, build::array_literal(objects));
    true
}

/// `toset([...])` -> `[...]`: unwraps a single-argument function call,
/// keeping its argument's tokens untouched.
pub fn remove_function_wrapper(body: &mut Body, attr: &str, function_name: &str) -> bool {
    let Some(existing) = body.get_attribute(attr).map(|a| a.value.clone()) else {
        return false;
    };
    let Some((name, mut args)) = expr_ext::func_call(&existing) else {
        return false;
    };
    if name != function_name || args.len() != 1 {
        return false;
    }
    body.set_attribute(attr, args.remove(0));
    true
}

/// A stable sort over a string-array attribute, with an optional
/// domain-specific comparator; defaults to lexical order.
pub fn sort_string_array_attribute(
    body: &mut Body,
    attr: &str,
    comparator: Option<&dyn Fn(&str, &str) -> std::cmp::Ordering>,
) -> bool {
    let Some(existing) = body.get_attribute(attr).map(|a| a.value.clone()) else {
        return false;
    };
    let Some(elements) = expr_ext::array_elements(&existing) else {
        return false;
    };
    let mut items: Vec<(String, Expression)> = elements
        .into_iter()
        .map(|e| (expr_ext::string_literal(&e).unwrap_or_default(), e))
        .collect();
    match comparator {
        Some(cmp) => items.sort_by(|(a, _), (b, _)| cmp(a, b)),
        None => items.sort_by(|(a, _), (b, _)| a.cmp(b)),
    }
    body.set_attribute(attr, build::array_literal(items.into_iter().map(|(_, e)| e)));
    true
}

/// Returns tokens for an object literal whose entries mirror a block's
/// attributes and nested blocks, recursively.
pub fn build_object_from_block(block: &Block) -> Expression {
    let mut pairs: Vec<(String, Expression)> = Vec::new();
    for structure in block.body.iter() {
        match structure {
            hcl_edit::structure::Structure::Attribute(attr) => {
                pairs.push((attr.key.as_str().to_string(), attr.value.clone()));
            }
            hcl_edit::structure::Structure::Block(inner) => {
                pairs.push((inner.ident.as_str().to_string(), build_object_from_block(inner)));
            }
        }
    }
    let refs: Vec<(&str, Expression)> = pairs.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
    build::object_literal(&refs)
}

/// Produces a top-level `moved { from = X; to = Y }` block.
pub fn create_moved_block(from: &str, to: &str) -> Block {
    let mut block = Block::new(Ident::new("moved"));
    block
        .body
        .push(Attribute::new(Ident::new("from"), build::raw(from)));
    block
        .body
        .push(Attribute::new(Ident::new("to"), build::raw(to)));
    block
}
