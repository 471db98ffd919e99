//! Structural accessors over `hcl-edit` expressions, isolated here so the
//! transform helpers in [`super::transform`] stay free of `hcl-edit`'s
//! internal array/object wrapper types.

use hcl_edit::expr::{Expression, ObjectKey};

/// The elements of an array-literal expression, in source order, or `None`
/// if the expression isn't an array.
pub fn array_elements(expr: &Expression) -> Option<Vec<Expression>> {
    match expr {
        Expression::Array(arr) => Some(arr.iter().cloned().collect()),
        _ => None,
    }
}

/// The key/value pairs of an object-literal expression, in source order, or
/// `None` if the expression isn't an object.
pub fn object_entries(expr: &Expression) -> Option<Vec<(String, Expression)>> {
    match expr {
        Expression::Object(obj) => Some(
            obj.iter()
                .map(|(key, value)| (object_key_str(key), value.expr().clone()))
                .collect(),
        ),
        _ => None,
    }
}

pub fn object_key_str(key: &ObjectKey) -> String {
    match key {
        ObjectKey::Ident(id) => id.as_str().to_string(),
        ObjectKey::Expression(expr) => expr.to_string(),
    }
}

/// A string literal's value, or `None` if the expression isn't a plain
/// string (a template with interpolation markers does not count).
pub fn string_literal(expr: &Expression) -> Option<String> {
    match expr {
        Expression::String(s) => Some(s.as_str().to_string()),
        _ => None,
    }
}

pub fn bool_literal(expr: &Expression) -> Option<bool> {
    match expr {
        Expression::Bool(b) => Some(*b.value()),
        _ => None,
    }
}

/// The function name and arguments of a function-call expression, or `None`.
pub fn func_call(expr: &Expression) -> Option<(String, Vec<Expression>)> {
    match expr {
        Expression::FuncCall(call) => Some((
            call.name.name.as_str().to_string(),
            call.args.iter().cloned().collect(),
        )),
        _ => None,
    }
}
