//! A tiny token-emitting builder for literal expressions.
//!
//! Per the design notes, object-literal construction never grows a typed
//! expression AST builder of its own: every helper here formats HCL source
//! text and re-parses it with `hcl-edit`'s own parser, so the tokens that
//! land in the tree are exactly the tokens a human author would have typed.

use hcl_edit::expr::Expression;

/// Parse a snippet of HCL expression syntax. Panics on malformed input,
/// since every caller in this module only ever feeds its own well-formed
/// output through here — a parse failure means a helper built malformed
/// syntax, which is a bug in the helper, not in caller input.
pub fn raw(expr_src: &str) -> Expression {
    expr_src
        .parse()
        .unwrap_or_else(|e| panic!("built invalid hcl expression {expr_src:?}: {e}"))
}

/// A string literal expression. Quotes and backslashes are escaped the same
/// way Rust's `"{:?}"` escapes them, which aligns with HCL's own
/// double-quote/backslash escaping for the common case. `${` and `%{` are
/// additionally escaped to `$${`/`%%{` first — left unescaped, either
/// sequence would make the re-parsed literal an interpolated template
/// instead of the plain string value the caller passed in.
pub fn string_lit(s: &str) -> Expression {
    let escaped = s.replace("${", "$${").replace("%{", "%%{");
    raw(&format!("{escaped:?}"))
}

pub fn bool_lit(b: bool) -> Expression {
    raw(if b { "true" } else { "false" })
}

pub fn int_lit(n: i64) -> Expression {
    raw(&n.to_string())
}

/// An empty object literal: `{}`.
pub fn empty_object() -> Expression {
    raw("{}")
}

/// An object literal built from ordered key/expression pairs, mirroring the
/// source's attribute order the way `build_object_from_block` requires.
pub fn object_literal(pairs: &[(&str, Expression)]) -> Expression {
    if pairs.is_empty() {
        return empty_object();
    }
    let body = pairs
        .iter()
        .map(|(k, v)| format!("{k} = {v}"))
        .collect::<Vec<_>>()
        .join("\n  ");
    raw(&format!("{{\n  {body}\n}}"))
}

/// A list literal built from already-built element expressions, preserving
/// the order given.
pub fn array_literal(items: impl IntoIterator<Item = Expression>) -> Expression {
    let body = items
        .into_iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    raw(&format!("[{body}]"))
}

/// A string-list literal, shorthand over `array_literal` for the common case.
pub fn string_array_literal<'a>(items: impl IntoIterator<Item = &'a str>) -> Expression {
    array_literal(items.into_iter().map(string_lit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcl::expr_ext;

    #[test]
    fn string_lit_escapes_interpolation_markers() {
        let expr = string_lit("${var.x}");
        assert!(matches!(expr, Expression::String(_)));
        assert_eq!(expr_ext::string_literal(&expr).unwrap(), "${var.x}");
    }

    #[test]
    fn string_lit_escapes_directive_markers() {
        let expr = string_lit("%{if true}yes%{endif}");
        assert!(matches!(expr, Expression::String(_)));
        assert_eq!(expr_ext::string_literal(&expr).unwrap(), "%{if true}yes%{endif}");
    }

    #[test]
    fn string_lit_round_trips_plain_values() {
        let expr = string_lit("a@x");
        assert_eq!(expr_ext::string_literal(&expr).unwrap(), "a@x");
    }
}
