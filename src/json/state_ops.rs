//! State edit primitives (spec §4.4 "state edit primitives"), layered on
//! the path mutator in [`super::path`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use super::path::{delete, get, set, JsonPath};
use crate::context::{ResourceRename, TransformationContext};

/// Moves a value from `old` to `new` under `base_path`, deleting the old
/// key. A no-op when `old` is absent.
pub fn rename_field(instance: &mut Value, base_path: &str, old: &str, new: &str) -> bool {
    let old_path = JsonPath::parse(base_path).join(old);
    let Some(value) = get(instance, &old_path).cloned() else {
        return false;
    };
    let new_path = JsonPath::parse(base_path).join(new);
    set(instance, &new_path, value);
    delete(instance, &old_path);
    true
}

/// Removes each of `names` under `base_path` if present; returns the count
/// actually removed.
pub fn remove_fields_if_exist(instance: &mut Value, base_path: &str, names: &[&str]) -> usize {
    names
        .iter()
        .filter(|name| delete(instance, &JsonPath::parse(base_path).join(**name)))
        .count()
}

/// Sets the instance's `schema_version` field.
pub fn set_schema_version(instance: &mut Value, version: u32) {
    set(instance, &JsonPath::parse("schema_version"), Value::from(version));
}

/// Sets `base_path.name = default` iff absent.
pub fn ensure_field(instance: &mut Value, base_path: &str, name: &str, default: Value) -> bool {
    let path = JsonPath::parse(base_path).join(name);
    if get(instance, &path).is_some() {
        return false;
    }
    set(instance, &path, default);
    true
}

/// Canonicalizes a Go-style duration string (`"30s"`, `"5m"`, `"1h30m"`) to
/// total seconds as a string, so a provider-supplied default like `"30s"`
/// does not diff against a re-rendered `"30s0ms"`. Unparseable input is
/// returned unchanged.
pub fn normalize_duration(raw: &str) -> String {
    let mut total_seconds: f64 = 0.0;
    let mut number = String::new();
    let mut any_unit_parsed = false;

    for ch in raw.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            number.push(ch);
            continue;
        }
        let Ok(value) = number.parse::<f64>() else {
            return raw.to_string();
        };
        let multiplier = match ch {
            'h' => 3600.0,
            'm' => 60.0,
            's' => 1.0,
            _ => return raw.to_string(),
        };
        total_seconds += value * multiplier;
        number.clear();
        any_unit_parsed = true;
    }

    if !number.is_empty() || !any_unit_parsed {
        return raw.to_string();
    }

    if total_seconds.fract() == 0.0 {
        format!("{}s", total_seconds as i64)
    } else {
        format!("{total_seconds}s")
    }
}

/// Canonicalizes an RFC3339 timestamp to UTC (`+00:00`, any sub-second
/// fraction preserved), so a provider default's timezone does not produce a
/// spurious diff. Unparseable input is returned unchanged.
pub fn normalize_rfc3339(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).to_rfc3339();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).to_rfc3339();
    }
    raw.to_string()
}

/// Deep-equal-to-template check: `true` when every leaf of `value` matches
/// the corresponding leaf of `template` or is null/zero where the template
/// allows it. Used to elide objects whose leaves are all null/zero.
pub fn is_empty_structure(value: &Value, template: &Value) -> bool {
    match (value, template) {
        (Value::Null, _) => true,
        (Value::Bool(v), _) => !*v,
        (Value::Number(n), _) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        (Value::String(s), _) => s.is_empty(),
        (Value::Array(items), _) => items.iter().all(|v| is_empty_structure(v, &Value::Null)),
        (Value::Object(map), Value::Object(template_map)) => map.iter().all(|(k, v)| {
            let sub_template = template_map.get(k).unwrap_or(&Value::Null);
            is_empty_structure(v, sub_template)
        }),
        (Value::Object(map), _) => map.values().all(|v| is_empty_structure(v, &Value::Null)),
    }
}

/// Records a resource-kind rename in the transformation context's metadata
/// for the format stage to emit as a `moved` block (spec §4.5, §9).
pub fn set_state_type_rename(
    ctx: &mut TransformationContext,
    resource_name: &str,
    old_kind: &str,
    new_kind: &str,
) {
    ctx.record_rename(ResourceRename {
        old_kind: old_kind.to_string(),
        new_kind: new_kind.to_string(),
        local_name: resource_name.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rename_field_moves_value_and_deletes_old() {
        let mut instance = json!({"attributes": {"old_name": "v"}});
        assert!(rename_field(&mut instance, "attributes", "old_name", "new_name"));
        assert_eq!(instance, json!({"attributes": {"new_name": "v"}}));
    }

    #[test]
    fn rename_field_absent_is_noop() {
        let mut instance = json!({"attributes": {}});
        assert!(!rename_field(&mut instance, "attributes", "missing", "new_name"));
    }

    #[test]
    fn remove_fields_if_exist_counts_removed() {
        let mut instance = json!({"attributes": {"a": 1, "b": 2}});
        let removed = remove_fields_if_exist(&mut instance, "attributes", &["a", "missing"]);
        assert_eq!(removed, 1);
        assert_eq!(instance, json!({"attributes": {"b": 2}}));
    }

    #[test]
    fn schema_version_is_set() {
        let mut instance = json!({});
        set_schema_version(&mut instance, 3);
        assert_eq!(instance, json!({"schema_version": 3}));
    }

    #[test]
    fn normalize_duration_sums_units() {
        assert_eq!(normalize_duration("1h30m"), "5400s");
        assert_eq!(normalize_duration("30s"), "30s");
        assert_eq!(normalize_duration("not-a-duration"), "not-a-duration");
    }

    #[test]
    fn ensure_field_sets_default_only_when_absent() {
        let mut instance = json!({"attributes": {"ttl": 60}});
        assert!(!ensure_field(&mut instance, "attributes", "ttl", json!(300)));
        assert_eq!(instance["attributes"]["ttl"], json!(60));
        assert!(ensure_field(&mut instance, "attributes", "priority", json!(1)));
        assert_eq!(instance["attributes"]["priority"], json!(1));
    }

    #[test]
    fn normalize_rfc3339_canonicalizes_timezone() {
        let normalized = normalize_rfc3339("2024-01-01T00:00:00-05:00");
        assert!(normalized.starts_with("2024-01-01T05:00:00"));
        assert_eq!(normalize_rfc3339("not-a-timestamp"), "not-a-timestamp");
    }

    #[test]
    fn is_empty_structure_detects_all_zero_leaves() {
        let template = json!({"a": 0, "b": ""});
        assert!(is_empty_structure(&json!({"a": 0, "b": ""}), &template));
        assert!(!is_empty_structure(&json!({"a": 1, "b": ""}), &template));
    }
}
