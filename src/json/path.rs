//! Dotted-path addressing over a `serde_json::Value`. A path segment is
//! either an object key or, when it parses as an integer, an array index.
//! `get`/`set`/`delete` never evaluate JSON Pointer escaping — provider
//! attribute names in practice never contain a literal `.`, which keeps a
//! plain split-on-`.` scheme sufficient for this domain.

use serde_json::Value;

/// A parsed dotted path, split once at construction and reused for repeated
/// get/set calls against the same document.
#[derive(Debug, Clone)]
pub struct JsonPath(Vec<String>);

impl JsonPath {
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            JsonPath(Vec::new())
        } else {
            JsonPath(path.split('.').map(str::to_string).collect())
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        JsonPath(segments)
    }
}

impl From<&str> for JsonPath {
    fn from(path: &str) -> Self {
        JsonPath::parse(path)
    }
}

/// Reads the value at `path`, or `None` if any intermediate segment is
/// absent or of the wrong shape ("absent" per spec §4.2).
pub fn get<'a>(value: &'a Value, path: &JsonPath) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.segments() {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Writes `new_value` at `path`, creating missing intermediate objects and
/// appending when a numeric segment points past the end of an array.
pub fn set(value: &mut Value, path: &JsonPath, new_value: Value) {
    set_at(value, path.segments(), new_value);
}

fn set_at(value: &mut Value, segments: &[String], new_value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        *value = new_value;
        return;
    };

    if let Ok(index) = segment.parse::<usize>() {
        if !value.is_array() {
            *value = Value::Array(Vec::new());
        }
        let arr = value.as_array_mut().expect("just coerced to array");
        if index >= arr.len() {
            arr.resize(index + 1, Value::Null);
        }
        set_at(&mut arr[index], rest, new_value);
        return;
    }

    if !value.is_object() {
        *value = Value::Object(serde_json::Map::new());
    }
    let map = value.as_object_mut().expect("just coerced to object");
    let entry = map.entry(segment.clone()).or_insert(Value::Null);
    set_at(entry, rest, new_value);
}

/// Writes a pre-serialized JSON fragment at `path`, preserving the
/// fragment's own formatting decisions (key order as parsed) by round-
/// tripping it through `serde_json::from_str` before insertion — the state
/// document as a whole still re-serializes through the shared `Value` tree,
/// but the fragment's structure is not otherwise touched.
pub fn set_raw(value: &mut Value, path: &JsonPath, raw_json: &str) -> serde_json::Result<()> {
    let parsed: Value = serde_json::from_str(raw_json)?;
    set(value, path, parsed);
    Ok(())
}

/// Removes a key or array element, renumbering following array elements.
pub fn delete(value: &mut Value, path: &JsonPath) -> bool {
    let segments = path.segments();
    let Some((last, parent_segments)) = segments.split_last() else {
        return false;
    };

    let mut current = value;
    for segment in parent_segments {
        current = match current {
            Value::Object(map) => match map.get_mut(segment) {
                Some(v) => v,
                None => return false,
            },
            Value::Array(arr) => match segment.parse::<usize>().ok().and_then(|i| arr.get_mut(i)) {
                Some(v) => v,
                None => return false,
            },
            _ => return false,
        };
    }

    match current {
        Value::Object(map) => map.remove(last).is_some(),
        Value::Array(arr) => match last.parse::<usize>() {
            Ok(index) if index < arr.len() => {
                arr.remove(index);
                true
            }
            _ => false,
        },
        _ => false,
    }
}
