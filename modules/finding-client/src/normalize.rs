//! Structural cleanup for Finding API payloads.
//!
//! The JSON encoding of the Finding service wraps every field in an array,
//! whatever its cardinality: `{"ack": ["Success"], "searchResult": [{...}]}`.
//! These helpers collapse those wrappers and restore sequence shape where the
//! caller needs it.

use serde_json::Value;

/// Collapse every single-element array field into its element, recursively.
///
/// Wrapper layers are peeled until the field holds something other than a
/// one-element array, and the result is normalized in turn. Arrays with zero
/// or several elements are kept as they are. Non-object input is returned
/// unchanged.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, field)| (key, unwrap_singletons(field)))
                .collect(),
        ),
        other => other,
    }
}

fn unwrap_singletons(mut field: Value) -> Value {
    loop {
        match field {
            Value::Array(mut items) if items.len() == 1 => field = items.remove(0),
            other => return normalize(other),
        }
    }
}

/// Coerce a possibly absent, possibly scalar value into a sequence.
///
/// `None` and JSON `null` give an empty vector, an array is returned as its
/// elements, and anything else becomes a one-element vector.
pub fn to_array(value: Option<Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
    }
}
