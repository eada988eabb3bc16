//! Structural merging over the serde data model
//!
//! Two flavours are provided:
//! - [`overwrite`] / [`overwrite_value`]: set fields of the source replace the
//!   destination, zero-valued fields leave it untouched.
//! - [`layer_value`]: every key present in the source replaces the
//!   destination, the way decoding a document onto an existing value behaves.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::mapping::Entry;
use serde_yaml::Value;

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("type mismatch at '{path}': cannot merge {found} into {expected}")]
    KindMismatch { path: String, expected: &'static str, found: &'static str },

    #[error("cannot encode value: {0}")]
    Encode(#[source] serde_yaml::Error),

    #[error("cannot decode merged value: {0}")]
    Decode(#[source] serde_yaml::Error),
}

/// Overwrite-merge `src` onto `dst` and return the combined value.
///
/// Right-biased: every non-zero field of `src` wins, every zero field of `src`
/// keeps the value from `dst`. Merging a value with itself is a no-op.
pub fn overwrite<T>(dst: &T, src: &T) -> Result<T, MergeError>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = serde_yaml::to_value(dst).map_err(MergeError::Encode)?;
    let overlay = serde_yaml::to_value(src).map_err(MergeError::Encode)?;
    overwrite_value(&mut merged, overlay)?;
    serde_yaml::from_value(merged).map_err(MergeError::Decode)
}

/// In-place overwrite-merge of two YAML values.
pub fn overwrite_value(dst: &mut Value, src: Value) -> Result<(), MergeError> {
    overwrite_at(dst, src, "")
}

fn overwrite_at(dst: &mut Value, src: Value, path: &str) -> Result<(), MergeError> {
    if is_zero(&src) {
        return Ok(());
    }

    match (dst, src) {
        (Value::Mapping(dst_map), Value::Mapping(src_map)) => {
            for (key, value) in src_map {
                let child = child_path(path, &key);
                match dst_map.entry(key) {
                    Entry::Occupied(mut slot) => overwrite_at(slot.get_mut(), value, &child)?,
                    Entry::Vacant(slot) => {
                        if !is_zero(&value) {
                            slot.insert(value);
                        }
                    }
                }
            }
            Ok(())
        }
        (dst, src) => {
            if !is_zero(dst) && kind(dst) != kind(&src) {
                return Err(MergeError::KindMismatch {
                    path: if path.is_empty() { "<root>".to_string() } else { path.to_string() },
                    expected: kind(dst),
                    found: kind(&src),
                });
            }
            *dst = src;
            Ok(())
        }
    }
}

/// Layer `src` onto `dst` key by key. Nested mappings recurse, any other
/// present value replaces the destination. Nulls count as absent.
pub fn layer_value(dst: &mut Value, src: Value) {
    match (dst, src) {
        (_, Value::Null) => {}
        (Value::Mapping(dst_map), Value::Mapping(src_map)) => {
            for (key, value) in src_map {
                match dst_map.entry(key) {
                    Entry::Occupied(mut slot) => layer_value(slot.get_mut(), value),
                    Entry::Vacant(slot) => {
                        if !value.is_null() {
                            slot.insert(value);
                        }
                    }
                }
            }
        }
        (dst, src) => *dst = src,
    }
}

/// Whether a value counts as "unset" for overwrite-merging.
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.values().all(is_zero),
        Value::Tagged(_) => false,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn child_path(parent: &str, key: &Value) -> String {
    let label = match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other).map(|s| s.trim().to_string()).unwrap_or_default(),
    };
    if parent.is_empty() {
        label
    } else {
        format!("{parent}.{label}")
    }
}
