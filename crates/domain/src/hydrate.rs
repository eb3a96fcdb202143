//! JSON → entity hydration
//!
//! The server's payloads are loosely typed: identifiers arrive as numbers or
//! numeric strings, booleans occasionally as 0/1, nested users either as a
//! full object or as a bare id. Each entity implements [`Hydrate`] with an
//! explicit per-field mapping (tagged construction, no reflection), so the
//! required/optional status and the default of every field is written down in
//! one place.
//!
//! Hydration is pure: the same JSON value always yields an equal record, and
//! no network or mutable state is touched. The only way to fail is a missing
//! or non-coercible entity id.

use serde_json::Value;
use tracing::warn;

use crate::errors::{KaalitionError, Result};

/// Conversion from a server JSON value into a typed record.
pub trait Hydrate: Sized {
    /// Entity name used in hydration error messages.
    const ENTITY: &'static str;

    /// Build the record from a JSON value, applying the documented
    /// defaults for absent optional fields.
    ///
    /// # Errors
    /// Returns [`KaalitionError::Hydration`] when the entity id is absent
    /// or cannot be coerced to an integer.
    fn hydrate(value: &Value) -> Result<Self>;
}

/// Hydrate every element of a JSON array.
///
/// # Errors
/// Propagates the first element that fails to hydrate. A non-array value
/// is reported as a hydration error for `T`.
pub fn hydrate_seq<T: Hydrate>(value: &Value) -> Result<Vec<T>> {
    match value {
        Value::Array(items) => items.iter().map(T::hydrate).collect(),
        other => Err(KaalitionError::Hydration {
            entity: T::ENTITY,
            detail: format!("expected an array, got {}", kind_of(other)),
        }),
    }
}

/// Integer coercion: JSON number or numeric string.
pub(crate) fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Mandatory entity id under `key`. The one hard failure of hydration.
pub(crate) fn require_id(value: &Value, key: &str, entity: &'static str) -> Result<i64> {
    value
        .get(key)
        .and_then(coerce_i64)
        .ok_or_else(|| KaalitionError::Hydration {
            entity,
            detail: format!("missing or non-integer `{key}`"),
        })
}

/// Optional integer field; absent, null or non-coercible → `None`.
pub(crate) fn opt_int(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(coerce_i64)
}

/// Integer field with a default.
pub(crate) fn int_or(value: &Value, key: &str, default: i64) -> i64 {
    opt_int(value, key).unwrap_or(default)
}

/// Optional string field; absent or null → `None`. Numbers are rendered
/// to their decimal form since the server is observed to vary.
pub(crate) fn opt_string(value: &Value, key: &str) -> Option<String> {
    match value.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// String field with a default.
pub(crate) fn string_or(value: &Value, key: &str, default: &str) -> String {
    opt_string(value, key).unwrap_or_else(|| default.to_owned())
}

/// Bool coercion: JSON bool, 0/1, or "true"/"false"/"0"/"1".
pub(crate) fn bool_or(value: &Value, key: &str, default: bool) -> bool {
    match value.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64().map_or(default, |n| n != 0),
        Some(Value::String(s)) => match s.trim() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Nested entity sequence under `key`; absent or null → empty, never null.
pub(crate) fn seq_or_empty<T: Hydrate>(value: &Value, key: &str) -> Result<Vec<T>> {
    match value.get(key) {
        Some(v @ Value::Array(_)) => hydrate_seq(v),
        _ => Ok(Vec::new()),
    }
}

/// String array under `key`; non-string elements are skipped.
pub(crate) fn string_list(value: &Value, key: &str) -> Vec<String> {
    match value.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    }
}

/// Integer array under `key`; non-coercible elements are skipped.
pub(crate) fn int_list(value: &Value, key: &str) -> Vec<i64> {
    match value.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(coerce_i64).collect(),
        _ => Vec::new(),
    }
}

/// Opaque JSON sub-object kept verbatim (channel settings and the like).
pub(crate) fn raw_or_null(value: &Value, key: &str) -> Value {
    value.get(key).cloned().unwrap_or(Value::Null)
}

/// Nested user reference under `key`, tolerating every server-observed
/// shape: a full object, a bare integer or numeric-string id, or nothing
/// at all. Sparse representations produce a [`crate::types::User`] with
/// the id and default remaining fields; this never fails.
pub(crate) fn user_ref(value: &Value, key: &str, entity: &'static str) -> crate::types::User {
    use crate::types::User;

    match value.get(key) {
        Some(v @ Value::Object(_)) => User::hydrate(v).unwrap_or_else(|_| {
            warn!(entity, key, "nested user object without a usable id");
            User::sparse(0)
        }),
        Some(v) => match coerce_i64(v) {
            Some(id) => User::sparse(id),
            None => {
                warn!(entity, key, "unrecognized user reference shape");
                User::sparse(0)
            }
        },
        None => {
            warn!(entity, key, "missing user reference");
            User::sparse(0)
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
