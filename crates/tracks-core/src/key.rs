//! Canonical bucketing keys.
//!
//! Assignment is reproducible only if the same key value always renders to
//! the same text, so every supported key shape gets one canonical textual
//! form: plain text stays verbatim, integers render in decimal, and
//! structured keys (sequences, mappings) render as canonical JSON with
//! recursively sorted object keys. Callers that omit the key get fresh
//! random key material instead, which makes the assignment intentionally
//! non-reproducible.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use rand::Rng;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{ErrorInfo, TracksError};

/// A bucketing key in its canonical textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey(String);

impl BucketKey {
    /// Builds a key from any serializable value by rendering it as canonical
    /// JSON with recursively sorted object keys.
    ///
    /// Two values that serialize to the same JSON structure always produce
    /// the same key, regardless of map insertion order.
    pub fn canonical<T: Serialize>(value: &T) -> Result<Self, TracksError> {
        let value = serde_json::to_value(value).map_err(|err| {
            TracksError::Serde(
                ErrorInfo::new("key-encode", "failed to encode bucketing key as JSON")
                    .with_hint(err.to_string()),
            )
        })?;
        let canonical = canonicalize(value);
        let text = serde_json::to_string(&canonical).map_err(|err| {
            TracksError::Serde(
                ErrorInfo::new("key-render", "failed to render canonical key")
                    .with_hint(err.to_string()),
            )
        })?;
        Ok(Self(text))
    }

    /// Generates fresh random key material for callers that supply no key.
    pub fn random() -> Self {
        let material: u128 = rand::thread_rng().gen();
        Self(format!("{material:032x}"))
    }

    /// Returns the canonical textual form of the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BucketKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BucketKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for BucketKey {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut ordered = BTreeMap::new();
            for (key, val) in map {
                ordered.insert(key, canonicalize(val));
            }
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => {
            let canonical_values = values.into_iter().map(canonicalize).collect();
            Value::Array(canonical_values)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_keys_sort_map_entries() {
        let a = BucketKey::canonical(&json!({"b": 1, "a": 2})).unwrap();
        let b = BucketKey::canonical(&json!({"a": 2, "b": 1})).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn integer_keys_render_decimal() {
        assert_eq!(BucketKey::from(42u64).as_str(), "42");
        assert_eq!(BucketKey::from(-7i32).as_str(), "-7");
    }
}
