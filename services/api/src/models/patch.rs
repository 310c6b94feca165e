//! Field-presence support for partial updates.
//!
//! A patch body must distinguish three states per nullable column: field
//! omitted (keep the stored value), field explicitly `null` (clear it), and
//! field set. Plain `Option<T>` collapses the first two, so clearable
//! columns are declared as `Option<Option<T>>` with this deserializer:
//! the outer `Option` is presence, the inner one is the value.

use serde::{Deserialize, Deserializer};

/// Deserializer for `#[serde(default, deserialize_with = "double_option")]`
/// fields. Only invoked when the field is present in the body, so the outer
/// `Option` becomes `Some`; the inner `Option` carries `null` vs value.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        notes: Option<Option<String>>,
    }

    #[test]
    fn omitted_field_is_outer_none() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.notes, None);
    }

    #[test]
    fn explicit_null_is_inner_none() {
        let patch: Patch = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(patch.notes, Some(None));
    }

    #[test]
    fn value_is_doubly_some() {
        let patch: Patch = serde_json::from_str(r#"{"notes": "compressor ok"}"#).unwrap();
        assert_eq!(patch.notes, Some(Some("compressor ok".to_string())));
    }
}
