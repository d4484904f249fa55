//! Identifier fields that arrive as either strings or bare numbers
//!
//! Catalog sources disagree on whether a design or color id is `"3001"` or
//! `3001`. Both collapse to the same string so matching never has to care.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Deserialize a string-or-integer identifier into its string form
pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IdentVisitor)
}

struct IdentVisitor;

impl<'de> Visitor<'de> for IdentVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "super::deserialize")]
        id: String,
    }

    #[test]
    fn test_string_identifier() {
        let h: Holder = serde_json::from_str(r#"{"id": "3001"}"#).unwrap();
        assert_eq!(h.id, "3001");
    }

    #[test]
    fn test_integer_identifier() {
        let h: Holder = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(h.id, "5");
    }

    #[test]
    fn test_rejects_other_types() {
        let result: Result<Holder, _> = serde_json::from_str(r#"{"id": [1]}"#);
        assert!(result.is_err());
    }
}
