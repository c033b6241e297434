//! Typed JSON-like values for contract keyword arguments and node results.
//!
//! Maps are key-ordered (`BTreeMap`), so a value always serializes to the same
//! bytes regardless of how it was built. Transaction signing relies on this.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Keyword arguments passed to a contract function.
pub type Kwargs = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => {
                Value::Map(fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Value::Number(n),
            Value::String(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Map(fields) => {
                serde_json::Value::Object(fields.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untagged_roundtrip_preserves_types() {
        let raw = json!({
            "amount": 100,
            "price": 1.5,
            "to": "abc",
            "flags": [true, null],
            "meta": {"z": 1, "a": 2}
        });
        let value: Value = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(value.get("amount").and_then(Value::as_i64), Some(100));
        assert_eq!(value.get("to").and_then(Value::as_str), Some("abc"));
        assert!(matches!(value.get("price"), Some(Value::Number(n)) if n.is_f64()));
        assert_eq!(
            value.get("flags"),
            Some(&Value::List(vec![Value::Bool(true), Value::Null]))
        );
        assert_eq!(serde_json::to_value(&value).unwrap(), raw);
    }

    #[test]
    fn test_map_keys_serialize_sorted() {
        let mut kwargs = Kwargs::new();
        kwargs.insert("to".into(), "bob".into());
        kwargs.insert("amount".into(), 5i64.into());
        let text = serde_json::to_string(&kwargs).unwrap();
        assert_eq!(text, r#"{"amount":5,"to":"bob"}"#);
    }

    #[test]
    fn test_conversion_from_serde_json_value() {
        let v = Value::from(json!([1, "x", {"k": false}]));
        let back: serde_json::Value = v.into();
        assert_eq!(back, json!([1, "x", {"k": false}]));
    }
}
