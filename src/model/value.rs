//! Typed values held by configuration records.

use serde::ser::{Serialize, Serializer};

use super::collections::{RecordList, RecordMap};

/// Value of a numeric-or-sentinel field such as `MaxJobCount` or `MaxTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Plain numeric limit.
    Number(i64),
    /// The `UNLIMITED` sentinel.
    Unlimited,
    /// The `INFINITE` sentinel.
    Infinite,
}

impl Limit {
    /// Numeric value, if the limit is not a sentinel.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Limit::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether the limit is one of the sentinel tokens.
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Limit::Number(_))
    }
}

/// A typed configuration value.
///
/// The variant a field may hold is fixed by its declared
/// [`FieldShape`](crate::schema::FieldShape); the coercion layer enforces the
/// match on every parse and set.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Scalar string.
    Str(String),
    /// Scalar integer.
    Int(i64),
    /// Scalar float.
    Float(f64),
    /// Scalar boolean.
    Bool(bool),
    /// Numeric-or-sentinel limit.
    Limit(Limit),
    /// List of scalars (separator-joined or repeated-key).
    List(Vec<Value>),
    /// Ordered embedded key=value map. A `Bool(true)` value renders as a
    /// bare flag with no `=value` part.
    Map(Vec<(String, Value)>),
    /// Ordered nested-model collection.
    Records(RecordList),
    /// Primary-keyed nested-model collection.
    RecordMap(RecordMap),
}

impl Value {
    /// String content, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer content, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Float content; integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Boolean content, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Limit content, if this is a `Limit`.
    pub fn as_limit(&self) -> Option<Limit> {
        match self {
            Value::Limit(l) => Some(*l),
            _ => None,
        }
    }

    /// List elements, if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Map entries, if this is a `Map`.
    pub fn as_map(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Nested record list, if this is a `Records`.
    pub fn as_records(&self) -> Option<&RecordList> {
        match self {
            Value::Records(list) => Some(list),
            _ => None,
        }
    }

    /// Nested record mapping, if this is a `RecordMap`.
    pub fn as_record_map(&self) -> Option<&RecordMap> {
        match self {
            Value::RecordMap(map) => Some(map),
            _ => None,
        }
    }

    /// Convert to a JSON value for the interchange API.
    ///
    /// Limit sentinels become their wire tokens so the JSON form can be fed
    /// back through the coercion layer.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(f) => serde_json::Value::from(*f),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Limit(Limit::Number(n)) => serde_json::Value::from(*n),
            Value::Limit(Limit::Unlimited) => serde_json::Value::String("UNLIMITED".into()),
            Value::Limit(Limit::Infinite) => serde_json::Value::String("INFINITE".into()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Records(list) => {
                serde_json::Value::Array(list.iter().map(|rec| rec.to_json()).collect())
            }
            Value::RecordMap(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, rec)| (key.to_string(), rec.to_json()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Limit> for Value {
    fn from(l: Limit) -> Self {
        Value::Limit(l)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items.into_iter().map(Value::Str).collect())
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<i64>> for Value {
    fn from(items: Vec<i64>) -> Self {
        Value::List(items.into_iter().map(Value::Int).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_accessors() {
        assert_eq!(Limit::Number(5).as_number(), Some(5));
        assert_eq!(Limit::Unlimited.as_number(), None);
        assert!(Limit::Infinite.is_sentinel());
        assert!(!Limit::Number(0).is_sentinel());
    }

    #[test]
    fn test_json_round_trips_sentinels_as_tokens() {
        let json = Value::Limit(Limit::Unlimited).to_json();
        assert_eq!(json, serde_json::json!("UNLIMITED"));
        let json = Value::Limit(Limit::Number(12)).to_json();
        assert_eq!(json, serde_json::json!(12));
    }

    #[test]
    fn test_map_entries_survive_json_conversion() {
        let value = Value::Map(vec![
            ("b".into(), Value::Bool(true)),
            ("a".into(), Value::Int(1)),
        ]);
        let text = serde_json::to_string(&value).unwrap();
        assert!(text.contains("\"b\""));
        assert!(text.contains("\"a\""));
    }
}
