//! Structural deep copy.
//!
//! [`Datum`] models the value categories a front-end hands over for copying:
//! primitives, date/times, ordered lists, keyed maps, and opaque host objects.
//! [`deep_clone`] copies each category by its own rule and refuses opaque
//! values instead of sharing them.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::{Result, ToolsError};

/// A structurally copyable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Datum {
    /// `null` / `undefined`.
    Null,
    /// Boolean primitive.
    Bool(bool),
    /// Numeric primitive.
    Number(Number),
    /// String primitive.
    String(String),
    /// Point in time. Serialized as RFC 3339.
    DateTime(DateTime<Utc>),
    /// Ordered sequence.
    List(Vec<Datum>),
    /// Keyed mapping, insertion ordered.
    Map(IndexMap<String, Datum>),
    /// Host object with no copy rule (function, blob, class instance...).
    /// Holds the host's type name.
    #[serde(serialize_with = "serialize_opaque")]
    Opaque(String),
}

fn serialize_opaque<S: serde::Serializer>(
    type_name: &str,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("[object {type_name}]"))
}

impl Datum {
    /// Category name, used in error messages and logs.
    pub fn kind(&self) -> &str {
        match self {
            Datum::Null => "null",
            Datum::Bool(_) => "boolean",
            Datum::Number(_) => "number",
            Datum::String(_) => "string",
            Datum::DateTime(_) => "date",
            Datum::List(_) => "array",
            Datum::Map(_) => "object",
            Datum::Opaque(name) => name,
        }
    }

    /// Convert into JSON. Date/times become RFC 3339 strings; opaque values
    /// are rejected.
    pub fn into_json(self) -> Result<Value> {
        Ok(match self {
            Datum::Null => Value::Null,
            Datum::Bool(b) => Value::Bool(b),
            Datum::Number(n) => Value::Number(n),
            Datum::String(s) => Value::String(s),
            Datum::DateTime(dt) => Value::String(dt.to_rfc3339()),
            Datum::List(items) => Value::Array(
                items
                    .into_iter()
                    .map(Datum::into_json)
                    .collect::<Result<_>>()?,
            ),
            Datum::Map(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| v.into_json().map(|v| (k, v)))
                    .collect::<Result<_>>()?,
            ),
            Datum::Opaque(name) => return Err(ToolsError::UnsupportedType(name)),
        })
    }
}

impl From<Value> for Datum {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Datum::Null,
            Value::Bool(b) => Datum::Bool(b),
            Value::Number(n) => Datum::Number(n),
            Value::String(s) => Datum::String(s),
            Value::Array(items) => Datum::List(items.into_iter().map(Datum::from).collect()),
            Value::Object(map) => {
                Datum::Map(map.into_iter().map(|(k, v)| (k, Datum::from(v))).collect())
            }
        }
    }
}

impl From<DateTime<Utc>> for Datum {
    fn from(value: DateTime<Utc>) -> Self {
        Datum::DateTime(value)
    }
}

/// Deep-copy a value.
///
/// Primitives are copied by value, date/times by their instant, lists and maps
/// element by element. Fails with [`ToolsError::UnsupportedType`] on the first
/// opaque value found, wherever it is nested.
pub fn deep_clone(value: &Datum) -> Result<Datum> {
    match value {
        Datum::Null => Ok(Datum::Null),
        Datum::Bool(b) => Ok(Datum::Bool(*b)),
        Datum::Number(n) => Ok(Datum::Number(n.clone())),
        Datum::String(s) => Ok(Datum::String(s.clone())),
        Datum::DateTime(dt) => Ok(Datum::DateTime(*dt)),
        Datum::List(items) => items
            .iter()
            .map(deep_clone)
            .collect::<Result<Vec<_>>>()
            .map(Datum::List),
        Datum::Map(map) => map
            .iter()
            .map(|(k, v)| deep_clone(v).map(|v| (k.clone(), v)))
            .collect::<Result<IndexMap<_, _>>>()
            .map(Datum::Map),
        Datum::Opaque(name) => {
            log::debug!("deep_clone refused opaque value of type {name}");
            Err(ToolsError::UnsupportedType(name.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clones_json_structure() {
        let original = Datum::from(json!({"a": [1, "two", null, {"b": true}]}));
        let copy = deep_clone(&original).unwrap();
        assert_eq!(copy, original);
        assert_eq!(
            copy.into_json().unwrap(),
            json!({"a": [1, "two", null, {"b": true}]})
        );
    }

    #[test]
    fn clones_dates_by_instant() {
        let at = DateTime::from_timestamp_millis(1_627_833_600_123).unwrap();
        let copy = deep_clone(&Datum::from(at)).unwrap();
        assert_eq!(copy, Datum::DateTime(at));
    }

    #[test]
    fn map_order_is_preserved() {
        let original = Datum::from(json!({"z": 1, "a": 2, "m": 3}));
        let Datum::Map(copy) = deep_clone(&original).unwrap() else {
            panic!("expected a map");
        };
        let keys: Vec<_> = copy.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn opaque_values_are_rejected() {
        let err = deep_clone(&Datum::Opaque("Function".into())).unwrap_err();
        assert!(matches!(err, ToolsError::UnsupportedType(ref t) if t == "Function"));
    }

    #[test]
    fn nested_opaque_value_fails_whole_copy() {
        let mut map = IndexMap::new();
        map.insert("ok".to_string(), Datum::Bool(true));
        map.insert(
            "file".to_string(),
            Datum::List(vec![Datum::Null, Datum::Opaque("Blob".into())]),
        );
        assert!(deep_clone(&Datum::Map(map)).is_err());
    }

    #[test]
    fn dates_serialize_as_rfc3339() {
        let at = DateTime::from_timestamp(0, 0).unwrap();
        let json = serde_json::to_value(Datum::List(vec![Datum::DateTime(at)])).unwrap();
        let text = json[0].as_str().unwrap();
        assert_eq!(DateTime::parse_from_rfc3339(text).unwrap(), at);
        assert_eq!(
            Datum::DateTime(at).into_json().unwrap(),
            json!("1970-01-01T00:00:00+00:00")
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(Datum::from(json!([])).kind(), "array");
        assert_eq!(Datum::Opaque("Window".into()).kind(), "Window");
    }
}
