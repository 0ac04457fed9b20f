//! Core types for the auto-complete component.
//!
//! Options coming back from the server are opaque JSON objects ([`Record`]).
//! The caller tells the component which field holds the identifier and which
//! holds the human label through [`FieldNames`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of an option, taken from the configured value field.
///
/// Servers hand out either numeric primary keys or string slugs, so both are
/// accepted. A number and a string never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    /// Numeric identifier.
    Int(i64),
    /// String identifier.
    Str(String),
}

impl Identifier {
    /// Reads an identifier out of a JSON value. Only integers and strings qualify.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Identifier::Int),
            Value::String(s) => Some(Identifier::Str(s.clone())),
            _ => None,
        }
    }

    /// Converts the identifier back into JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Identifier::Int(n) => Value::from(*n),
            Identifier::Str(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Int(n) => write!(f, "{}", n),
            Identifier::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Identifier::Int(n)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::Str(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::Str(s)
    }
}

/// Names of the record fields used as identifier and label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    /// Field holding the identifier, `"id"` by default.
    pub value: String,
    /// Field holding the label, `"name"` by default.
    pub display: String,
}

impl FieldNames {
    /// Creates a field configuration.
    pub fn new(value: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display: display.into(),
        }
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self::new("id", "name")
    }
}

/// An option record as received from the server.
///
/// # Examples
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete::{FieldNames, Identifier, Record};
/// use serde_json::json;
///
/// let fields = FieldNames::new("id", "full_name");
/// let record = Record::from_value(json!({"id": 7, "full_name": "Ada Lovelace"})).unwrap();
/// assert_eq!(record.identifier(&fields), Some(Identifier::Int(7)));
/// assert_eq!(record.display(&fields), "Ada Lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Wraps a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builds a record from a JSON value; anything but an object yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// A record holding nothing but the identifier.
    pub fn placeholder(fields: &FieldNames, id: &Identifier) -> Self {
        let mut map = Map::new();
        map.insert(fields.value.clone(), id.to_json());
        Self(map)
    }

    /// The record's identifier, if the value field holds one.
    pub fn identifier(&self, fields: &FieldNames) -> Option<Identifier> {
        self.0.get(&fields.value).and_then(Identifier::from_json)
    }

    /// The record's label; empty when the display field is missing or null.
    pub fn display(&self, fields: &FieldNames) -> String {
        match self.0.get(&fields.display) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Returns a field of the record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Converts the record back into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// A value pushed into the component by its owner.
///
/// Owners hold either bare identifiers or the full records they got from
/// elsewhere; both are accepted, singly or as a list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValueInput {
    /// Clears the selection.
    #[default]
    Empty,
    /// A single identifier.
    Id(Identifier),
    /// Several identifiers, in selection order.
    Ids(Vec<Identifier>),
    /// A single full record.
    Record(Record),
    /// Several full records, in selection order.
    Records(Vec<Record>),
}

impl From<Identifier> for ValueInput {
    fn from(id: Identifier) -> Self {
        ValueInput::Id(id)
    }
}

impl From<Vec<Identifier>> for ValueInput {
    fn from(ids: Vec<Identifier>) -> Self {
        ValueInput::Ids(ids)
    }
}

impl From<Record> for ValueInput {
    fn from(record: Record) -> Self {
        ValueInput::Record(record)
    }
}

impl From<Vec<Record>> for ValueInput {
    fn from(records: Vec<Record>) -> Self {
        ValueInput::Records(records)
    }
}

impl<T: Into<ValueInput>> From<Option<T>> for ValueInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Loading state of the current query context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet in this context.
    #[default]
    Empty,
    /// A page request is in flight.
    Loading,
    /// At least one page arrived and the server announced another.
    Loaded,
    /// The last page arrived; nothing more to request.
    Exhausted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifier_from_json() {
        assert_eq!(Identifier::from_json(&json!(3)), Some(Identifier::Int(3)));
        assert_eq!(
            Identifier::from_json(&json!("emp-3")),
            Some(Identifier::Str("emp-3".into()))
        );
        assert_eq!(Identifier::from_json(&json!(null)), None);
        assert_eq!(Identifier::from_json(&json!(1.5)), None);
        assert_ne!(Identifier::Int(3), Identifier::from("3"));
    }

    #[test]
    fn test_placeholder_has_only_identifier() {
        let fields = FieldNames::default();
        let p = Record::placeholder(&fields, &Identifier::Int(9));
        assert_eq!(p.identifier(&fields), Some(Identifier::Int(9)));
        assert_eq!(p.display(&fields), "");
        assert_eq!(p.as_map().len(), 1);
    }

    #[test]
    fn test_display_of_non_string_label() {
        let fields = FieldNames::new("id", "code");
        let r = Record::from_value(json!({"id": 1, "code": 42})).unwrap();
        assert_eq!(r.display(&fields), "42");
        assert!(Record::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn test_value_input_from_option() {
        let none: Option<Identifier> = None;
        assert_eq!(ValueInput::from(none), ValueInput::Empty);
        assert_eq!(
            ValueInput::from(Some(Identifier::Int(1))),
            ValueInput::Id(Identifier::Int(1))
        );
    }

    #[test]
    fn test_field_names_deserialize_with_defaults() {
        let fields: FieldNames = serde_json::from_value(json!({"display": "title"})).unwrap();
        assert_eq!(fields.value, "id");
        assert_eq!(fields.display, "title");
    }
}
