//! Primitive option values and the ordered option map

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Primitive option value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl OptionValue {
    /// Converts a JSON primitive; arrays, objects and null have no option form
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(OptionValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(OptionValue::Integer(i)),
                None => n.as_f64().map(OptionValue::Number),
            },
            Value::String(s) => Some(OptionValue::Text(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// String token handed to the exporter
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Integer(i) => write!(f, "{i}"),
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

/// Option names mapped to values, in first-insertion order
///
/// Inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionMap(Vec<(String, OptionValue)>);

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_primitives() {
        assert_eq!(OptionValue::from_json(&json!(true)), Some(OptionValue::Bool(true)));
        assert_eq!(OptionValue::from_json(&json!(21)), Some(OptionValue::Integer(21)));
        assert_eq!(OptionValue::from_json(&json!(0.5)), Some(OptionValue::Number(0.5)));
        assert_eq!(
            OptionValue::from_json(&json!("ReferenceView")),
            Some(OptionValue::Text("ReferenceView".to_string()))
        );
        assert_eq!(OptionValue::from_json(&json!(null)), None);
        assert_eq!(OptionValue::from_json(&json!([1, 2])), None);
    }

    #[test]
    fn test_tokens() {
        assert_eq!(OptionValue::Bool(false).token(), "false");
        assert_eq!(OptionValue::Integer(3).token(), "3");
        assert_eq!(OptionValue::Number(0.5).token(), "0.5");
        assert_eq!(OptionValue::from("IFC4").token(), "IFC4");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = OptionMap::new();
        map.insert("A", true);
        map.insert("B", "x");
        map.insert("A", false);

        assert_eq!(map.len(), 2);
        let names: Vec<&str> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(map.get("A"), Some(&OptionValue::Bool(false)));
    }
}
