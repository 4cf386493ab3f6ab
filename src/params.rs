//! The shared parameter store and the values that flow through it.

use std::collections::BTreeMap;
use std::fmt;

use float_cmp::approx_eq;
use serde::{Deserialize, Serialize};

/// Substring marking a field that currently follows another field.
pub const LINKED_MARKER: &str = "same as";

/// A single style parameter value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// The sentinel meaning "no literal value, use the automatic color cycle".
    pub fn automatic() -> Self {
        Self::Text(String::new())
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Build a numeric value, collapsing whole numbers to `Int` so that
    /// `1.0` is stored as `1`.
    pub fn from_f64(x: f64) -> Self {
        if x.is_finite() && x.fract() == 0.0 && x.abs() < i64::MAX as f64 {
            Self::Int(x as i64)
        } else {
            Self::Float(x)
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Bool(_) | Self::Text(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Classify what this stored value means for the control bound to it.
    pub fn state(&self) -> FieldState {
        match self {
            Self::Text(s) if s.is_empty() => FieldState::Automatic,
            Self::Text(s) if s.contains(LINKED_MARKER) => FieldState::Linked(s.clone()),
            _ => FieldState::Literal,
        }
    }

    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            // Int/Float compare numerically: a stored 1.0 matches a listed 1
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => approx_eq!(f64, x, y, ulps = 4),
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// What a stored value means for its control, independent of its runtime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    /// An ordinary value the control displays and edits.
    Literal,
    /// Unset: the renderer picks the value (automatic color cycle).
    Automatic,
    /// Governed by a reference to another field, e.g. "same as circle".
    Linked(String),
}

impl FieldState {
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal)
    }
}

/// Location of one field in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamPath {
    pub section: String,
    pub field: String,
}

impl ParamPath {
    pub fn new(section: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for ParamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.field)
    }
}

/// A write produced by a control: one value applied to one or more fields of
/// a section.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamUpdate {
    pub section: String,
    pub fields: Vec<String>,
    pub value: Value,
}

impl ParamUpdate {
    pub fn single(path: &ParamPath, value: Value) -> Self {
        Self {
            section: path.section.clone(),
            fields: vec![path.field.clone()],
            value,
        }
    }

    pub fn linked(section: &str, fields: &[String], value: Value) -> Self {
        Self {
            section: section.to_string(),
            fields: fields.to_vec(),
            value,
        }
    }
}

/// Nested `section -> field -> value` mapping owned by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterStore {
    sections: BTreeMap<String, BTreeMap<String, Value>>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used to seed stores.
    pub fn with(mut self, section: &str, field: &str, value: impl Into<Value>) -> Self {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, section: &str, field: &str) -> Option<&Value> {
        self.sections.get(section)?.get(field)
    }

    pub fn get_path(&self, path: &ParamPath) -> Option<&Value> {
        self.get(&path.section, &path.field)
    }

    pub fn section(&self, section: &str) -> Option<&BTreeMap<String, Value>> {
        self.sections.get(section)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, Value>)> {
        self.sections.iter()
    }

    /// The single mutation entry point: write `value` to every listed field.
    pub fn update_params(&mut self, update: &ParamUpdate) {
        let section = self.sections.entry(update.section.clone()).or_default();
        for field in &update.fields {
            section.insert(field.clone(), update.value.clone());
        }
        tracing::debug!(
            section = %update.section,
            fields = ?update.fields,
            value = %update.value,
            "parameter store updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_quotients_become_integers() {
        assert_eq!(Value::from_f64(1.0), Value::Int(1));
        assert!(matches!(Value::from_f64(1.0), Value::Int(1)));
        assert!(matches!(Value::from_f64(0.55), Value::Float(_)));
        assert!(matches!(Value::from_f64(f64::NAN), Value::Float(_)));
    }

    #[test]
    fn numeric_equality_crosses_int_and_float() {
        assert_eq!(Value::Int(2), Value::Float(2.0));
        assert_ne!(Value::Int(2), Value::text("2"));
        assert_ne!(Value::Bool(true), Value::Int(1));
    }

    #[test]
    fn field_state_tags_sentinels() {
        assert_eq!(Value::automatic().state(), FieldState::Automatic);
        assert_eq!(
            Value::text("same as circle").state(),
            FieldState::Linked("same as circle".into())
        );
        assert_eq!(Value::text("#ff0000").state(), FieldState::Literal);
        assert_eq!(Value::Float(0.2).state(), FieldState::Literal);
    }

    #[test]
    fn update_params_writes_all_fields() {
        let mut store = ParameterStore::new()
            .with("Circle", "color", "")
            .with("Circle", "edgecolor", "");
        let update = ParamUpdate::linked(
            "Circle",
            &["color".to_string(), "edgecolor".to_string()],
            Value::text("#123456"),
        );
        store.update_params(&update);
        assert_eq!(store.get("Circle", "color"), Some(&Value::text("#123456")));
        assert_eq!(store.get("Circle", "edgecolor"), Some(&Value::text("#123456")));
    }

    #[test]
    fn store_deserializes_mixed_values() {
        let store: ParameterStore = toml::from_str(
            r##"
[Circle]
fill = true
fill_alpha = 0.2
line_width = 1
color = ""
"##,
        )
        .unwrap();
        assert_eq!(store.get("Circle", "fill"), Some(&Value::Bool(true)));
        assert!(matches!(store.get("Circle", "line_width"), Some(Value::Int(1))));
        assert!(matches!(store.get("Circle", "fill_alpha"), Some(Value::Float(_))));
        assert_eq!(store.get("Circle", "color"), Some(&Value::automatic()));
    }
}
