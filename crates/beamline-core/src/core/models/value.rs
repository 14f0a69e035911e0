use crate::core::units::Length;
use std::collections::BTreeMap;
use std::fmt;

/// A header record: field name to scalar value, keys are case-sensitive.
pub type Header = BTreeMap<String, Value>;

/// A typed attribute value carried by an element, a header or a table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Length(Length),
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_length(&self) -> Option<Length> {
        match self {
            Value::Length(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// A short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Length(_) => "length",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
        }
    }

    /// Renders the value for a plain-text table cell (lengths in metres, no unit).
    pub fn to_cell(&self) -> String {
        match self {
            Value::Length(l) => l.as_meters().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Length(l) => write!(f, "{}", l),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<Length> for Value {
    fn from(l: Length) -> Self {
        Value::Length(l)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
