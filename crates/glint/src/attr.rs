//! Key/value attributes attached to log records.
//!
//! An [`Attr`] pairs a string key with a [`Value`]. Values are scalars
//! or nested groups of further attributes, mirroring the JSON object
//! model the handlers ultimately emit.

use crate::Level;
use std::fmt;

/// A value carried by an [`Attr`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    String(String),
    /// A nested collection of attributes.
    Group(Vec<Attr>),
}

impl Value {
    /// Projects the value into a [`serde_json::Value`].
    ///
    /// Non-finite floats become JSON null, since JSON has no NaN or
    /// infinity. Groups fold into objects; when sibling keys collide,
    /// the later one wins.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(n) => serde_json::Value::from(*n),
            Self::Uint(n) => serde_json::Value::from(*n),
            Self::Float(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Group(attrs) => {
                let mut object = serde_json::Map::new();
                for attr in attrs {
                    if attr.is_empty() {
                        continue;
                    }
                    object.insert(attr.key.clone(), attr.value.to_json());
                }
                serde_json::Value::Object(object)
            }
        }
    }
}

impl fmt::Display for Value {
    /// Strings render raw, without quoting; groups render as
    /// `[key=value key=value]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Group(attrs) => {
                f.write_str("[")?;
                for (i, attr) in attrs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}={}", attr.key, attr.value)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(v: Vec<Attr>) -> Self {
        Self::Group(v)
    }
}

impl From<Level> for Value {
    fn from(v: Level) -> Self {
        Self::String(v.as_str().to_string())
    }
}

/// A key/value pair attached to a record.
///
/// # Example
///
/// ```rust
/// use glint::Attr;
///
/// let attrs = vec![
///     Attr::string("method", "GET"),
///     Attr::int("status", 200),
///     Attr::group("peer", vec![Attr::string("host", "10.0.0.7")]),
/// ];
/// # let _ = attrs;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    /// The attribute key.
    pub key: String,
    /// The attribute value.
    pub value: Value,
}

impl Attr {
    /// Creates an attribute from a key and anything convertible to a
    /// [`Value`].
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a string attribute.
    #[must_use]
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Value::String(value.into()),
        }
    }

    /// Creates a signed integer attribute.
    #[must_use]
    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self {
            key: key.into(),
            value: Value::Int(value),
        }
    }

    /// Creates an unsigned integer attribute.
    #[must_use]
    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            value: Value::Uint(value),
        }
    }

    /// Creates a floating-point attribute.
    #[must_use]
    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value: Value::Float(value),
        }
    }

    /// Creates a boolean attribute.
    #[must_use]
    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self {
            key: key.into(),
            value: Value::Bool(value),
        }
    }

    /// Creates a group attribute holding nested attributes.
    ///
    /// A group with an empty key is inlined by the handlers: its
    /// members land at the enclosing level instead of nesting.
    #[must_use]
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            key: key.into(),
            value: Value::Group(attrs),
        }
    }

    /// Returns true when the key is empty and the value is null.
    ///
    /// Empty attributes are skipped by the handlers in this crate, and
    /// a rewriter can return one to drop a field. An empty *string*
    /// value does not make an attribute empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && matches!(self.value, Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_conversions() {
        assert_eq!(Value::from("s"), Value::String("s".to_string()));
        assert_eq!(Value::from(String::from("s")), Value::String("s".to_string()));
        assert_eq!(Value::from(-3_i32), Value::Int(-3));
        assert_eq!(Value::from(9_i64), Value::Int(9));
        assert_eq!(Value::from(9_u64), Value::Uint(9));
        assert_eq!(Value::from(0.5_f64), Value::Float(0.5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(Level::Warn), Value::String("WARN".to_string()));
    }

    #[test]
    fn empty_requires_both_parts() {
        assert!(Attr::new("", Value::Null).is_empty());
        assert!(!Attr::new("k", Value::Null).is_empty());
        assert!(!Attr::string("", "").is_empty());
        assert!(!Attr::string("k", "v").is_empty());
    }

    #[test]
    fn to_json_maps_non_finite_floats_to_null() {
        assert_eq!(Value::Float(f64::NAN).to_json(), serde_json::Value::Null);
        assert_eq!(
            Value::Float(f64::INFINITY).to_json(),
            serde_json::Value::Null
        );
        assert_eq!(Value::Float(1.5).to_json(), serde_json::json!(1.5));
    }

    #[test]
    fn to_json_folds_groups_with_last_duplicate_winning() {
        let group = Value::Group(vec![
            Attr::int("a", 1),
            Attr::int("a", 2),
            Attr::new("", Value::Null),
            Attr::string("b", "x"),
        ]);
        assert_eq!(group.to_json(), serde_json::json!({"a": 2, "b": "x"}));
    }

    #[test]
    fn display_renders_strings_raw_and_groups_inline() {
        assert_eq!(Value::from("plain text").to_string(), "plain text");
        assert_eq!(Value::Null.to_string(), "null");
        let group = Value::Group(vec![Attr::int("a", 1), Attr::string("b", "two")]);
        assert_eq!(group.to_string(), "[a=1 b=two]");
    }
}
