//! `Value`: the closed set of values a subject attribute or a predicate field can hold
//!
//! Subjects are flat maps of attribute name to `Value`, and predicates compare
//! against `Value`s. Matching only ever needs equality, so the variant set is
//! closed and small.
//!
//! # "No value" states
//!
//! [`Value::Undefined`] (the attribute is absent), [`Value::Null`] and
//! `Value::Bool(false)` are three distinct values. None of them equals another;
//! a rule that wants to treat them alike must list all of them in a
//! [`FieldMatch::OneOf`](crate::FieldMatch::OneOf).

use std::fmt;

/// A subject attribute value or a predicate expectation.
///
/// # Example
///
/// ```
/// use decider::Value;
///
/// assert_eq!(Value::from(true), Value::Bool(true));
/// assert_ne!(Value::Null, Value::Undefined);
/// assert_ne!(Value::Null, Value::Bool(false));
/// assert_eq!(Value::Int(1), Value::Float(1.0));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value at all. This is what an absent subject key reads as.
    #[default]
    Undefined,

    /// An explicit null.
    Null,

    /// Boolean data.
    Bool(bool),

    /// Integer data.
    Int(i64),

    /// Floating point data.
    Float(f64),

    /// String data.
    String(String),

    /// An ordered list of values, compared element-wise.
    List(Vec<Value>),
}

// Manual PartialEq: Int and Float share one number space, and NaN equals nothing.
impl PartialEq for Value {
    #[allow(clippy::cast_precision_loss)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => (*a as f64) == *b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Returns `true` if this is the `Undefined` variant.
    #[inline]
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns `true` if this is the `Null` variant.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get the value as a boolean.
    ///
    /// ```
    /// use decider::Value;
    ///
    /// assert_eq!(Value::Bool(false).as_bool(), Some(false));
    /// assert_eq!(Value::Null.as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get the value as a list slice.
    ///
    /// ```
    /// use decider::Value;
    ///
    /// let list = Value::from(vec![Value::Null, Value::Bool(false)]);
    /// assert_eq!(list.as_list(), Some(&[Value::Null, Value::Bool(false)][..]));
    /// assert_eq!(Value::Null.as_list(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Returns `true` if this is a `List` whose items equal `items`.
    ///
    /// Lets callers compare against a borrowed slice without building a `List`.
    #[must_use]
    pub fn is_list_of(&self, items: &[Value]) -> bool {
        matches!(self, Self::List(own) if own.as_slice() == items)
    }

    /// Returns a string describing the kind of this value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
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

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

/// `None` is an absent value, i.e. [`Value::Undefined`].
impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Undefined,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Deserialization (feature = "serde")
// ═══════════════════════════════════════════════════════════════════════════════

/// Map key that spells [`Value::Undefined`] in JSON/YAML, which have no native undefined.
#[cfg(feature = "serde")]
pub(crate) const UNDEFINED_KEY: &str = "undefined";

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(feature = "serde")]
struct ValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a null, boolean, number, string, list, or `{ undefined: true }`")
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: serde::Deserializer<'de>>(self, d: D) -> Result<Value, D::Error> {
        serde::Deserialize::deserialize(d)
    }

    fn visit_bool<E>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E>(self, i: i64) -> Result<Value, E> {
        Ok(Value::Int(i))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E>(self, u: u64) -> Result<Value, E> {
        Ok(i64::try_from(u).map_or(Value::Float(u as f64), Value::Int))
    }

    fn visit_f64<E>(self, x: f64) -> Result<Value, E> {
        Ok(Value::Float(x))
    }

    fn visit_str<E>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_seq<A: serde::de::SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: serde::de::MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        use serde::de::Error;

        let Some(key) = map.next_key::<String>()? else {
            return Err(A::Error::custom("empty map is not a value"));
        };
        if key != UNDEFINED_KEY {
            return Err(A::Error::unknown_field(&key, &[UNDEFINED_KEY]));
        }
        let flag: bool = map.next_value()?;
        if !flag {
            return Err(A::Error::custom("`undefined` must be `true`"));
        }
        if map.next_key::<String>()?.is_some() {
            return Err(A::Error::custom("`{ undefined: true }` takes no other keys"));
        }
        Ok(Value::Undefined)
    }
}
