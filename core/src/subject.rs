//! `Subject`: the flat attribute map a ruleset is evaluated against

use crate::Value;
use std::collections::HashMap;

static UNDEFINED: Value = Value::Undefined;

/// The input record evaluated against a ruleset.
///
/// A flat map of attribute name to [`Value`]. Reading an absent key yields
/// [`Value::Undefined`]. The matchers never mutate a subject.
///
/// # Example
///
/// ```
/// use decider::{Subject, Value};
///
/// let subject = Subject::new()
///     .with("hasAccess", true)
///     .with("role", "admin");
///
/// assert_eq!(subject.get("hasAccess"), &Value::Bool(true));
/// assert!(subject.get("missing").is_undefined());
/// assert_eq!(subject.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Subject {
    values: HashMap<String, Value>,
}

impl Subject {
    /// Create an empty subject.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get an attribute; absent keys read as [`Value::Undefined`].
    #[must_use]
    pub fn get(&self, key: &str) -> &Value {
        self.values.get(key).unwrap_or(&UNDEFINED)
    }

    /// Returns `true` if the key is present, even when its value is `Undefined`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of attribute keys present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the subject has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the present attributes in arbitrary order.
    ///
    /// ```
    /// use decider::{Subject, Value};
    ///
    /// let subject = Subject::new().with("hasAccess", true).with("isAdmin", Value::Null);
    /// let mut keys: Vec<&str> = subject.iter().map(|(k, _)| k).collect();
    /// keys.sort_unstable();
    /// assert_eq!(keys, ["hasAccess", "isAdmin"]);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Subject
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
