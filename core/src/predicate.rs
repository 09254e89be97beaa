//! Predicate: per-attribute conditions over a [`Subject`]
//!
//! A [`Predicate`] maps attribute names to a [`FieldMatch`]. It matches a
//! subject when every declared field matches; attributes the predicate does
//! not declare are never looked at.

use crate::{FieldTrace, Subject, Value};
use std::collections::BTreeMap;
use std::fmt;

/// The condition a single predicate field places on a subject attribute.
///
/// Rules are authored with either a single expected value or a list of
/// acceptable values; this enum makes the two cases explicit.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldMatch {
    /// The attribute must equal this value.
    Exact(Value),

    /// The attribute must equal one of these values.
    ///
    /// Only the full matcher gives this set semantics. The simplified matcher
    /// compares the attribute against the list itself.
    OneOf(Vec<Value>),
}

/// How a [`FieldMatch::OneOf`] field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldSemantics {
    /// `OneOf` is a membership test.
    Membership,
    /// `OneOf` is compared literally, as a [`Value::List`].
    Literal,
}

impl FieldMatch {
    /// A field that must equal `value`.
    #[must_use]
    pub fn exact(value: impl Into<Value>) -> Self {
        Self::Exact(value.into())
    }

    /// A field that must equal one of `values`.
    #[must_use]
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Set-membership match, as the full matcher applies it.
    ///
    /// # Example
    ///
    /// ```
    /// use decider::{FieldMatch, Value};
    ///
    /// let denied = FieldMatch::one_of([Value::Bool(false), Value::Undefined, Value::Null]);
    /// assert!(denied.matches(&Value::Undefined));
    /// assert!(!denied.matches(&Value::Bool(true)));
    /// ```
    #[must_use]
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Self::Exact(expected) => expected == actual,
            Self::OneOf(accepted) => accepted.contains(actual),
        }
    }

    /// Exact-only match, as the simplified matcher applies it.
    ///
    /// A `OneOf` field only matches an attribute that is itself an equal list.
    #[must_use]
    pub fn matches_literal(&self, actual: &Value) -> bool {
        match self {
            Self::Exact(expected) => expected == actual,
            Self::OneOf(items) => actual.is_list_of(items),
        }
    }

    pub(crate) fn matches_with(&self, actual: &Value, semantics: FieldSemantics) -> bool {
        match semantics {
            FieldSemantics::Membership => self.matches(actual),
            FieldSemantics::Literal => self.matches_literal(actual),
        }
    }
}

impl fmt::Display for FieldMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => write!(f, "== {v}"),
            Self::OneOf(items) => {
                f.write_str("in [")?;
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

/// The matching condition of a rule, keyed by subject attribute name.
///
/// # Semantics
///
/// - Every declared field must match (AND). Field order is irrelevant.
/// - Undeclared subject attributes are ignored.
/// - An empty predicate matches every subject.
///
/// # Example
///
/// ```
/// use decider::{Predicate, Subject};
///
/// let admin = Predicate::new().with("hasAccess", true).with("isAdmin", true);
///
/// assert!(admin.matches(&Subject::new().with("hasAccess", true).with("isAdmin", true)));
/// assert!(!admin.matches(&Subject::new().with("hasAccess", true)));
/// assert!(Predicate::new().matches(&Subject::new().with("anything", 1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Predicate {
    fields: BTreeMap<String, FieldMatch>,
}

impl Predicate {
    /// Create an empty predicate (matches everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key` to equal `value` (builder pattern).
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_field(key, FieldMatch::exact(value))
    }

    /// Require `key` to equal one of `values` (builder pattern).
    #[must_use]
    pub fn with_one_of<I, V>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with_field(key, FieldMatch::one_of(values))
    }

    /// Set the condition for `key`, replacing any previous one.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, field: FieldMatch) -> Self {
        self.fields.insert(key.into(), field);
        self
    }

    /// Look up the condition declared for `key`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldMatch> {
        self.fields.get(key)
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the declared fields, sorted by key.
    ///
    /// ```
    /// use decider::{FieldMatch, Predicate};
    ///
    /// let pred = Predicate::new().with("isAdmin", true).with("hasAccess", true);
    /// let keys: Vec<&str> = pred.iter().map(|(k, _)| k).collect();
    /// assert_eq!(keys, ["hasAccess", "isAdmin"]);
    /// assert!(pred.iter().all(|(_, f)| *f == FieldMatch::exact(true)));
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldMatch)> {
        self.fields.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Evaluate with set-membership semantics for `OneOf` fields.
    #[must_use]
    pub fn matches(&self, subject: &Subject) -> bool {
        self.matches_with(subject, FieldSemantics::Membership)
    }

    /// Evaluate with exact-only semantics: `OneOf` fields compare as lists.
    #[must_use]
    pub fn matches_literal(&self, subject: &Subject) -> bool {
        self.matches_with(subject, FieldSemantics::Literal)
    }

    pub(crate) fn matches_with(&self, subject: &Subject, semantics: FieldSemantics) -> bool {
        self.fields
            .iter()
            .all(|(key, field)| field.matches_with(subject.get(key), semantics))
    }

    /// Evaluate every field (no short-circuit) and record each outcome.
    pub(crate) fn trace_fields(
        &self,
        subject: &Subject,
        semantics: FieldSemantics,
    ) -> Vec<FieldTrace> {
        self.fields
            .iter()
            .map(|(key, field)| {
                let actual = subject.get(key);
                FieldTrace {
                    key: key.clone(),
                    expected: field.clone(),
                    actual: actual.clone(),
                    matched: field.matches_with(actual, semantics),
                }
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldMatch)> for Predicate {
    fn from_iter<I: IntoIterator<Item = (K, FieldMatch)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, f)| (k.into(), f)).collect(),
        }
    }
}

/// A sequence deserializes as `OneOf`; anything else as `Exact`.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FieldMatch {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match <Value as serde::Deserialize>::deserialize(deserializer)? {
            Value::List(items) => Self::OneOf(items),
            other => Self::Exact(other),
        })
    }
}
