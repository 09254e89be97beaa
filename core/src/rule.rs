//! `Rule`: Predicate + result combination
//!
//! A ruleset is an ordered `Vec<Rule<R>>`; position in that list is priority.

use crate::{Predicate, Subject};

/// A rule: predicate, result, and strict flag.
///
/// # Strict mode
///
/// A strict rule is disqualified whenever the subject has **more keys** than
/// the predicate declares. Only the key counts are compared: a subject with
/// the same number of keys but different names is not rejected by this
/// check (it then fails or passes on the fields alone). The simplified
/// matcher ignores this flag.
///
/// # Example
///
/// ```
/// use decider::{Predicate, Rule, Subject};
///
/// let rule = Rule::new(Predicate::new().with("hasAccess", true), "Strict User").strict();
///
/// assert!(rule.matches(&Subject::new().with("hasAccess", true)));
/// assert!(!rule.matches(&Subject::new().with("hasAccess", true).with("extra", "x")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rule<R> {
    /// The condition gating this rule.
    pub predicate: Predicate,

    /// What the matcher returns when the predicate matches.
    pub result: R,

    /// Reject subjects carrying more keys than the predicate declares.
    pub strict: bool,
}

impl<R> Rule<R> {
    /// Create a new, non-strict rule.
    pub fn new(predicate: Predicate, result: R) -> Self {
        Self {
            predicate,
            result,
            strict: false,
        }
    }

    /// Mark this rule strict (builder pattern).
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Set the strict flag explicitly (builder pattern).
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns `true` if strict mode rejects `subject` before any field is checked.
    #[must_use]
    pub fn rejects_by_key_count(&self, subject: &Subject) -> bool {
        self.strict && subject.len() > self.predicate.len()
    }

    /// Full-matcher evaluation: strict guard, then set-membership fields.
    #[must_use]
    pub fn matches(&self, subject: &Subject) -> bool {
        !self.rejects_by_key_count(subject) && self.predicate.matches(subject)
    }
}
