//! Decider: the full matcher
//!
//! Evaluates an ordered ruleset against a subject with set-valued fields,
//! per-rule strict mode, first-match or all-matches selection, and an
//! optional default result.

use crate::{predicate::FieldSemantics, EvalTrace, NoMatchError, Rule, RuleTrace, Subject};
use std::slice;

/// What a [`Decider`] returns on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision<R> {
    /// The result of the first matching rule (or the default result).
    One(R),

    /// The results of every matching rule, in ruleset order (or `[default]`).
    ///
    /// Never empty.
    All(Vec<R>),
}

impl<R> Decision<R> {
    /// Returns `true` if this came from all-matches mode.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All(_))
    }

    /// The single result, if this is a `One`.
    #[must_use]
    pub fn one(self) -> Option<R> {
        match self {
            Self::One(r) => Some(r),
            Self::All(_) => None,
        }
    }

    /// All results as a slice; a `One` is a one-element slice.
    #[must_use]
    pub fn as_slice(&self) -> &[R] {
        match self {
            Self::One(r) => slice::from_ref(r),
            Self::All(rs) => rs,
        }
    }

    /// All results as a vector; a `One` becomes a one-element vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<R> {
        match self {
            Self::One(r) => vec![r],
            Self::All(rs) => rs,
        }
    }
}

/// Construction options for a [`Decider`].
///
/// `default_result: None` means "no default": evaluation then fails with
/// [`NoMatchError`] when nothing matches. Any `Some` value is a real default,
/// including falsy ones.
#[derive(Debug, Clone, PartialEq)]
pub struct DeciderOptions<R> {
    /// Returned when no rule matches.
    pub default_result: Option<R>,

    /// Return every matching result instead of only the first.
    pub return_all_matches: bool,
}

impl<R> Default for DeciderOptions<R> {
    fn default() -> Self {
        Self {
            default_result: None,
            return_all_matches: false,
        }
    }
}

impl<R> DeciderOptions<R> {
    /// No default, first-match mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default result (builder pattern).
    #[must_use]
    pub fn default_result(mut self, result: R) -> Self {
        self.default_result = Some(result);
        self
    }

    /// Enable or disable all-matches mode (builder pattern).
    #[must_use]
    pub fn return_all_matches(mut self, enabled: bool) -> Self {
        self.return_all_matches = enabled;
        self
    }
}

/// The full matcher.
///
/// Built once from a ruleset and options, then evaluated against any number
/// of subjects. Evaluation never mutates the ruleset or the subject, so a
/// `Decider` can be shared across threads freely.
///
/// # INV: ruleset order is priority
///
/// Rules are examined in the order given and never reordered. In first-match
/// mode the lowest-index matching rule wins; in all-matches mode results come
/// back in ruleset order.
///
/// # Example
///
/// ```
/// use decider::prelude::*;
///
/// let decider = Decider::new(
///     vec![
///         Rule::new(Predicate::new().with("hasAccess", false), "Access Denied"),
///         Rule::new(
///             Predicate::new().with("hasAccess", true).with("isAdmin", true),
///             "Admin Access Granted",
///         ),
///         Rule::new(Predicate::new().with("hasAccess", true), "User Access Granted"),
///     ],
///     DeciderOptions::new(),
/// );
///
/// let subject = Subject::new().with("hasAccess", true).with("isAdmin", true);
/// assert_eq!(decider.evaluate(&subject), Ok(Decision::One("Admin Access Granted")));
///
/// let err = decider.evaluate(&Subject::new().with("isAdmin", true)).unwrap_err();
/// assert_eq!(err.to_string(), "No matching rule found for the provided subject.");
/// ```
#[derive(Debug, Clone)]
pub struct Decider<R> {
    rules: Vec<Rule<R>>,
    default_result: Option<R>,
    return_all_matches: bool,
}

impl<R> Decider<R> {
    /// Create a new full matcher.
    pub fn new(rules: Vec<Rule<R>>, options: DeciderOptions<R>) -> Self {
        tracing::debug!(
            rules = rules.len(),
            strict_rules = rules.iter().filter(|r| r.strict).count(),
            has_default = options.default_result.is_some(),
            return_all_matches = options.return_all_matches,
            "decider constructed"
        );
        Self {
            rules,
            default_result: options.default_result,
            return_all_matches: options.return_all_matches,
        }
    }

    /// The ruleset, in priority order.
    ///
    /// ```
    /// use decider::prelude::*;
    ///
    /// let decider = Decider::new(
    ///     vec![
    ///         Rule::new(Predicate::new().with("hasAccess", false), "denied"),
    ///         Rule::new(Predicate::new().with("hasAccess", true), "granted"),
    ///     ],
    ///     DeciderOptions::new(),
    /// );
    /// let results: Vec<&str> = decider.rules().iter().map(|r| r.result).collect();
    /// assert_eq!(results, ["denied", "granted"]);
    /// ```
    #[must_use]
    pub fn rules(&self) -> &[Rule<R>] {
        &self.rules
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns `true` if a default result is configured.
    ///
    /// ```
    /// use decider::prelude::*;
    ///
    /// let with_default = Decider::<&str>::new(vec![], DeciderOptions::new().default_result("x"));
    /// assert!(with_default.has_default());
    /// assert!(!Decider::<&str>::new(vec![], DeciderOptions::new()).has_default());
    /// ```
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default_result.is_some()
    }

    /// Returns `true` if all-matches mode is enabled.
    ///
    /// ```
    /// use decider::prelude::*;
    ///
    /// let all = Decider::<&str>::new(vec![], DeciderOptions::new().return_all_matches(true));
    /// assert!(all.returns_all_matches());
    /// assert!(!Decider::<&str>::new(vec![], DeciderOptions::new()).returns_all_matches());
    /// ```
    #[must_use]
    pub fn returns_all_matches(&self) -> bool {
        self.return_all_matches
    }
}

impl<R: Clone> Decider<R> {
    /// Evaluate the ruleset against `subject`.
    ///
    /// # Errors
    ///
    /// Returns [`NoMatchError::Decider`] when no rule matches and no default
    /// result is configured.
    pub fn evaluate(&self, subject: &Subject) -> Result<Decision<R>, NoMatchError> {
        let mut matching = self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.matches(subject));

        if self.return_all_matches {
            let results: Vec<R> = matching.map(|(_, rule)| rule.result.clone()).collect();
            if !results.is_empty() {
                tracing::trace!(matched = results.len(), "rules matched");
                return Ok(Decision::All(results));
            }
        } else if let Some((index, rule)) = matching.next() {
            tracing::trace!(index, "first matching rule");
            return Ok(Decision::One(rule.result.clone()));
        }

        self.fallback()
    }

    /// Evaluate with a full trace for debugging.
    ///
    /// `trace.result` equals what [`evaluate`](Self::evaluate) returns.
    #[must_use]
    pub fn evaluate_with_trace(&self, subject: &Subject) -> EvalTrace<Decision<R>> {
        let mut steps = Vec::new();
        let mut results = Vec::new();

        for (index, rule) in self.rules.iter().enumerate() {
            let rejected_by_strict = rule.rejects_by_key_count(subject);
            let fields = rule
                .predicate
                .trace_fields(subject, FieldSemantics::Membership);
            let matched = !rejected_by_strict && fields.iter().all(|f| f.matched);

            steps.push(RuleTrace {
                index,
                matched,
                rejected_by_strict,
                fields,
            });

            if matched {
                results.push(rule.result.clone());
                if !self.return_all_matches {
                    break;
                }
            }
        }

        let used_default = results.is_empty() && self.default_result.is_some();
        let result = if results.is_empty() {
            self.fallback()
        } else if self.return_all_matches {
            Ok(Decision::All(results))
        } else {
            results
                .into_iter()
                .next()
                .map_or_else(|| self.fallback(), |r| Ok(Decision::One(r)))
        };

        EvalTrace {
            result,
            steps,
            used_default,
        }
    }

    /// Consume this matcher into a reusable evaluation function.
    pub fn into_fn(self) -> impl Fn(&Subject) -> Result<Decision<R>, NoMatchError> {
        move |subject: &Subject| self.evaluate(subject)
    }

    fn fallback(&self) -> Result<Decision<R>, NoMatchError> {
        match &self.default_result {
            Some(default) => {
                tracing::debug!("no rule matched, returning default result");
                Ok(if self.return_all_matches {
                    Decision::All(vec![default.clone()])
                } else {
                    Decision::One(default.clone())
                })
            }
            None => {
                tracing::debug!(rules = self.rules.len(), "no rule matched and no default result");
                Err(NoMatchError::Decider)
            }
        }
    }
}

/// Build a full matcher and return its evaluation function.
///
/// # Example
///
/// ```
/// use decider::prelude::*;
///
/// let decide = decider(
///     vec![Rule::new(Predicate::new().with("hasAccess", true), "User Access Granted")],
///     DeciderOptions::new().default_result("Default Access"),
/// );
///
/// assert_eq!(decide(&Subject::new()), Ok(Decision::One("Default Access")));
/// ```
pub fn decider<R: Clone>(
    rules: Vec<Rule<R>>,
    options: DeciderOptions<R>,
) -> impl Fn(&Subject) -> Result<Decision<R>, NoMatchError> {
    Decider::new(rules, options).into_fn()
}
