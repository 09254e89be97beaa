//! `SimpleDecider`: exact-match, first-match-wins profile
//!
//! A reduced matcher for plain exact-match policies: no set semantics, no
//! strict mode, no all-matches mode.

use crate::{predicate::FieldSemantics, EvalTrace, NoMatchError, Rule, RuleTrace, Subject};

/// Construction options for a [`SimpleDecider`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleDeciderOptions<R> {
    /// Returned when no rule matches. `None` means evaluation fails instead.
    pub default_result: Option<R>,
}

impl<R> Default for SimpleDeciderOptions<R> {
    fn default() -> Self {
        Self {
            default_result: None,
        }
    }
}

impl<R> SimpleDeciderOptions<R> {
    /// No default.
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
}

/// The simplified matcher.
///
/// Every predicate field is compared with plain equality. A
/// [`FieldMatch::OneOf`](crate::FieldMatch::OneOf) field is **not** a set
/// here: it only matches a subject attribute that is an equal list. The
/// `strict` flag on rules is ignored.
///
/// # Example
///
/// ```
/// use decider::prelude::*;
///
/// let decide = SimpleDecider::new(
///     vec![
///         Rule::new(Predicate::new().with("hasAccess", false), "Access Denied"),
///         Rule::new(Predicate::new().with("hasAccess", true), "User Access Granted"),
///     ],
///     SimpleDeciderOptions::new(),
/// );
///
/// assert_eq!(decide.evaluate(&Subject::new().with("hasAccess", false)), Ok("Access Denied"));
/// assert_eq!(
///     decide.evaluate(&Subject::new()).unwrap_err().to_string(),
///     "No matching rule found."
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SimpleDecider<R> {
    rules: Vec<Rule<R>>,
    default_result: Option<R>,
}

impl<R> SimpleDecider<R> {
    /// Create a new simplified matcher.
    pub fn new(rules: Vec<Rule<R>>, options: SimpleDeciderOptions<R>) -> Self {
        let strict_rules = rules.iter().filter(|r| r.strict).count();
        if strict_rules > 0 {
            tracing::warn!(
                strict_rules,
                "simple decider ignores strict mode; strict flags have no effect"
            );
        }
        tracing::debug!(
            rules = rules.len(),
            has_default = options.default_result.is_some(),
            "simple decider constructed"
        );
        Self {
            rules,
            default_result: options.default_result,
        }
    }

    /// The ruleset, in priority order.
    ///
    /// ```
    /// use decider::prelude::*;
    ///
    /// let decider = SimpleDecider::new(
    ///     vec![Rule::new(Predicate::new().with("hasAccess", true), "granted").strict()],
    ///     SimpleDeciderOptions::new(),
    /// );
    /// assert_eq!(decider.rules().len(), 1);
    /// assert!(decider.rules()[0].strict);
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
    /// let options = SimpleDeciderOptions::new().default_result("fallback");
    /// assert!(SimpleDecider::<&str>::new(vec![], options).has_default());
    /// assert!(!SimpleDecider::<&str>::new(vec![], SimpleDeciderOptions::new()).has_default());
    /// ```
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default_result.is_some()
    }
}

impl<R: Clone> SimpleDecider<R> {
    /// Return the result of the first rule whose predicate equals the subject's values.
    ///
    /// # Errors
    ///
    /// Returns [`NoMatchError::SimpleDecider`] when no rule matches and no
    /// default result is configured.
    pub fn evaluate(&self, subject: &Subject) -> Result<R, NoMatchError> {
        // First-match-wins
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.predicate.matches_literal(subject) {
                tracing::trace!(index, "first matching rule");
                return Ok(rule.result.clone());
            }
        }
        self.fallback()
    }

    /// Evaluate with a full trace for debugging.
    ///
    /// `trace.result` equals what [`evaluate`](Self::evaluate) returns.
    #[must_use]
    pub fn evaluate_with_trace(&self, subject: &Subject) -> EvalTrace<R> {
        let mut steps = Vec::new();

        for (index, rule) in self.rules.iter().enumerate() {
            let fields = rule
                .predicate
                .trace_fields(subject, FieldSemantics::Literal);
            let matched = fields.iter().all(|f| f.matched);
            steps.push(RuleTrace {
                index,
                matched,
                rejected_by_strict: false,
                fields,
            });

            if matched {
                return EvalTrace {
                    result: Ok(rule.result.clone()),
                    steps,
                    used_default: false,
                };
            }
        }

        EvalTrace {
            result: self.fallback(),
            steps,
            used_default: self.default_result.is_some(),
        }
    }

    /// Consume this matcher into a reusable evaluation function.
    pub fn into_fn(self) -> impl Fn(&Subject) -> Result<R, NoMatchError> {
        move |subject: &Subject| self.evaluate(subject)
    }

    fn fallback(&self) -> Result<R, NoMatchError> {
        match &self.default_result {
            Some(default) => {
                tracing::debug!("no rule matched, returning default result");
                Ok(default.clone())
            }
            None => {
                tracing::debug!(rules = self.rules.len(), "no rule matched and no default result");
                Err(NoMatchError::SimpleDecider)
            }
        }
    }
}

/// Build a simplified matcher and return its evaluation function.
pub fn simple_decider<R: Clone>(
    rules: Vec<Rule<R>>,
    options: SimpleDeciderOptions<R>,
) -> impl Fn(&Subject) -> Result<R, NoMatchError> {
    SimpleDecider::new(rules, options).into_fn()
}
