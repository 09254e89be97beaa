//! Evaluation trace types for debugging ruleset behavior.
//!
//! Use `evaluate_with_trace()` on [`Decider`](crate::Decider) or
//! [`SimpleDecider`](crate::SimpleDecider) to see which rules were examined,
//! which fields matched, and whether the default result was used.
//!
//! # Example
//!
//! ```ignore
//! let trace = decider.evaluate_with_trace(&subject);
//! println!("Result: {:?}", trace.result);
//! for step in &trace.steps {
//!     println!("  rule[{}]: matched={}", step.index, step.matched);
//! }
//! ```

use crate::{FieldMatch, NoMatchError, Value};

/// Trace of one predicate field against one subject attribute.
///
/// Every field of an examined rule is evaluated (no short-circuit), so a
/// failing rule shows all of its mismatches at once.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTrace {
    /// The attribute name.
    pub key: String,
    /// The declared condition.
    pub expected: FieldMatch,
    /// The subject's value (`Undefined` when absent).
    pub actual: Value,
    /// Whether this field matched.
    pub matched: bool,
}

/// One rule's evaluation in a trace.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTrace {
    /// Index in the ruleset (0-based).
    pub index: usize,
    /// Did the rule match?
    pub matched: bool,
    /// The strict key-count guard rejected the subject.
    pub rejected_by_strict: bool,
    /// Per-field outcomes, sorted by key.
    pub fields: Vec<FieldTrace>,
}

/// Trace of a full evaluation.
///
/// # INV: `result` == `evaluate()` result
///
/// The `result` field always equals what `evaluate()` returns for the same
/// subject. In first-match mode, `steps` stops after the first matching rule.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalTrace<T> {
    /// The final outcome (identical to what `evaluate()` returns).
    pub result: Result<T, NoMatchError>,
    /// Each rule that was examined, in ruleset order.
    pub steps: Vec<RuleTrace>,
    /// Whether the default result was returned.
    pub used_default: bool,
}

impl<T> EvalTrace<T> {
    /// Indices of the rules that matched, in ruleset order.
    #[must_use]
    pub fn matched_indices(&self) -> Vec<usize> {
        self.steps
            .iter()
            .filter(|s| s.matched)
            .map(|s| s.index)
            .collect()
    }
}
