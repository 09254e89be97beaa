//! decider - ordered rule matching over flat subjects
//!
//! Given an ordered ruleset of (predicate, result) pairs and a subject (a flat
//! map of attribute name to value), decide which rule matches and return its
//! result.
//!
//! # Architecture
//!
//! - [`Value`]: Closed value type for subject attributes and expectations
//! - [`Subject`]: The flat attribute map being evaluated (read-only)
//! - [`FieldMatch`]: One predicate field: `Exact(value)` or `OneOf(values)`
//! - [`Predicate`]: All declared fields must match (AND)
//! - [`Rule<R>`]: Predicate + result + strict flag
//! - [`Decider<R>`]: Full matcher: sets, strict mode, first-match or all-matches
//! - [`SimpleDecider<R>`]: Exact-only, first-match-wins profile
//!
//! # Key Design Insights
//!
//! 1. **Ruleset order is priority**: the matchers never reorder rules. The
//!    lowest-index match wins, or all matches come back in ruleset order.
//!
//! 2. **"No value" states are distinct**: an absent key reads as
//!    [`Value::Undefined`], which differs from [`Value::Null`] and `false`.
//!    A rule treats them alike only by listing them in a `OneOf`.
//!
//! 3. **Stateless evaluation**: a constructed matcher never mutates; it is
//!    `Send + Sync` whenever its result type is.
//!
//! # Example
//!
//! ```
//! use decider::prelude::*;
//!
//! let rules = vec![
//!     Rule::new(
//!         Predicate::new().with_one_of("hasAccess", [Value::Bool(false), Value::Undefined, Value::Null]),
//!         "Access Denied",
//!     ),
//!     Rule::new(
//!         Predicate::new().with("hasAccess", true).with("isAdmin", true),
//!         "Admin Access Granted",
//!     ),
//!     Rule::new(Predicate::new().with("hasAccess", true), "User Access Granted"),
//! ];
//!
//! let decide = decider(rules, DeciderOptions::new());
//!
//! assert_eq!(decide(&Subject::new()), Ok(Decision::One("Access Denied")));
//! assert_eq!(
//!     decide(&Subject::new().with("hasAccess", true)),
//!     Ok(Decision::One("User Access Granted"))
//! );
//! ```
//!
//! # Features
//!
//! - `serde`: `Deserialize` for [`Value`], [`Subject`], [`FieldMatch`], [`Predicate`]
//! - `config`: JSON/YAML ruleset documents ([`RulesetConfig`])

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod decider;
mod predicate;
mod rule;
mod simple;
mod subject;
mod trace;
mod value;

#[cfg(feature = "config")]
mod config;

#[cfg(test)]
mod testing;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use predicate::{FieldMatch, Predicate};
pub use rule::Rule;
pub use subject::Subject;
pub use value::Value;

// Matchers
pub use decider::{decider, Decider, DeciderOptions, Decision};
pub use simple::{simple_decider, SimpleDecider, SimpleDeciderOptions};

// Config (feature-gated)
#[cfg(feature = "config")]
pub use config::{ConfigError, RuleConfig, RulesetConfig};

// Trace types
pub use trace::{EvalTrace, FieldTrace, RuleTrace};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use decider::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Matchers
        decider,
        simple_decider,
        Decider,
        DeciderOptions,
        Decision,
        // Trace types
        EvalTrace,
        // Core types
        FieldMatch,
        FieldTrace,
        // Errors
        NoMatchError,
        Predicate,
        Rule,
        RuleTrace,
        SimpleDecider,
        SimpleDeciderOptions,
        Subject,
        Value,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// No rule matched the subject and no default result was configured.
///
/// Each matcher profile reports its own fixed message; existing callers
/// compare against these strings, so they must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum NoMatchError {
    /// Raised by [`Decider`].
    #[error("No matching rule found for the provided subject.")]
    Decider,

    /// Raised by [`SimpleDecider`].
    #[error("No matching rule found.")]
    SimpleDecider,
}
