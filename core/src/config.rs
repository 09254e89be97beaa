//! Config types for document-driven ruleset construction.
//!
//! These types mirror the runtime types but are serde-deserializable, so a
//! ruleset can be authored as JSON or YAML and loaded into a matcher.
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type | Conversion |
//! |-------------|-------------|------------|
//! | [`RulesetConfig`] | [`Decider`] / [`SimpleDecider`] | `into_decider()` / `into_simple_decider()` |
//! | [`RuleConfig`] | [`Rule`] | `From` |
//!
//! # Document shape
//!
//! ```yaml
//! default_result: "Default Access"
//! return_all_matches: false
//! rules:
//!   - rule: { hasAccess: [false, { undefined: true }, null] }
//!     result: "Access Denied"
//!   - rule: { hasAccess: true }
//!     result: "User Access Granted"
//!     strict: true
//! ```
//!
//! A scalar field value is an exact match; a sequence is a
//! [`FieldMatch::OneOf`](crate::FieldMatch::OneOf). `{ undefined: true }`
//! spells [`Value::Undefined`](crate::Value::Undefined).

use crate::{Decider, DeciderOptions, Predicate, Rule, SimpleDecider, SimpleDeciderOptions};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Errors from loading a ruleset document.
///
/// These happen at load time, never during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document is malformed or has the wrong shape.
    #[error("invalid JSON ruleset: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML document is malformed or has the wrong shape.
    #[error("invalid YAML ruleset: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration for a whole ruleset plus its matcher options.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
pub struct RulesetConfig<R> {
    /// Rules in priority order.
    pub rules: Vec<RuleConfig<R>>,

    /// Fallback result when no rule matches.
    #[serde(default, alias = "defaultResult")]
    pub default_result: Option<R>,

    /// Return every matching result (full matcher only).
    #[serde(default, alias = "returnAllMatches")]
    pub return_all_matches: bool,
}

/// Configuration for a [`Rule`].
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
pub struct RuleConfig<R> {
    /// The predicate, as a map of attribute name to value or list of values.
    pub rule: Predicate,

    /// The result returned when the predicate matches.
    pub result: R,

    /// Reject subjects with more keys than the predicate declares.
    #[serde(default)]
    pub strict: bool,
}

impl<R> From<RuleConfig<R>> for Rule<R> {
    fn from(config: RuleConfig<R>) -> Self {
        Rule::new(config.rule, config.result).with_strict(config.strict)
    }
}

impl<R: DeserializeOwned> RulesetConfig<R> {
    /// Parse a JSON ruleset document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a YAML ruleset document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the document is malformed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

impl<R> RulesetConfig<R> {
    /// Convert the rules, preserving order.
    #[must_use]
    pub fn into_rules(self) -> Vec<Rule<R>> {
        self.rules.into_iter().map(Rule::from).collect()
    }

    /// Build a full matcher from this configuration.
    #[must_use]
    pub fn into_decider(self) -> Decider<R> {
        let options = DeciderOptions {
            default_result: self.default_result,
            return_all_matches: self.return_all_matches,
        };
        let rules = self.rules.into_iter().map(Rule::from).collect();
        Decider::new(rules, options)
    }

    /// Build a simplified matcher from this configuration.
    ///
    /// `return_all_matches` has no meaning for the simplified matcher and is ignored.
    #[must_use]
    pub fn into_simple_decider(self) -> SimpleDecider<R> {
        if self.return_all_matches {
            tracing::warn!("simple decider ignores return_all_matches");
        }
        let options = SimpleDeciderOptions {
            default_result: self.default_result,
        };
        let rules = self.rules.into_iter().map(Rule::from).collect();
        SimpleDecider::new(rules, options)
    }
}
