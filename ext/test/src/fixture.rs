//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against either matcher. A fixture pairs
//! a ruleset document (the same shape [`RulesetConfig`] loads) with subjects
//! and their expected outcomes.
//!
//! ```yaml
//! name: strict_mode
//! matcher: decider            # or simple_decider
//! ruleset:
//!   rules:
//!     - { rule: { hasAccess: true }, result: "Strict User", strict: true }
//! cases:
//!   - name: extra key rejects
//!     subject: { hasAccess: true, extraProperty: "extra" }
//!     expect_error: "No matching rule found for the provided subject."
//! ```

use decider::prelude::*;
use decider::RulesetConfig;
use serde::Deserialize;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub matcher: MatcherKind,
    pub ruleset: RulesetConfig<String>,
    pub cases: Vec<TestCase>,
}

/// Which matcher profile a fixture runs against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    #[default]
    Decider,
    SimpleDecider,
}

/// One subject and its expected outcome.
///
/// Exactly one of `expect`, `expect_all` and `expect_error` must be set.
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    #[serde(default)]
    pub subject: Subject,
    #[serde(default)]
    pub expect: Option<String>,
    #[serde(default)]
    pub expect_all: Option<Vec<String>>,
    #[serde(default)]
    pub expect_error: Option<String>,
}

/// What an evaluation produced, flattened for comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    One(String),
    All(Vec<String>),
    Error(String),
}

impl TestCase {
    /// The expected outcome, or `None` if the case sets zero or several expectations
    pub fn expected(&self) -> Option<Outcome> {
        match (&self.expect, &self.expect_all, &self.expect_error) {
            (Some(one), None, None) => Some(Outcome::One(one.clone())),
            (None, Some(all), None) => Some(Outcome::All(all.clone())),
            (None, None, Some(err)) => Some(Outcome::Error(err.clone())),
            _ => None,
        }
    }
}

impl From<Result<Decision<String>, NoMatchError>> for Outcome {
    fn from(result: Result<Decision<String>, NoMatchError>) -> Self {
        match result {
            Ok(Decision::One(r)) => Outcome::One(r),
            Ok(Decision::All(rs)) => Outcome::All(rs),
            Err(e) => Outcome::Error(e.to_string()),
        }
    }
}

impl From<Result<String, NoMatchError>> for Outcome {
    fn from(result: Result<String, NoMatchError>) -> Self {
        match result {
            Ok(r) => Outcome::One(r),
            Err(e) => Outcome::Error(e.to_string()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Option<Outcome>,
    pub actual: Outcome,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases and return results
    pub fn run(&self) -> Vec<CaseResult> {
        let evaluate: Box<dyn Fn(&Subject) -> Outcome> = match self.matcher {
            MatcherKind::Decider => {
                let decider = self.ruleset.clone().into_decider();
                Box::new(move |subject: &Subject| Outcome::from(decider.evaluate(subject)))
            }
            MatcherKind::SimpleDecider => {
                let decider = self.ruleset.clone().into_simple_decider();
                Box::new(move |subject: &Subject| Outcome::from(decider.evaluate(subject)))
            }
        };

        self.cases
            .iter()
            .map(|case| {
                let expected = case.expected();
                let actual = evaluate(&case.subject);
                CaseResult {
                    case_name: case.name.clone(),
                    passed: expected.as_ref() == Some(&actual),
                    expected,
                    actual,
                }
            })
            .collect()
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        let results = self.run();
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?}, got {:?}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRICT: &str = r#"
name: strict_mode
ruleset:
  rules:
    - { rule: { hasAccess: true }, result: "Strict User", strict: true }
cases:
  - name: extra key rejects
    subject: { hasAccess: true, extraProperty: "extra" }
    expect_error: "No matching rule found for the provided subject."
  - name: exact key set matches
    subject: { hasAccess: true }
    expect: "Strict User"
"#;

    #[test]
    fn parse_and_run_fixture() {
        let fixture = Fixture::from_yaml(STRICT).unwrap();
        assert_eq!(fixture.matcher, MatcherKind::Decider);
        assert_eq!(fixture.cases.len(), 2);
        fixture.run_and_assert();
    }

    #[test]
    fn case_without_expectation_fails() {
        let yaml = r#"
name: missing_expectation
ruleset:
  rules: []
cases:
  - name: nothing expected
    subject: {}
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        let results = fixture.run();
        assert!(!results[0].passed);
        assert_eq!(
            results[0].actual,
            Outcome::Error("No matching rule found for the provided subject.".into())
        );
    }

    #[test]
    fn parse_multi_document() {
        let yaml = format!("{STRICT}\n---\n{STRICT}");
        let fixtures = Fixture::from_yaml_multi(&yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
    }
}
