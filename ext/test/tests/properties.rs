//! Exhaustive property checks over a small attribute space.
//!
//! Every subject built from three attributes, each `true`, `false`, `null`
//! or absent, is evaluated against the reference ruleset and compared with a
//! direct reading of the selection policy.

use decider_test::prelude::*;

const KEYS: [&str; 3] = ["hasAccess", "isAdmin", "isManager"];

fn states() -> [Option<Value>; 4] {
    [
        Some(Value::Bool(true)),
        Some(Value::Bool(false)),
        Some(Value::Null),
        None,
    ]
}

fn all_subjects() -> Vec<Subject> {
    let mut subjects = Vec::new();
    for a in states() {
        for b in states() {
            for c in states() {
                let mut subject = Subject::new();
                for (key, state) in KEYS.iter().zip([a.clone(), b.clone(), c.clone()]) {
                    if let Some(value) = state {
                        subject.insert(*key, value);
                    }
                }
                subjects.push(subject);
            }
        }
    }
    subjects
}

fn matching_results(rules: &[Rule<String>], subject: &Subject) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| rule.matches(subject))
        .map(|rule| rule.result.clone())
        .collect()
}

#[test]
fn first_match_is_lowest_index_match() {
    let rules = access_control_rules();
    let decider = Decider::new(rules.clone(), DeciderOptions::new());

    for subject in all_subjects() {
        let expected = matching_results(&rules, &subject)
            .into_iter()
            .next()
            .map(Decision::One)
            .ok_or(NoMatchError::Decider);
        assert_eq!(decider.evaluate(&subject), expected, "subject {subject:?}");
    }
}

#[test]
fn all_matches_lists_every_match_in_order() {
    let rules = access_control_rules();
    let decider = Decider::new(rules.clone(), DeciderOptions::new().return_all_matches(true));

    for subject in all_subjects() {
        let matches = matching_results(&rules, &subject);
        match decider.evaluate(&subject) {
            Ok(Decision::All(results)) => assert_eq!(results, matches),
            other => {
                assert!(matches.is_empty(), "subject {subject:?} gave {other:?}");
                assert_eq!(other, Err(NoMatchError::Decider));
            }
        }
    }
}

#[test]
fn default_covers_every_miss() {
    let decider = Decider::new(
        access_control_rules(),
        DeciderOptions::new().default_result("Default Access".to_string()),
    );
    for subject in all_subjects() {
        assert!(decider.evaluate(&subject).is_ok(), "subject {subject:?}");
    }
}

#[test]
fn simple_decider_agrees_on_exact_only_rules() {
    // Without OneOf fields or strict flags, both profiles pick the same rule.
    let rules: Vec<Rule<String>> = access_control_rules().into_iter().skip(1).collect();
    let full = Decider::new(rules.clone(), DeciderOptions::new());
    let simple = SimpleDecider::new(rules, SimpleDeciderOptions::new());

    for subject in all_subjects() {
        match (full.evaluate(&subject), simple.evaluate(&subject)) {
            (Ok(Decision::One(a)), Ok(b)) => assert_eq!(a, b),
            (Err(NoMatchError::Decider), Err(NoMatchError::SimpleDecider)) => {}
            (a, b) => panic!("profiles disagree on {subject:?}: {a:?} vs {b:?}"),
        }
    }
}

#[test]
fn trace_agrees_with_evaluate_everywhere() {
    let first = Decider::new(access_control_rules(), DeciderOptions::new());
    let all = Decider::new(
        access_control_rules(),
        DeciderOptions::new().return_all_matches(true),
    );
    let simple = SimpleDecider::new(access_control_rules(), SimpleDeciderOptions::new());

    for subject in all_subjects() {
        assert_eq!(first.evaluate_with_trace(&subject).result, first.evaluate(&subject));
        assert_eq!(all.evaluate_with_trace(&subject).result, all.evaluate(&subject));
        assert_eq!(simple.evaluate_with_trace(&subject).result, simple.evaluate(&subject));
    }
}

#[test]
fn strict_rule_rejects_any_extra_key() {
    let rules = vec![
        Rule::new(Predicate::new().with("hasAccess", true), "Strict User".to_string()).strict(),
    ];
    let decider = Decider::new(rules, DeciderOptions::new());

    for subject in all_subjects() {
        let expected_match =
            subject.len() <= 1 && subject.get("hasAccess") == &Value::Bool(true);
        assert_eq!(decider.evaluate(&subject).is_ok(), expected_match, "subject {subject:?}");
    }
}

#[cfg(feature = "fixtures")]
#[test]
fn yaml_ruleset_behaves_like_builder_ruleset() {
    use decider::RulesetConfig;

    const YAML: &str = r#"
rules:
  - rule: { hasAccess: [false, { undefined: true }, null] }
    result: "Access Denied"
  - rule: { hasAccess: true, isAdmin: true, isManager: true }
    result: "Admin and Manager Access Granted"
  - rule: { hasAccess: true, isAdmin: true }
    result: "Admin Access Granted"
  - rule: { hasAccess: true, isManager: true }
    result: "Manager Access Granted"
  - rule: { hasAccess: true }
    result: "User Access Granted"
"#;

    let config = RulesetConfig::<String>::from_yaml_str(YAML).expect("valid ruleset");
    assert_eq!(config.clone().into_rules(), access_control_rules());

    let loaded = config.into_decider();
    let built = Decider::new(access_control_rules(), DeciderOptions::new());
    for subject in all_subjects() {
        assert_eq!(loaded.evaluate(&subject), built.evaluate(&subject), "subject {subject:?}");
    }
}
