//! Property tests: evaluation outcomes are deterministic.
//!
//! The conflict-resolution order (priority descending, identifier
//! ascending) is total, so neither repeated evaluation nor the declaration
//! order of rules in the source file may change an outcome.

use agro_engine::EvaluationSession;
use agro_rules::{Condition, Effect, Rule, RuleSet};
use agro_types::ParcelObservation;
use proptest::prelude::*;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_condition() -> impl Strategy<Value = Condition> {
    prop_oneof![
        (0.0f64..100.0).prop_map(Condition::SoilMoistureBelow),
        (0.0f64..100.0).prop_map(Condition::SoilMoistureAbove),
        (-10.0f64..45.0).prop_map(Condition::TemperatureAbove),
        prop_oneof![
            Just("flowering"),
            Just("tillering"),
            Just("ripening"),
        ]
        .prop_map(|s| Condition::GrowthStageIs(s.to_string())),
        Just(Condition::Always),
    ]
}

/// A batch of rules with distinct identifiers and arbitrary priorities.
fn arb_rules() -> impl Strategy<Value = Vec<Rule>> {
    prop::collection::vec((arb_condition(), 0u32..100), 1..8).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (condition, priority))| {
                Rule::new(format!("rule-{i}"), priority, condition)
                    .with_effect(Effect::SetAction(format!("action-{i}")))
                    .with_effect(Effect::AppendExplanation(format!("because of rule {i}")))
            })
            .collect()
    })
}

/// The same batch twice: once as declared, once shuffled.
fn arb_rules_and_shuffle() -> impl Strategy<Value = (Vec<Rule>, Vec<Rule>)> {
    arb_rules().prop_flat_map(|rules| (Just(rules.clone()), Just(rules).prop_shuffle()))
}

fn arb_observation() -> impl Strategy<Value = ParcelObservation> {
    (
        prop::option::of(0.0f64..100.0),
        prop::option::of(-10.0f64..45.0),
        prop::option::of(prop_oneof![
            Just("flowering"),
            Just("tillering"),
            Just("ripening"),
        ]),
    )
        .prop_map(|(moisture, temperature, stage)| {
            let mut obs = ParcelObservation::new();
            if let Some(m) = moisture {
                obs = obs.with_soil_moisture(m);
            }
            if let Some(t) = temperature {
                obs = obs.with_temperature_c(t);
            }
            if let Some(s) = stage {
                obs = obs.with_growth_stage(s);
            }
            obs
        })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Evaluating the same observation twice gives identical outcomes.
    #[test]
    fn repeated_evaluation_is_idempotent(
        rules in arb_rules(),
        observation in arb_observation(),
    ) {
        let session = EvaluationSession::new(Arc::new(RuleSet::compile(rules).unwrap()));
        let first = session.evaluate(&observation);
        let second = session.evaluate(&observation);
        prop_assert_eq!(first.recommendation, second.recommendation);
        prop_assert_eq!(first.fired, second.fired);
        prop_assert_eq!(first.status, second.status);
    }

    /// Shuffling the declaration order of the rule file never changes the
    /// outcome: only priority and identifier decide firing order.
    #[test]
    fn declaration_order_does_not_matter(
        (declared, shuffled) in arb_rules_and_shuffle(),
        observation in arb_observation(),
    ) {
        let a = EvaluationSession::new(Arc::new(RuleSet::compile(declared).unwrap()));
        let b = EvaluationSession::new(Arc::new(RuleSet::compile(shuffled).unwrap()));

        let outcome_a = a.evaluate(&observation);
        let outcome_b = b.evaluate(&observation);
        prop_assert_eq!(outcome_a.recommendation, outcome_b.recommendation);
        prop_assert_eq!(outcome_a.fired, outcome_b.fired);
    }

    /// No rule ever fires twice within one session.
    #[test]
    fn no_rule_fires_twice(
        rules in arb_rules(),
        observation in arb_observation(),
    ) {
        let session = EvaluationSession::new(Arc::new(RuleSet::compile(rules).unwrap()));
        let outcome = session.evaluate(&observation);

        let mut seen = std::collections::BTreeSet::new();
        for fired in &outcome.fired {
            prop_assert!(seen.insert(fired.rule_id.clone()), "rule {} fired twice", fired.rule_id);
        }
    }
}
