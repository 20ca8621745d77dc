//! Evaluation session: the public entry point
//!
//! One session per request. The session owns nothing but a handle to the
//! shared rule set and its engine config; `evaluate` builds a fresh working
//! memory, runs the engine, and hands back the outcome. No side effects:
//! persisting a [`HistoryRecord`](agro_types::HistoryRecord) is the
//! caller's job after this returns.

use crate::engine::{EngineConfig, InferenceEngine};
use crate::memory::WorkingMemory;
use agro_rules::RuleSet;
use agro_types::{Diagnostic, EvaluationStatus, FiredRule, ParcelObservation, Recommendation};
use std::sync::Arc;

/// Final state of one evaluation pass.
///
/// The recommendation always carries a non-empty action and explanation:
/// the defaults satisfy that even when nothing fires. `status` tells a
/// complete fixed-point pass apart from a capped one.
#[derive(Clone, Debug)]
pub struct EvaluationOutcome {
    pub recommendation: Recommendation,
    pub status: EvaluationStatus,
    /// Rules that fired, in firing order.
    pub fired: Vec<FiredRule>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Stateless evaluation front-end over a shared, read-only rule set.
///
/// Cheap to clone and construct; the service layer typically creates one
/// per request. Concurrent sessions never contend: the rule set is only
/// read and every session owns its working memory.
#[derive(Clone, Debug)]
pub struct EvaluationSession {
    rules: Arc<RuleSet>,
    config: EngineConfig,
}

impl EvaluationSession {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            rules,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(rules: Arc<RuleSet>, config: EngineConfig) -> Self {
        Self { rules, config }
    }

    /// Evaluate one observation against the rule set.
    ///
    /// Infallible by design: predicate faults and a tripped iteration cap
    /// surface as diagnostics on the outcome, never as an error.
    pub fn evaluate(&self, observation: &ParcelObservation) -> EvaluationOutcome {
        let mut memory = WorkingMemory::new();
        memory.insert_observation(observation.clone());

        let engine = InferenceEngine::with_config(&self.rules, self.config);
        let report = engine.run(&mut memory);

        tracing::debug!(
            status = ?report.status,
            fired = report.fired.len(),
            diagnostics = report.diagnostics.len(),
            "evaluation finished"
        );

        EvaluationOutcome {
            recommendation: memory.into_recommendation(),
            status: report.status,
            fired: report.fired,
            diagnostics: report.diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_rules::{Condition, Effect, Rule};

    fn session_with(rules: Vec<Rule>) -> EvaluationSession {
        EvaluationSession::new(Arc::new(RuleSet::compile(rules).unwrap()))
    }

    #[test]
    fn all_unknown_observation_yields_the_default_recommendation_exactly() {
        let session = session_with(vec![Rule::new(
            "low-moisture",
            100,
            Condition::SoilMoistureBelow(20.0),
        )
        .with_effect(Effect::SetAction("irrigate now".into()))]);

        let outcome = session.evaluate(&ParcelObservation::new());
        assert_eq!(outcome.recommendation, Recommendation::default());
        assert_eq!(outcome.status, EvaluationStatus::Complete);
        assert!(outcome.fired.is_empty());
        // The skipped rule is visible as a diagnostic, not swallowed.
        assert_eq!(outcome.diagnostics.len(), 1);
    }

    #[test]
    fn repeated_evaluation_is_deterministic() {
        let session = session_with(vec![
            Rule::new("b", 50, Condition::TemperatureAbove(25.0))
                .with_effect(Effect::AppendExplanation("warm".into())),
            Rule::new("a", 50, Condition::TemperatureAbove(25.0))
                .with_effect(Effect::AppendExplanation("also warm".into())),
        ]);

        let obs = ParcelObservation::new().with_temperature_c(30.0);
        let first = session.evaluate(&obs);
        for _ in 0..5 {
            let again = session.evaluate(&obs);
            assert_eq!(again.recommendation, first.recommendation);
            assert_eq!(again.fired, first.fired);
        }
    }

    #[test]
    fn sessions_share_a_rule_set_across_threads() {
        let session = session_with(vec![Rule::new(
            "heat",
            80,
            Condition::TemperatureAbove(28.0),
        )
        .with_effect(Effect::SetAction("increase irrigation frequency".into()))
        .with_effect(Effect::AppendExplanation("heat stress likely".into()))]);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let session = session.clone();
                std::thread::spawn(move || {
                    let obs = ParcelObservation::new().with_temperature_c(26.0 + i as f64);
                    session.evaluate(&obs)
                })
            })
            .collect();

        for handle in handles {
            let outcome = handle.join().unwrap();
            assert_eq!(outcome.status, EvaluationStatus::Complete);
        }
    }
}
