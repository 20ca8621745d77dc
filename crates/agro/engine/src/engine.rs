//! Forward-chaining inference loop
//!
//! Match, resolve, fire, repeat:
//! 1. every not-yet-fired rule is matched against working memory; a
//!    condition that faults (unknown field) is skipped with a diagnostic,
//! 2. the match set inherits the rule set's compiled order (priority
//!    descending, id ascending) and its head fires,
//! 3. the winner's effects mutate working memory through the merge policy
//!    and the rule is marked fired,
//! 4. back to 1 until no eligible rule matches, or the iteration cap trips.
//!
//! A rule fires at most once per session, so the cycle count is bounded by
//! the rule count; the cap is a safety net for misconfigured rule sets and
//! reaching it is reported, never swallowed.

use crate::memory::WorkingMemory;
use agro_rules::{Effect, Rule, RuleSet};
use agro_types::{Diagnostic, EvaluationStatus, FiredRule, ParcelObservation, RecommendationField};
use std::collections::BTreeSet;

/// Engine tuning knobs.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Hard bound on match/fire cycles per session.
    pub iteration_cap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { iteration_cap: 32 }
    }
}

/// What one engine run did: how it ended, which rules fired in order, and
/// every diagnostic raised along the way.
#[derive(Clone, Debug)]
pub struct EngineReport {
    pub status: EvaluationStatus,
    pub fired: Vec<FiredRule>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs one rule set to a fixed point over a working memory.
///
/// Borrows the compiled rule set; many engines may run concurrently against
/// the same set, each with its own working memory. The loop itself is
/// sequential within a session because conflict resolution needs a total
/// order over the current match set.
#[derive(Clone, Debug)]
pub struct InferenceEngine<'a> {
    rules: &'a RuleSet,
    config: EngineConfig,
}

impl<'a> InferenceEngine<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(rules: &'a RuleSet, config: EngineConfig) -> Self {
        Self { rules, config }
    }

    /// Run the match/fire cycle to a fixed point (or the cap).
    ///
    /// Never fails: predicate faults downgrade to diagnostics and the
    /// accumulated recommendation always remains available in memory.
    pub fn run(&self, memory: &mut WorkingMemory) -> EngineReport {
        let mut fired = Vec::new();
        let mut diagnostics = Vec::new();
        // One fault report per rule per session, even when the rule is
        // re-matched on later cycles.
        let mut reported_faults = BTreeSet::new();

        loop {
            let rule = match self.select(memory, &mut diagnostics, &mut reported_faults) {
                Some(rule) => rule,
                None => {
                    return EngineReport {
                        status: EvaluationStatus::Complete,
                        fired,
                        diagnostics,
                    };
                }
            };

            // The cap is breached only when an eligible rule remains after
            // exhausting it: a cascade that fires exactly cap rules and then
            // reaches a fixed point is a complete pass, not a capped one.
            if fired.len() >= self.config.iteration_cap {
                tracing::warn!(
                    cap = self.config.iteration_cap,
                    next_rule = %rule.id,
                    "iteration cap reached before fixed point"
                );
                diagnostics.push(Diagnostic::iteration_cap_reached(self.config.iteration_cap));
                return EngineReport {
                    status: EvaluationStatus::Capped,
                    fired,
                    diagnostics,
                };
            }

            tracing::debug!(cycle = fired.len(), rule_id = %rule.id, priority = rule.priority, "firing rule");
            let touched = apply_effects(rule, memory);
            memory.mark_fired(&rule.id);
            fired.push(FiredRule {
                rule_id: rule.id.clone(),
                priority: rule.priority,
                touched,
            });
        }
    }

    /// Match phase plus conflict resolution: the first matching, not-yet-
    /// fired rule in compiled order wins the cycle.
    fn select(
        &self,
        memory: &WorkingMemory,
        diagnostics: &mut Vec<Diagnostic>,
        reported_faults: &mut BTreeSet<String>,
    ) -> Option<&'a Rule> {
        static EMPTY: ParcelObservation = ParcelObservation {
            soil_moisture: None,
            temperature_c: None,
            crop: None,
            growth_stage: None,
            soil_type: None,
        };
        let observation = memory.observation().unwrap_or(&EMPTY);

        for rule in self.rules.iter() {
            if memory.has_fired(&rule.id) {
                continue;
            }
            match rule.condition.evaluate(observation, memory.flags()) {
                Ok(true) => return Some(rule),
                Ok(false) => {}
                Err(fault) => {
                    tracing::debug!(rule_id = %rule.id, %fault, "condition faulted, treating as non-match");
                    if reported_faults.insert(rule.id.clone()) {
                        diagnostics.push(Diagnostic::predicate_fault(&rule.id, fault));
                    }
                }
            }
        }
        None
    }
}

fn apply_effects(rule: &Rule, memory: &mut WorkingMemory) -> Vec<RecommendationField> {
    let mut wrote_action = false;
    let mut wrote_explanation = false;
    for effect in &rule.effects {
        match effect {
            Effect::SetAction(label) => {
                wrote_action |= memory.propose_action(label, rule.priority);
            }
            Effect::AppendExplanation(text) => {
                memory.append_explanation(text);
                wrote_explanation = true;
            }
            Effect::SetFlag(name) => {
                memory.set_flag(name.clone());
            }
        }
    }

    let mut touched = Vec::new();
    if wrote_action {
        touched.push(RecommendationField::Action);
    }
    if wrote_explanation {
        touched.push(RecommendationField::Explanation);
    }
    touched
}
