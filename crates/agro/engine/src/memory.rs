//! Working memory
//!
//! Per-session mutable state: the parcel facts, the single recommendation,
//! derived-fact flags, and the fired-rule bookkeeping that prevents loops.
//! One instance lives for the duration of one evaluation and is never
//! shared across sessions.
//!
//! The recommendation merge policy lives here so every rule firing goes
//! through the same two write paths:
//! - the action label belongs to the highest-priority writer; a
//!   lower-priority proposal never displaces it,
//! - explanations accumulate in firing order, the first write replacing the
//!   default text.

use agro_types::{ParcelObservation, Recommendation};
use std::collections::BTreeSet;

/// Mutable fact container for one evaluation session.
#[derive(Clone, Debug)]
pub struct WorkingMemory {
    observation: Option<ParcelObservation>,
    recommendation: Recommendation,
    flags: BTreeSet<String>,
    fired: BTreeSet<String>,
    /// Priority of the rule whose action label currently stands.
    action_priority: Option<u32>,
    explanation_written: bool,
}

impl WorkingMemory {
    /// Fresh memory holding the default recommendation and no facts.
    pub fn new() -> Self {
        Self {
            observation: None,
            recommendation: Recommendation::default(),
            flags: BTreeSet::new(),
            fired: BTreeSet::new(),
            action_priority: None,
            explanation_written: false,
        }
    }

    /// Insert the parcel observation, replacing any previous one. At most
    /// one observation exists per session.
    pub fn insert_observation(&mut self, observation: ParcelObservation) {
        self.observation = Some(observation);
    }

    pub fn observation(&self) -> Option<&ParcelObservation> {
        self.observation.as_ref()
    }

    pub fn recommendation(&self) -> &Recommendation {
        &self.recommendation
    }

    /// Derived-fact flags set by fired rules.
    pub fn flags(&self) -> &BTreeSet<String> {
        &self.flags
    }

    /// Insert a derived fact. Returns `false` when it was already present.
    pub fn set_flag(&mut self, name: impl Into<String>) -> bool {
        self.flags.insert(name.into())
    }

    /// Propose an action label on behalf of a rule with the given priority.
    ///
    /// Applied only when no rule has written the action yet or the writer's
    /// priority is at least the standing writer's. Returns whether the label
    /// was applied.
    pub fn propose_action(&mut self, label: &str, priority: u32) -> bool {
        match self.action_priority {
            Some(standing) if priority < standing => false,
            _ => {
                self.recommendation.action = label.to_string();
                self.action_priority = Some(priority);
                true
            }
        }
    }

    /// Append justification text in firing order. The first write replaces
    /// the default explanation; later writes concatenate with "; ". Nothing
    /// is ever dropped.
    pub fn append_explanation(&mut self, text: &str) {
        if self.explanation_written {
            self.recommendation.explanation.push_str("; ");
            self.recommendation.explanation.push_str(text);
        } else {
            self.recommendation.explanation = text.to_string();
            self.explanation_written = true;
        }
    }

    /// Record that a rule fired. Returns `false` if it had already fired.
    pub fn mark_fired(&mut self, rule_id: &str) -> bool {
        self.fired.insert(rule_id.to_string())
    }

    pub fn has_fired(&self, rule_id: &str) -> bool {
        self.fired.contains(rule_id)
    }

    /// Consume the memory and hand back the final recommendation.
    pub fn into_recommendation(self) -> Recommendation {
        self.recommendation
    }
}

impl Default for WorkingMemory {
    fn default() -> Self {
        Self::new()
    }
}
