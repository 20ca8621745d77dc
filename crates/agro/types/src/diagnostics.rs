//! Diagnostics and evaluation status
//!
//! Nothing in the engine swallows a problem silently: skipped rules and a
//! tripped iteration cap surface here so the calling service can log or
//! expose them alongside the recommendation.

use crate::recommendation::RecommendationField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an evaluation pass ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    /// No eligible rule remained: a true fixed point.
    Complete,
    /// The iteration cap stopped the pass with eligible rules outstanding.
    /// A configuration-error signal, never a silent success.
    Capped,
}

impl EvaluationStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, EvaluationStatus::Complete)
    }
}

/// A non-fatal event surfaced to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Human-readable detail for logs and audit output.
    pub message: String,
}

impl Diagnostic {
    pub fn predicate_fault(rule_id: impl Into<String>, reason: impl fmt::Display) -> Self {
        let rule_id = rule_id.into();
        let message = format!("rule '{}' skipped: {}", rule_id, reason);
        Self {
            kind: DiagnosticKind::PredicateFault { rule_id },
            message,
        }
    }

    pub fn iteration_cap_reached(cap: usize) -> Self {
        Self {
            kind: DiagnosticKind::IterationCapReached { cap },
            message: format!(
                "iteration cap of {} reached with eligible rules outstanding",
                cap
            ),
        }
    }
}

/// Classification of a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A rule's condition could not be evaluated; the rule was treated as
    /// non-matching for the cycle.
    PredicateFault { rule_id: String },
    /// The non-termination safety net stopped the pass.
    IterationCapReached { cap: usize },
}

/// Trace entry for one rule firing, in firing order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiredRule {
    pub rule_id: String,
    pub priority: u32,
    /// Recommendation fields this firing actually changed.
    pub touched: Vec<RecommendationField>,
}
