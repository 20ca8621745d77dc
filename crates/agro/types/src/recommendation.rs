//! Recommendation output
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default action label when no rule concludes anything.
pub const DEFAULT_ACTION: &str = "no action required";
/// Default explanation when no rule concludes anything.
pub const DEFAULT_EXPLANATION: &str = "normal conditions";

/// The actionable outcome of one evaluation pass.
///
/// Exactly one instance exists per session. Rules mutate it through
/// working memory; both fields are guaranteed non-empty because the
/// defaults already satisfy that.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Short action label, e.g. "irrigate now".
    pub action: String,
    /// Human-readable justification, cumulative across rule firings.
    pub explanation: String,
}

impl Recommendation {
    pub fn new(action: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            explanation: explanation.into(),
        }
    }

    /// True when the recommendation still carries the untouched defaults.
    pub fn is_default(&self) -> bool {
        self.action == DEFAULT_ACTION && self.explanation == DEFAULT_EXPLANATION
    }
}

impl Default for Recommendation {
    fn default() -> Self {
        Self::new(DEFAULT_ACTION, DEFAULT_EXPLANATION)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.action, self.explanation)
    }
}

/// Recommendation fields a rule firing can touch, recorded per firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationField {
    Action,
    Explanation,
}

impl fmt::Display for RecommendationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationField::Action => write!(f, "action"),
            RecommendationField::Explanation => write!(f, "explanation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_non_empty() {
        let rec = Recommendation::default();
        assert!(!rec.action.is_empty());
        assert!(!rec.explanation.is_empty());
        assert!(rec.is_default());
    }

    #[test]
    fn mutated_recommendation_is_not_default() {
        let rec = Recommendation::new("irrigate now", "soil moisture critically low");
        assert!(!rec.is_default());
        assert_eq!(rec.to_string(), "irrigate now: soil moisture critically low");
    }
}
