//! Compiled rule set
//!
//! Compilation is a one-time startup operation: validate identifiers, fix
//! the conflict-resolution order, and freeze. The compiled set carries no
//! interior mutability; adding rules means restarting the process, which
//! keeps a running service's advice consistent.

use crate::rule::Rule;
use std::cmp::Ordering;
use thiserror::Error;

/// Read-only, ordered collection of compiled rules.
///
/// Rules are held in conflict-resolution order: priority descending, then
/// identifier ascending. Safe for unbounded concurrent reads; evaluation
/// sessions borrow it and never lock.
#[derive(Clone, Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Validate and freeze a collection of rules.
    ///
    /// Fails fast on an empty identifier or a duplicate identifier; a
    /// process must not start with an invalid rule set.
    pub fn compile(mut rules: Vec<Rule>) -> Result<Self, RuleSetError> {
        for (index, rule) in rules.iter().enumerate() {
            if rule.id.trim().is_empty() {
                return Err(RuleSetError::EmptyRuleId { index });
            }
        }

        let mut seen = std::collections::BTreeSet::new();
        for rule in &rules {
            if !seen.insert(rule.id.clone()) {
                return Err(RuleSetError::DuplicateRuleId(rule.id.clone()));
            }
        }

        // Conflict-resolution total order, fixed once at compile time.
        rules.sort_by(|a, b| match b.priority.cmp(&a.priority) {
            Ordering::Equal => a.id.cmp(&b.id),
            other => other,
        });

        tracing::debug!(rule_count = rules.len(), "rule set compiled");
        Ok(Self { rules })
    }

    /// Rules in conflict-resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Startup-fatal rule-set configuration errors.
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("rule at index {index} has an empty identifier")]
    EmptyRuleId { index: usize },

    #[error("duplicate rule identifier: {0}")]
    DuplicateRuleId(String),

    #[error("failed to read rule file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed rule file: {0}")]
    Parse(#[from] serde_yaml::Error),
}
