//! AgroTrace rule model
//!
//! Declarative condition -> effect rules over parcel observations, the
//! compiled read-only [`RuleSet`] the engine iterates, and the YAML loader
//! that turns an external rule file into one at startup.
//!
//! Rules are data, not code: the concrete agronomic thresholds live in the
//! rule file supplied by the deployment, never in this crate.

#![deny(unsafe_code)]

pub mod loader;
pub mod rule;
pub mod ruleset;

pub use rule::{Condition, Effect, Rule};
pub use ruleset::{RuleSet, RuleSetError};
