//! AgroTrace inference engine
//!
//! A minimal forward-chaining production-rule engine: one evaluation pass
//! matches compiled rules against the session's working memory, resolves
//! conflicts by salience, fires the winner, and repeats to a fixed point.
//! Each rule fires at most once per session, which bounds the cycle count;
//! an iteration cap backs that up against misconfigured rule sets.
//!
//! The public entry point is [`EvaluationSession`]: one cheap session per
//! request, any number of concurrent sessions over one shared [`RuleSet`]
//! (it is never locked or mutated after startup).
//!
//! ```
//! use std::sync::Arc;
//! use agro_engine::EvaluationSession;
//! use agro_rules::{Condition, Effect, Rule, RuleSet};
//! use agro_types::ParcelObservation;
//!
//! let rules = Arc::new(
//!     RuleSet::compile(vec![Rule::new(
//!         "low-moisture",
//!         100,
//!         Condition::SoilMoistureBelow(20.0),
//!     )
//!     .with_effect(Effect::SetAction("irrigate now".into()))
//!     .with_effect(Effect::AppendExplanation("soil moisture is low".into()))])
//!     .unwrap(),
//! );
//!
//! let session = EvaluationSession::new(rules);
//! let outcome = session.evaluate(&ParcelObservation::new().with_soil_moisture(12.0));
//! assert_eq!(outcome.recommendation.action, "irrigate now");
//! ```
//!
//! [`RuleSet`]: agro_rules::RuleSet

#![deny(unsafe_code)]

pub mod engine;
pub mod memory;
pub mod session;

pub use engine::{EngineConfig, EngineReport, InferenceEngine};
pub use memory::WorkingMemory;
pub use session::{EvaluationOutcome, EvaluationSession};
