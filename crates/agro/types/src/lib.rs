//! AgroTrace shared types
//!
//! The vocabulary every other AgroTrace crate speaks: parcel observations
//! (facts), the recommendation a rule pass produces, diagnostics emitted
//! along the way, and the history record handed to the persistence layer.

#![deny(unsafe_code)]

pub mod diagnostics;
pub mod errors;
pub mod history;
pub mod observation;
pub mod recommendation;

pub use diagnostics::{Diagnostic, DiagnosticKind, EvaluationStatus, FiredRule};
pub use errors::{ConditionError, ObservationField};
pub use history::HistoryRecord;
pub use observation::ParcelObservation;
pub use recommendation::{Recommendation, RecommendationField};
