//! # survey-core
//!
//! Core types, collaborator traits, and error types for survey result sync.
//!
//! This crate provides the foundational types shared across all crates:
//! - Per-survey sync settings (`SurveyConfig`, `MatrixEntry`)
//! - Normalized survey responses and answers
//! - Person, alias, and attribute value types
//! - Collaborator traits for the identity store and status reporting
//! - Cross-cutting error types

pub mod answer;
pub mod errors;
pub mod person;
pub mod progress;
pub mod survey;
pub mod traits;

pub use answer::{Answer, QuestionAnswer, SurveyResponse};
pub use errors::{CoreError, StoreError};
pub use person::{AttributeValue, Person, PersonAliasId};
pub use progress::{NullProgress, TracingProgress};
pub use survey::{MatrixEntry, SurveyConfig};
pub use traits::{AttributeStore, PersonResolver, ProgressSink};
