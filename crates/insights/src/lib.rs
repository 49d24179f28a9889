//! CV Pulse insight generation.
//!
//! Turns one analytics snapshot into the ordered list of insight cards the
//! admin dashboard renders, preferring a chat model and falling back to a
//! deterministic rule table.
//!
//! # Modules
//!
//! - [`rules`]: Deterministic rule-table fallback engine
//! - [`prompt`]: Analyst prompt construction for the model path
//! - [`parse`]: Model reply cleanup and strict decoding
//! - [`model`]: Model-backed generator over an abstract transport
//! - [`service`]: Primary/fallback orchestration and report assembly

pub mod model;
pub mod parse;
pub mod prompt;
pub mod rules;
pub mod service;

pub use model::{CompletionRequest, ModelClient, ModelInsightGenerator};
pub use rules::InsightRulesEngine;
pub use service::InsightService;
