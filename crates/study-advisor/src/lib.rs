//! Guided study-abroad intake with eligibility evaluation and program matching.
//!
//! The [`workflows::advising`] module hosts the conversation state machine, the rule
//! evaluator, and the catalog matcher. Configuration, telemetry, and the top-level error
//! type are shared with the HTTP/CLI service in `services/api`.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
