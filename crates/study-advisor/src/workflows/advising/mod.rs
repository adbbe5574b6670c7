//! Study-abroad eligibility advising.
//!
//! A conversation collects an [`ApplicantProfile`] through the [`IntakeMachine`]; the
//! completed profile is scored by the [`EligibilityEvaluator`] and, when eligible, matched
//! against the reference catalog by the [`RecommendationMatcher`]. Sessions are persisted
//! through a [`SessionRepository`] so any transport can drive them.

pub mod config;
pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod recommendation;
pub mod repository;
pub mod router;
pub mod service;
pub mod validators;

#[cfg(test)]
mod tests;

pub use config::{AdvisingConfig, BudgetOption, DegreeDefinition};
pub use domain::{ApplicantProfile, BudgetCategory, DegreeLevel, LanguageLevel, ProfileError};
pub use evaluation::{
    EligibilityConfig, EligibilityEvaluator, EligibilityIssue, EligibilityResult,
    EligibilityWarning, ImprovementTip,
};
pub use intake::{Assessment, IntakeMachine, IntakeMessage, IntakeOutcome, IntakeState, Transition};
pub use recommendation::{
    CatalogError, CatalogSource, CountryRecord, RecommendationBundle, RecommendationMatcher,
    ReferenceCatalog, StudyProgramRecord, TimelineEntry,
};
pub use repository::{
    RepositoryError, SessionId, SessionRecord, SessionRepository, SessionStatusView,
};
pub use router::advising_router;
pub use service::{AdvisingSessionService, SessionReply, SessionServiceError};
