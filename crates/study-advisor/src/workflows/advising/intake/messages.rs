use serde::{Deserialize, Serialize};

use super::super::domain::{BudgetCategory, LanguageLevel};
use super::super::evaluation::{EligibilityResult, ImprovementTip};
use super::super::recommendation::RecommendationBundle;
use super::state::IntakeState;

/// Non-blocking note emitted mid-intake. It never becomes part of the final verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "advisory", rename_all = "snake_case")]
pub enum Advisory {
    AgeAboveMaximum { age: u8, maximum: u8 },
    GpaBelowMinimum { gpa: f64, minimum: f64 },
    LanguageBelowMinimum {
        level: LanguageLevel,
        minimum: LanguageLevel,
    },
}

/// Structured output of a single transition, rendered to text by [`super::prompts`].
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeMessage {
    Welcome,
    Prompt(IntakeState),
    InvalidInput(IntakeState),
    Advisory(Advisory),
    CountryHint {
        category: BudgetCategory,
        countries: Vec<String>,
    },
    Disqualified {
        age: u8,
        age_limit: u8,
    },
    Assessment(EligibilityResult),
    Recommendations(RecommendationBundle),
    ImprovementTips(Vec<ImprovementTip>),
    Completed,
    Cancelled,
}

/// How a session reached the terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntakeOutcome {
    Assessed { eligible: bool },
    Disqualified,
    Cancelled,
}

impl IntakeOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            IntakeOutcome::Assessed { eligible: true } => "eligible",
            IntakeOutcome::Assessed { eligible: false } => "not_eligible",
            IntakeOutcome::Disqualified => "disqualified",
            IntakeOutcome::Cancelled => "cancelled",
        }
    }
}
