use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicantProfile, LanguageLevel};
use super::config::EligibilityConfig;
use super::report::format_gpa;

/// Failed hard rule; any issue makes the applicant ineligible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum EligibilityIssue {
    GpaBelowMinimum {
        minimum: f64,
        actual: f64,
    },
    LanguageBelowMinimum {
        minimum: LanguageLevel,
        actual: LanguageLevel,
    },
}

impl EligibilityIssue {
    pub fn summary(&self) -> String {
        match self {
            EligibilityIssue::GpaBelowMinimum { minimum, actual } => format!(
                "GPA below {} out of 20 (current: {} out of 20)",
                format_gpa(*minimum),
                format_gpa(*actual)
            ),
            EligibilityIssue::LanguageBelowMinimum { minimum, actual } => {
                format!("Language level below {minimum} (current: {actual})")
            }
        }
    }
}

/// Soft rule outcome surfaced to the applicant without blocking eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum EligibilityWarning {
    AgeAboveMaximum { maximum: u8, actual: u8 },
}

impl EligibilityWarning {
    pub fn summary(&self) -> String {
        match self {
            EligibilityWarning::AgeAboveMaximum { maximum, actual } => {
                format!("Age above {maximum} years (current: {actual})")
            }
        }
    }
}

pub(crate) fn age_within_limit(profile: &ApplicantProfile, config: &EligibilityConfig) -> bool {
    profile.effective_age() <= config.max_age
}

pub(crate) fn gpa_meets_minimum(profile: &ApplicantProfile, config: &EligibilityConfig) -> bool {
    profile.effective_gpa() >= config.min_gpa
}

pub(crate) fn language_meets_minimum(
    profile: &ApplicantProfile,
    config: &EligibilityConfig,
) -> bool {
    profile.effective_language_level().rank() >= config.min_language_level.rank()
}

pub(crate) fn apply_rules(
    profile: &ApplicantProfile,
    config: &EligibilityConfig,
) -> (Vec<EligibilityIssue>, Vec<EligibilityWarning>) {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    if !age_within_limit(profile, config) {
        warnings.push(EligibilityWarning::AgeAboveMaximum {
            maximum: config.max_age,
            actual: profile.effective_age(),
        });
    }

    if !gpa_meets_minimum(profile, config) {
        issues.push(EligibilityIssue::GpaBelowMinimum {
            minimum: config.min_gpa,
            actual: profile.effective_gpa(),
        });
    }

    if !language_meets_minimum(profile, config) {
        issues.push(EligibilityIssue::LanguageBelowMinimum {
            minimum: config.min_language_level,
            actual: profile.effective_language_level(),
        });
    }

    (issues, warnings)
}
