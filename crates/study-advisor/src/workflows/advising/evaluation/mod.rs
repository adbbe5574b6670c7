mod config;
mod report;
mod rules;
mod tips;

pub use config::EligibilityConfig;
pub use rules::{EligibilityIssue, EligibilityWarning};
pub use tips::ImprovementTip;

pub(crate) use report::format_gpa;

use super::domain::ApplicantProfile;
use serde::{Deserialize, Serialize};

/// Stateless evaluator applying the configured thresholds to a profile.
#[derive(Debug, Clone)]
pub struct EligibilityEvaluator {
    config: EligibilityConfig,
}

impl EligibilityEvaluator {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Rules run in a fixed order (age, GPA, language); that order is the order issues and
    /// warnings appear in the rendered message.
    pub fn evaluate(&self, profile: &ApplicantProfile) -> EligibilityResult {
        let (issues, warnings) = rules::apply_rules(profile, &self.config);
        let eligible = issues.is_empty();
        let message = report::render_assessment(profile, &self.config, eligible, &issues, &warnings);

        EligibilityResult {
            eligible,
            issues,
            warnings,
            message,
        }
    }

    pub fn improvement_tips(&self, profile: &ApplicantProfile) -> Vec<ImprovementTip> {
        tips::improvement_tips(profile, &self.config)
    }
}

/// Verdict for a completed profile. Warnings never affect `eligible`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub issues: Vec<EligibilityIssue>,
    pub warnings: Vec<EligibilityWarning>,
    pub message: String,
}
