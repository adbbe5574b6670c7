use serde::{Deserialize, Serialize};

use super::super::domain::LanguageLevel;

/// Hard and soft thresholds applied by the eligibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub min_gpa: f64,
    pub max_age: u8,
    pub min_language_level: LanguageLevel,
}
