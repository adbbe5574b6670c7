use serde::{Deserialize, Serialize};

use super::validators::{GPA_SCALE_MAX, GPA_SCALE_MIN, MAX_APPLICANT_AGE, MIN_APPLICANT_AGE};

/// CEFR proficiency codes ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LanguageLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl LanguageLevel {
    pub const ALL: [LanguageLevel; 6] = [
        LanguageLevel::A1,
        LanguageLevel::A2,
        LanguageLevel::B1,
        LanguageLevel::B2,
        LanguageLevel::C1,
        LanguageLevel::C2,
    ];

    /// Parse a code after upper-casing it, so `b2` and `B2` are equivalent.
    pub fn parse(text: &str) -> Option<Self> {
        let code = text.to_uppercase();
        Self::ALL.into_iter().find(|level| level.code() == code)
    }

    pub const fn rank(self) -> u8 {
        match self {
            LanguageLevel::A1 => 1,
            LanguageLevel::A2 => 2,
            LanguageLevel::B1 => 3,
            LanguageLevel::B2 => 4,
            LanguageLevel::C1 => 5,
            LanguageLevel::C2 => 6,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            LanguageLevel::A1 => "A1",
            LanguageLevel::A2 => "A2",
            LanguageLevel::B1 => "B1",
            LanguageLevel::B2 => "B2",
            LanguageLevel::C1 => "C1",
            LanguageLevel::C2 => "C2",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            LanguageLevel::A1 => "Beginner",
            LanguageLevel::A2 => "Elementary",
            LanguageLevel::B1 => "Intermediate",
            LanguageLevel::B2 => "Upper intermediate",
            LanguageLevel::C1 => "Advanced",
            LanguageLevel::C2 => "Proficient",
        }
    }
}

impl std::fmt::Display for LanguageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Credential ranks used for branching and program compatibility.
///
/// Labels that do not resolve to a known degree rank as `Unrecognized` (0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    Unrecognized,
    Diploma,
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

impl DegreeLevel {
    pub const fn rank(self) -> u8 {
        match self {
            DegreeLevel::Unrecognized => 0,
            DegreeLevel::Diploma => 1,
            DegreeLevel::Associate => 2,
            DegreeLevel::Bachelor => 3,
            DegreeLevel::Master => 4,
            DegreeLevel::Doctorate => 5,
        }
    }
}

/// Coarse budget classification derived from the selected range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Low,
    Medium,
    High,
}

impl BudgetCategory {
    pub const fn label(self) -> &'static str {
        match self {
            BudgetCategory::Low => "low",
            BudgetCategory::Medium => "medium",
            BudgetCategory::High => "high",
        }
    }
}

/// Academic profile assembled one field at a time by the intake state machine.
///
/// Every field is optional while the conversation is in flight; the evaluator reads
/// missing values as the worst case instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantProfile {
    pub age: Option<u8>,
    pub major: Option<String>,
    pub degree: Option<String>,
    pub bachelor_field: Option<String>,
    pub master_field: Option<String>,
    pub gpa: Option<f64>,
    pub language_level: Option<LanguageLevel>,
    pub budget: Option<String>,
    pub budget_category: Option<BudgetCategory>,
    pub preferred_country: Option<String>,
}

impl ApplicantProfile {
    pub fn effective_age(&self) -> u8 {
        self.age.unwrap_or(0)
    }

    pub fn effective_gpa(&self) -> f64 {
        self.gpa.unwrap_or(0.0)
    }

    pub fn effective_language_level(&self) -> LanguageLevel {
        self.language_level.unwrap_or(LanguageLevel::A1)
    }

    /// Check a profile that arrived in one piece (API or profile file) against the same
    /// bounds the per-field validators enforce during intake.
    pub fn check_invariants(&self) -> Result<(), ProfileError> {
        let age = self.age.ok_or(ProfileError::Missing("age"))?;
        if !(MIN_APPLICANT_AGE..=MAX_APPLICANT_AGE).contains(&age) {
            return Err(ProfileError::AgeOutOfRange(age));
        }

        let gpa = self.gpa.ok_or(ProfileError::Missing("gpa"))?;
        if !gpa.is_finite() || !(GPA_SCALE_MIN..=GPA_SCALE_MAX).contains(&gpa) {
            return Err(ProfileError::GpaOutOfRange(gpa));
        }

        if self.language_level.is_none() {
            return Err(ProfileError::Missing("language_level"));
        }

        Ok(())
    }
}

/// Raised when a complete profile violates the intake bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("profile is missing required field `{0}`")]
    Missing(&'static str),
    #[error("age {0} is outside the accepted range 16-80")]
    AgeOutOfRange(u8),
    #[error("gpa {0} is outside the 0-20 scale")]
    GpaOutOfRange(f64),
}
