use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicantProfile, LanguageLevel};
use super::config::EligibilityConfig;
use super::report::format_gpa;
use super::rules::{age_within_limit, gpa_meets_minimum, language_meets_minimum};

/// Guidance shown to applicants who did not pass the eligibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tip", rename_all = "snake_case")]
pub enum ImprovementTip {
    RaiseGpa { minimum: f64 },
    ImproveLanguage { minimum: LanguageLevel },
    AgeConsideration { maximum: u8 },
    Encouragement,
}

impl ImprovementTip {
    pub fn text(&self) -> String {
        match self {
            ImprovementTip::RaiseGpa { minimum } => format!(
                "📈 *Raise your GPA:* focus on your coursework to bring your GPA above {} out of 20. Retake courses where possible.",
                format_gpa(*minimum)
            ),
            ImprovementTip::ImproveLanguage { minimum } => format!(
                "🗣️ *Language skills:* enroll in language classes or online programs to reach at least {minimum}. Practice speaking, listening, reading, and writing."
            ),
            ImprovementTip::AgeConsideration { .. } => "👥 *Age considerations:* look for universities that welcome mature students or consider professional development programs.".to_string(),
            ImprovementTip::Encouragement => "💪 Don't give up! With some preparation you can improve your eligibility for study-abroad programs.".to_string(),
        }
    }
}

pub(crate) fn improvement_tips(
    profile: &ApplicantProfile,
    config: &EligibilityConfig,
) -> Vec<ImprovementTip> {
    let mut tips = Vec::new();

    if !gpa_meets_minimum(profile, config) {
        tips.push(ImprovementTip::RaiseGpa {
            minimum: config.min_gpa,
        });
    }
    if !language_meets_minimum(profile, config) {
        tips.push(ImprovementTip::ImproveLanguage {
            minimum: config.min_language_level,
        });
    }
    if !age_within_limit(profile, config) {
        tips.push(ImprovementTip::AgeConsideration {
            maximum: config.max_age,
        });
    }
    tips.push(ImprovementTip::Encouragement);

    tips
}
