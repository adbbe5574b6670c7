use serde::{Deserialize, Serialize};

use super::super::config::AdvisingConfig;
use super::super::domain::{ApplicantProfile, LanguageLevel};
use super::catalog::CountryRecord;

const FULL_COVERAGE_GPA: f64 = 18.0;
const MERIT_GPA: f64 = 16.0;
const ACADEMIC_AWARD_GPA: f64 = 14.0;

/// One milestone in the recommended application schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub months_before: u8,
    pub activity: String,
}

impl TimelineEntry {
    pub fn describe(&self) -> String {
        let unit = if self.months_before == 1 { "month" } else { "months" };
        format!("{} {unit} before: {}", self.months_before, self.activity)
    }
}

pub(crate) fn scholarships(
    profile: &ApplicantProfile,
    country: Option<&CountryRecord>,
    config: &AdvisingConfig,
) -> Vec<String> {
    let gpa = profile.effective_gpa();
    let mut lines = Vec::new();

    if gpa >= FULL_COVERAGE_GPA {
        lines.push("Excellence scholarship (full tuition coverage)".to_string());
    } else if gpa >= MERIT_GPA {
        lines.push("Merit scholarship (50-75% tuition coverage)".to_string());
    } else if gpa >= ACADEMIC_AWARD_GPA {
        lines.push("Academic achievement award (25-50% tuition coverage)".to_string());
    }

    if let Some(country) = country {
        lines.push(format!("{} government scholarship program", country.name));
        lines.push(format!(
            "International student support fund - {}",
            country.name
        ));
    }

    if config.is_stem_major(profile.major.as_deref().unwrap_or_default()) {
        lines.push("STEM excellence grant".to_string());
    }

    if lines.is_empty() {
        lines.push("Need-based financial aid".to_string());
        lines.push("International student emergency fund".to_string());
    }

    lines
}

pub(crate) fn next_steps(profile: &ApplicantProfile, country: Option<&CountryRecord>) -> Vec<String> {
    let mut steps = Vec::new();

    if matches!(
        profile.language_level,
        Some(LanguageLevel::B1 | LanguageLevel::B2)
    ) {
        steps.push(
            "Consider improving your language proficiency to C1 for more opportunities"
                .to_string(),
        );
    }

    steps.push("Prepare official transcripts and degree certificates".to_string());
    steps.push("Collect recommendation letters from professors or employers".to_string());

    if let Some(country) = country {
        steps.push(format!("Check the visa requirements for {}", country.name));
        if let Some(requirements) = &country.additional_requirements {
            steps.extend(requirements.iter().cloned());
        }
    }

    steps.push("Write a compelling personal statement or motivation letter".to_string());
    steps.push("Research and contact suitable universities".to_string());
    steps.push(
        "Prepare for standardized tests if required (IELTS, TOEFL, GRE, etc.)".to_string(),
    );

    steps
}

pub(crate) fn application_timeline() -> Vec<TimelineEntry> {
    [
        (12, "start language preparation and research"),
        (9, "take standardized tests and gather documents"),
        (6, "submit applications and scholarship requests"),
        (3, "prepare visa and accommodation paperwork"),
        (1, "final preparations and travel arrangements"),
    ]
    .into_iter()
    .map(|(months_before, activity)| TimelineEntry {
        months_before,
        activity: activity.to_string(),
    })
    .collect()
}
