use super::super::domain::ApplicantProfile;
use super::config::EligibilityConfig;
use super::rules::{
    age_within_limit, gpa_meets_minimum, language_meets_minimum, EligibilityIssue,
    EligibilityWarning,
};

const NOT_PROVIDED: &str = "not provided";

/// Whole-number GPAs keep one decimal so `13` renders as `13.0`.
pub(crate) fn format_gpa(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn text_or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_PROVIDED)
}

pub(crate) fn render_assessment(
    profile: &ApplicantProfile,
    config: &EligibilityConfig,
    eligible: bool,
    issues: &[EligibilityIssue],
    warnings: &[EligibilityWarning],
) -> String {
    let mut lines = Vec::new();

    if eligible {
        lines.push("🎉 *Congratulations! You are eligible for study-abroad programs!*\n".to_string());
        lines.push("✅ *Your profile summary:*".to_string());
    } else {
        lines.push("❌ *Current eligibility status: not eligible*\n".to_string());
        lines.push("📋 *Your profile summary:*".to_string());
    }

    lines.push(match profile.age {
        Some(age) => format!("• Age: {age} years"),
        None => format!("• Age: {NOT_PROVIDED}"),
    });
    lines.push(format!(
        "• Major: {}",
        text_or_placeholder(profile.major.as_deref())
    ));
    lines.push(format!(
        "• Degree: {}",
        text_or_placeholder(profile.degree.as_deref())
    ));
    lines.push(match profile.gpa {
        Some(gpa) => format!("• GPA: {} out of 20", format_gpa(gpa)),
        None => format!("• GPA: {NOT_PROVIDED}"),
    });
    lines.push(match profile.language_level {
        Some(level) => format!("• Language level: {level}"),
        None => format!("• Language level: {NOT_PROVIDED}"),
    });
    lines.push(format!(
        "• Preferred country: {}",
        text_or_placeholder(profile.preferred_country.as_deref())
    ));

    lines.push("\n📊 *Assessment results:*".to_string());

    if age_within_limit(profile, config) {
        lines.push(format!("✅ Age: within the preferred range (≤{})", config.max_age));
    } else {
        lines.push(format!("⚠️ Age: above the preferred range (>{})", config.max_age));
    }

    let min_gpa = format_gpa(config.min_gpa);
    if gpa_meets_minimum(profile, config) {
        lines.push(format!("✅ GPA: qualified (≥{min_gpa} out of 20)"));
    } else {
        lines.push(format!("❌ GPA: below the minimum ({min_gpa} out of 20 required)"));
    }

    if language_meets_minimum(profile, config) {
        lines.push(format!(
            "✅ Language: qualified (≥{})",
            config.min_language_level
        ));
    } else {
        lines.push(format!(
            "❌ Language: below the minimum ({} required)",
            config.min_language_level
        ));
    }

    if !issues.is_empty() {
        lines.push("\n🚫 *Issues to address:*".to_string());
        lines.extend(issues.iter().map(|issue| format!("• {}", issue.summary())));
    }

    if !warnings.is_empty() {
        lines.push("\n⚠️ *Notes:*".to_string());
        lines.extend(
            warnings
                .iter()
                .map(|warning| format!("• {}", warning.summary())),
        );
    }

    lines.join("\n")
}
