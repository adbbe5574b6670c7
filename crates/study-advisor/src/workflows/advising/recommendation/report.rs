use super::RecommendationBundle;

pub(crate) fn render_bundle(bundle: &RecommendationBundle) -> String {
    let mut lines = vec!["🎯 *Personalized study-abroad recommendations*\n".to_string()];

    if let Some(country) = &bundle.country {
        lines.push(format!("🌍 *Recommended destination: {}*", country.name));
        lines.push(format!("• {}", country.description));
        lines.push(format!(
            "• Language requirement: {}",
            country.language_requirement
        ));
        lines.push(format!("• Average tuition: {}", country.avg_tuition));
        lines.push(format!(
            "• Application deadline: {}",
            country.application_deadline
        ));
    }

    if !bundle.programs.is_empty() {
        lines.push("\n📚 *Recommended programs:*".to_string());
        for (position, program) in bundle.programs.iter().enumerate() {
            lines.push(format!("\n*{}. {}*", position + 1, program.name));
            lines.push(format!("• Duration: {}", program.duration));
            lines.push(format!("• Requirements: {}", program.requirements));
            lines.push(format!(
                "• Focus areas: {}",
                program.focus_areas.join(", ")
            ));
        }
    }

    lines.push("\n💰 *Scholarship opportunities:*".to_string());
    lines.extend(bundle.scholarships.iter().map(|line| format!("• {line}")));

    lines.push("\n📋 *Next steps:*".to_string());
    lines.extend(bundle.next_steps.iter().map(|step| format!("• {step}")));

    lines.push("\n⏰ *Recommended timeline:*".to_string());
    lines.extend(
        bundle
            .timeline
            .iter()
            .map(|entry| format!("• {}", entry.describe())),
    );

    lines.join("\n")
}
