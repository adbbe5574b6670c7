//! Text rendering for intake messages.

use super::super::config::AdvisingConfig;
use super::super::domain::LanguageLevel;
use super::super::evaluation::format_gpa;
use super::messages::{Advisory, IntakeMessage};
use super::state::IntakeState;

fn bullet_list<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    items
        .into_iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn majors_list(config: &AdvisingConfig) -> String {
    bullet_list(config.majors.iter().map(String::as_str))
}

fn degrees_list(config: &AdvisingConfig) -> String {
    bullet_list(config.degree_labels())
}

fn budgets_list(config: &AdvisingConfig) -> String {
    bullet_list(config.budget_options.iter().map(|option| option.label.as_str()))
}

fn welcome() -> String {
    [
        "🎓 *Welcome to the study-abroad eligibility advisor!* 🌍",
        "",
        "I will help you check whether you are eligible to study abroad and suggest programs that fit your profile.",
        "",
        "Information I need:",
        "• Age",
        "• Current major",
        "• Current degree",
        "• Previous fields of study (if any)",
        "• GPA (out of 20)",
        "• Language level",
        "• Available budget",
        "• Preferred study destination",
        "",
        "Let's get started!",
    ]
    .join("\n")
}

fn prompt(state: IntakeState, config: &AdvisingConfig) -> String {
    match state {
        IntakeState::Age => "📝 *Please enter your age:*".to_string(),
        IntakeState::Major => format!(
            "📚 *What is your major?*\n\nAvailable options:\n{}\n\nPlease type your major:",
            majors_list(config)
        ),
        IntakeState::Degree => format!(
            "🎓 *What is your current degree?*\n\nAvailable options:\n{}\n\nPlease type your degree:",
            degrees_list(config)
        ),
        IntakeState::BachelorField => format!(
            "📚 *What was your field of study for your bachelor's degree?*\n\nAvailable options:\n{}\n\nPlease type your bachelor's field:",
            majors_list(config)
        ),
        IntakeState::MasterField => format!(
            "📚 *What was your field of study for your master's degree?*\n\nAvailable options:\n{}\n\nPlease type your master's field:",
            majors_list(config)
        ),
        IntakeState::Gpa => {
            "📊 *What is your GPA out of 20?*\n\nPlease enter a number between 0 and 20 (e.g. 15.5):"
                .to_string()
        }
        IntakeState::Language => {
            let levels: Vec<String> = LanguageLevel::ALL
                .iter()
                .map(|level| format!("{} - {}", level.code(), level.description()))
                .collect();
            format!(
                "🗣️ *What is your language proficiency level?*\n\nAvailable levels:\n{}\n\nPlease type your level (e.g. B2):",
                bullet_list(levels.iter().map(String::as_str))
            )
        }
        IntakeState::Budget => format!(
            "💰 *What budget do you have available for studying abroad?*\n\nAvailable options:\n{}\n\nPlease choose your budget:",
            budgets_list(config)
        ),
        IntakeState::Country => {
            "*Which country do you prefer for your studies?*\n\nPlease type your preferred country from the list above:"
                .to_string()
        }
        IntakeState::Terminal => String::new(),
    }
}

fn invalid_input(state: IntakeState, config: &AdvisingConfig) -> String {
    match state {
        IntakeState::Age => "❌ Please enter a valid age between 16 and 80:".to_string(),
        IntakeState::Major | IntakeState::BachelorField | IntakeState::MasterField => format!(
            "❌ Please choose a valid major from the list:\n{}",
            majors_list(config)
        ),
        IntakeState::Degree => format!(
            "❌ Please choose a valid degree from the list:\n{}",
            degrees_list(config)
        ),
        IntakeState::Gpa => {
            "❌ Please enter a valid GPA between 0 and 20 (e.g. 15.5):".to_string()
        }
        IntakeState::Language => {
            "❌ Please enter a valid language level (A1, A2, B1, B2, C1, or C2):".to_string()
        }
        IntakeState::Budget => format!(
            "❌ Please choose a valid option from the list:\n{}",
            budgets_list(config)
        ),
        IntakeState::Country | IntakeState::Terminal => "❌ Please try again.".to_string(),
    }
}

fn advisory(advisory: &Advisory) -> String {
    match advisory {
        Advisory::AgeAboveMaximum { maximum, .. } => format!(
            "⚠️ *Age note:* you are over {maximum} years old. This does not disqualify you, but some programs may give priority to younger applicants."
        ),
        Advisory::GpaBelowMinimum { minimum, .. } => format!(
            "⚠️ *GPA note:* your GPA is below {} out of 20. This may limit your options, but don't worry - opportunities are still available!",
            format_gpa(*minimum)
        ),
        Advisory::LanguageBelowMinimum { minimum, .. } => format!(
            "⚠️ *Language note:* your proficiency is below {minimum}. Most universities require at least {minimum}. We recommend improving your language skills!"
        ),
    }
}

/// Render one message as the text shown to the applicant.
pub fn render(message: &IntakeMessage, config: &AdvisingConfig) -> String {
    match message {
        IntakeMessage::Welcome => welcome(),
        IntakeMessage::Prompt(state) => prompt(*state, config),
        IntakeMessage::InvalidInput(state) => invalid_input(*state, config),
        IntakeMessage::Advisory(note) => advisory(note),
        IntakeMessage::CountryHint { countries, .. } => format!(
            "🌍 *Based on your budget, we recommend the following countries:*\n{}",
            bullet_list(countries.iter().map(String::as_str))
        ),
        IntakeMessage::Disqualified { age_limit, .. } => format!(
            "❌ *Unfortunately, you do not meet the requirements!*\n\nTo apply for a bachelor's program with an associate degree you must be younger than {age_limit}.\n\nYou can apply again once you have earned a bachelor's degree."
        ),
        IntakeMessage::Assessment(result) => result.message.clone(),
        IntakeMessage::Recommendations(bundle) => bundle.render(),
        IntakeMessage::ImprovementTips(tips) => {
            let mut sections = vec!["🎯 *Tips to improve your eligibility:*".to_string()];
            sections.extend(tips.iter().map(|tip| tip.text()));
            sections.join("\n\n")
        }
        IntakeMessage::Completed => "✨ *Assessment complete!*\n\nThank you for using the study-abroad eligibility advisor. Send /start to begin a new assessment.".to_string(),
        IntakeMessage::Cancelled => {
            "❌ Assessment cancelled. Send /start to begin again at any time!".to_string()
        }
    }
}

/// Usage summary for the `/help` command and the help endpoint.
pub fn help_text(config: &AdvisingConfig) -> String {
    let eligibility = &config.eligibility;
    format!(
        "🤖 *Study-abroad eligibility advisor help*\n\n\
         *Commands:*\n\
         • /start - begin an eligibility assessment\n\
         • /help - show this help message\n\
         • /cancel - cancel the current assessment\n\n\
         *What I do:*\n\
         • Collect your academic background\n\
         • Check your eligibility for studying abroad\n\
         • Provide personalized recommendations\n\
         • Suggest improvements when needed\n\n\
         *Assessment criteria:*\n\
         • Age (note when over {} years)\n\
         • GPA (at least {} out of 20 recommended)\n\
         • Language proficiency (at least {})\n\
         • Academic background and goals\n\n\
         Ready? Send /start to begin!",
        eligibility.max_age,
        format_gpa(eligibility.min_gpa),
        eligibility.min_language_level
    )
}
