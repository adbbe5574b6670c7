//! Explicit finite-state machine collecting an applicant profile one answer at a time.
//!
//! [`IntakeMachine::advance`] is the whole transition function: it validates the raw
//! answer for the current state, writes the field on success, and picks the next state.
//! A rejected answer leaves both the state and the profile untouched.

mod messages;
pub mod prompts;
mod state;

pub use messages::{Advisory, IntakeMessage, IntakeOutcome};
pub use state::IntakeState;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::config::AdvisingConfig;
use super::domain::{ApplicantProfile, DegreeLevel, LanguageLevel};
use super::evaluation::{EligibilityEvaluator, EligibilityResult, ImprovementTip};
use super::recommendation::{RecommendationBundle, RecommendationMatcher, ReferenceCatalog};
use super::validators::{parse_age, parse_gpa, valid_degree, valid_major};

/// Result of one turn: the state to wait in next and the messages to deliver, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: IntakeState,
    pub messages: Vec<IntakeMessage>,
    pub outcome: Option<IntakeOutcome>,
}

impl Transition {
    fn to(state: IntakeState, messages: Vec<IntakeMessage>) -> Self {
        Self {
            state,
            messages,
            outcome: None,
        }
    }

    fn reject(state: IntakeState) -> Self {
        Self::to(state, vec![IntakeMessage::InvalidInput(state)])
    }

    fn finish(outcome: IntakeOutcome, messages: Vec<IntakeMessage>) -> Self {
        Self {
            state: IntakeState::Terminal,
            messages,
            outcome: Some(outcome),
        }
    }
}

/// Eligibility verdict plus whichever follow-up applies to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub eligibility: EligibilityResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<RecommendationBundle>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub improvement_tips: Vec<ImprovementTip>,
}

impl Assessment {
    /// Messages in delivery order: the verdict, then recommendations or tips.
    pub fn into_messages(self) -> Vec<IntakeMessage> {
        let mut messages = vec![IntakeMessage::Assessment(self.eligibility)];
        match self.recommendations {
            Some(bundle) => messages.push(IntakeMessage::Recommendations(bundle)),
            None => messages.push(IntakeMessage::ImprovementTips(self.improvement_tips)),
        }
        messages
    }
}

/// Drives intake and hands completed profiles to the evaluator and matcher.
#[derive(Debug, Clone)]
pub struct IntakeMachine {
    config: Arc<AdvisingConfig>,
    evaluator: EligibilityEvaluator,
    matcher: RecommendationMatcher,
}

impl IntakeMachine {
    pub fn new(config: Arc<AdvisingConfig>, catalog: Arc<ReferenceCatalog>) -> Self {
        let evaluator = EligibilityEvaluator::new(config.eligibility.clone());
        let matcher = RecommendationMatcher::new(config.clone(), catalog);
        Self {
            config,
            evaluator,
            matcher,
        }
    }

    pub fn config(&self) -> &AdvisingConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        self.matcher.catalog()
    }

    pub fn render(&self, message: &IntakeMessage) -> String {
        prompts::render(message, &self.config)
    }

    pub fn start(&self) -> Transition {
        Transition::to(
            IntakeState::INITIAL,
            vec![
                IntakeMessage::Welcome,
                IntakeMessage::Prompt(IntakeState::INITIAL),
            ],
        )
    }

    /// Abandon the conversation without evaluating anything.
    pub fn cancel(&self) -> Transition {
        Transition::finish(IntakeOutcome::Cancelled, vec![IntakeMessage::Cancelled])
    }

    /// Evaluate a completed profile, then recommend (eligible) or coach (ineligible).
    pub fn assess(&self, profile: &ApplicantProfile) -> Assessment {
        let eligibility = self.evaluator.evaluate(profile);
        if eligibility.eligible {
            Assessment {
                recommendations: Some(self.matcher.recommend(profile)),
                improvement_tips: Vec::new(),
                eligibility,
            }
        } else {
            Assessment {
                recommendations: None,
                improvement_tips: self.evaluator.improvement_tips(profile),
                eligibility,
            }
        }
    }

    pub fn advance(
        &self,
        state: IntakeState,
        profile: &mut ApplicantProfile,
        input: &str,
    ) -> Transition {
        let input = input.trim();
        match state {
            IntakeState::Age => self.accept_age(profile, input),
            IntakeState::Major => self.accept_major(profile, input),
            IntakeState::Degree => self.accept_degree(profile, input),
            IntakeState::BachelorField => self.accept_bachelor_field(profile, input),
            IntakeState::MasterField => self.accept_master_field(profile, input),
            IntakeState::Gpa => self.accept_gpa(profile, input),
            IntakeState::Language => self.accept_language(profile, input),
            IntakeState::Budget => self.accept_budget(profile, input),
            IntakeState::Country => self.accept_country(profile, input),
            IntakeState::Terminal => Transition::to(IntakeState::Terminal, Vec::new()),
        }
    }

    fn accept_age(&self, profile: &mut ApplicantProfile, input: &str) -> Transition {
        let Some(age) = parse_age(input) else {
            return Transition::reject(IntakeState::Age);
        };
        profile.age = Some(age);

        let mut messages = Vec::new();
        let maximum = self.config.eligibility.max_age;
        if age > maximum {
            messages.push(IntakeMessage::Advisory(Advisory::AgeAboveMaximum {
                age,
                maximum,
            }));
        }
        messages.push(IntakeMessage::Prompt(IntakeState::Major));
        Transition::to(IntakeState::Major, messages)
    }

    fn accept_major(&self, profile: &mut ApplicantProfile, input: &str) -> Transition {
        if !valid_major(input, &self.config.majors) {
            return Transition::reject(IntakeState::Major);
        }
        profile.major = Some(input.to_string());
        Transition::to(
            IntakeState::Degree,
            vec![IntakeMessage::Prompt(IntakeState::Degree)],
        )
    }

    fn accept_degree(&self, profile: &mut ApplicantProfile, input: &str) -> Transition {
        if !valid_degree(input, &self.config.degree_labels()) {
            return Transition::reject(IntakeState::Degree);
        }
        profile.degree = Some(input.to_string());

        let level = self.config.degree_level(input);
        let age = profile.effective_age();
        let age_limit = self.config.associate_age_limit;
        if level == DegreeLevel::Associate && age >= age_limit {
            return Transition::finish(
                IntakeOutcome::Disqualified,
                vec![IntakeMessage::Disqualified { age, age_limit }],
            );
        }

        let next = if level >= DegreeLevel::Bachelor {
            IntakeState::BachelorField
        } else {
            IntakeState::Gpa
        };
        Transition::to(next, vec![IntakeMessage::Prompt(next)])
    }

    fn accept_bachelor_field(&self, profile: &mut ApplicantProfile, input: &str) -> Transition {
        if !valid_major(input, &self.config.majors) {
            return Transition::reject(IntakeState::BachelorField);
        }
        profile.bachelor_field = Some(input.to_string());

        let level = self
            .config
            .degree_level(profile.degree.as_deref().unwrap_or_default());
        let next = if level >= DegreeLevel::Master {
            IntakeState::MasterField
        } else {
            IntakeState::Gpa
        };
        Transition::to(next, vec![IntakeMessage::Prompt(next)])
    }

    fn accept_master_field(&self, profile: &mut ApplicantProfile, input: &str) -> Transition {
        if !valid_major(input, &self.config.majors) {
            return Transition::reject(IntakeState::MasterField);
        }
        profile.master_field = Some(input.to_string());
        Transition::to(
            IntakeState::Gpa,
            vec![IntakeMessage::Prompt(IntakeState::Gpa)],
        )
    }

    fn accept_gpa(&self, profile: &mut ApplicantProfile, input: &str) -> Transition {
        let Some(gpa) = parse_gpa(input) else {
            return Transition::reject(IntakeState::Gpa);
        };
        profile.gpa = Some(gpa);

        let mut messages = Vec::new();
        let minimum = self.config.eligibility.min_gpa;
        if gpa < minimum {
            messages.push(IntakeMessage::Advisory(Advisory::GpaBelowMinimum {
                gpa,
                minimum,
            }));
        }
        messages.push(IntakeMessage::Prompt(IntakeState::Language));
        Transition::to(IntakeState::Language, messages)
    }

    fn accept_language(&self, profile: &mut ApplicantProfile, input: &str) -> Transition {
        let Some(level) = LanguageLevel::parse(input) else {
            return Transition::reject(IntakeState::Language);
        };
        profile.language_level = Some(level);

        let mut messages = Vec::new();
        let minimum = self.config.eligibility.min_language_level;
        if level.rank() < minimum.rank() {
            messages.push(IntakeMessage::Advisory(Advisory::LanguageBelowMinimum {
                level,
                minimum,
            }));
        }
        messages.push(IntakeMessage::Prompt(IntakeState::Budget));
        Transition::to(IntakeState::Budget, messages)
    }

    fn accept_budget(&self, profile: &mut ApplicantProfile, input: &str) -> Transition {
        let Some(option) = self.config.budget_option(input) else {
            return Transition::reject(IntakeState::Budget);
        };
        profile.budget = Some(option.label.clone());
        profile.budget_category = Some(option.category);

        Transition::to(
            IntakeState::Country,
            vec![
                IntakeMessage::CountryHint {
                    category: option.category,
                    countries: option.countries.clone(),
                },
                IntakeMessage::Prompt(IntakeState::Country),
            ],
        )
    }

    fn accept_country(&self, profile: &mut ApplicantProfile, input: &str) -> Transition {
        profile.preferred_country = Some(input.to_string());

        let assessment = self.assess(profile);
        let eligible = assessment.eligibility.eligible;
        let mut messages = assessment.into_messages();
        messages.push(IntakeMessage::Completed);

        Transition::finish(IntakeOutcome::Assessed { eligible }, messages)
    }
}
