use serde::{Deserialize, Serialize};

/// Conversation steps in collection order. Bracketed steps in the flow
/// (`BachelorField`, `MasterField`) are only visited for higher degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeState {
    Age,
    Major,
    Degree,
    BachelorField,
    MasterField,
    Gpa,
    Language,
    Budget,
    Country,
    Terminal,
}

impl IntakeState {
    pub const INITIAL: IntakeState = IntakeState::Age;

    pub const fn label(self) -> &'static str {
        match self {
            IntakeState::Age => "age",
            IntakeState::Major => "major",
            IntakeState::Degree => "degree",
            IntakeState::BachelorField => "bachelor_field",
            IntakeState::MasterField => "master_field",
            IntakeState::Gpa => "gpa",
            IntakeState::Language => "language",
            IntakeState::Budget => "budget",
            IntakeState::Country => "country",
            IntakeState::Terminal => "terminal",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, IntakeState::Terminal)
    }
}

impl std::fmt::Display for IntakeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
