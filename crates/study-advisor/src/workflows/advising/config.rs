use serde::{Deserialize, Serialize};

use super::domain::{BudgetCategory, DegreeLevel, LanguageLevel};
use super::evaluation::EligibilityConfig;

/// Degree label offered during intake together with its rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeDefinition {
    pub label: String,
    pub level: DegreeLevel,
}

/// One of the enumerated budget ranges and the countries suggested for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetOption {
    pub label: String,
    pub category: BudgetCategory,
    pub countries: Vec<String>,
}

/// Immutable thresholds and enumerations shared by intake, evaluation, and matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisingConfig {
    pub eligibility: EligibilityConfig,
    /// Applicants holding an associate degree at or above this age end intake early.
    pub associate_age_limit: u8,
    pub majors: Vec<String>,
    /// Lower-cased majors that earn the STEM grant line.
    pub stem_majors: Vec<String>,
    pub degrees: Vec<DegreeDefinition>,
    pub budget_options: Vec<BudgetOption>,
}

impl AdvisingConfig {
    /// Rank of a stored degree label; only exact (case-insensitive) labels resolve.
    pub fn degree_level(&self, label: &str) -> DegreeLevel {
        self.degrees
            .iter()
            .find(|degree| degree.label.eq_ignore_ascii_case(label))
            .map(|degree| degree.level)
            .unwrap_or(DegreeLevel::Unrecognized)
    }

    pub fn degree_labels(&self) -> Vec<&str> {
        self.degrees
            .iter()
            .map(|degree| degree.label.as_str())
            .collect()
    }

    /// Budget selection is matched by equality, never fuzzily.
    pub fn budget_option(&self, label: &str) -> Option<&BudgetOption> {
        self.budget_options
            .iter()
            .find(|option| option.label == label)
    }

    pub fn is_stem_major(&self, major: &str) -> bool {
        let major = major.to_lowercase();
        self.stem_majors.iter().any(|stem| *stem == major)
    }
}

impl Default for AdvisingConfig {
    fn default() -> Self {
        let low = ["Italy", "Germany", "Austria", "Turkey", "Russia"];
        let medium = ["Netherlands", "Sweden", "Denmark", "Finland"];
        let high = ["Canada", "United Kingdom", "Australia"];

        let medium_countries: Vec<&str> = low.iter().chain(medium.iter()).copied().collect();
        let high_countries: Vec<&str> = medium_countries
            .iter()
            .chain(high.iter())
            .copied()
            .collect();

        Self {
            eligibility: EligibilityConfig {
                min_gpa: 13.0,
                max_age: 40,
                min_language_level: LanguageLevel::B1,
            },
            associate_age_limit: 23,
            majors: [
                "Computer Science",
                "Engineering",
                "Business Administration",
                "Medicine",
                "Law",
                "Arts",
                "Sciences",
                "Education",
                "Economics",
                "Psychology",
                "Other",
            ]
            .iter()
            .map(|major| major.to_string())
            .collect(),
            stem_majors: vec![
                "computer science".to_string(),
                "engineering".to_string(),
                "sciences".to_string(),
            ],
            degrees: vec![
                degree("bachelor's degree", DegreeLevel::Bachelor),
                degree("master's degree", DegreeLevel::Master),
                degree("phd/doctorate", DegreeLevel::Doctorate),
                degree("associate degree", DegreeLevel::Associate),
                degree("diploma", DegreeLevel::Diploma),
                degree("high school diploma", DegreeLevel::Diploma),
            ],
            budget_options: vec![
                BudgetOption {
                    label: "Less than 2 billion tomans".to_string(),
                    category: BudgetCategory::Low,
                    countries: country_list(&low),
                },
                BudgetOption {
                    label: "Between 2 and 3 billion tomans".to_string(),
                    category: BudgetCategory::Medium,
                    countries: country_list(&medium_countries),
                },
                BudgetOption {
                    label: "More than 3 billion tomans".to_string(),
                    category: BudgetCategory::High,
                    countries: country_list(&high_countries),
                },
            ],
        }
    }
}

fn country_list(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn degree(label: &str, level: DegreeLevel) -> DegreeDefinition {
    DegreeDefinition {
        label: label.to_string(),
        level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_lookup_is_exact_and_case_insensitive() {
        let config = AdvisingConfig::default();
        assert_eq!(
            config.degree_level("Associate Degree"),
            DegreeLevel::Associate
        );
        assert_eq!(config.degree_level("phd/doctorate"), DegreeLevel::Doctorate);
        assert_eq!(config.degree_level("bachelor"), DegreeLevel::Unrecognized);
    }

    #[test]
    fn budget_options_nest_country_hints() {
        let config = AdvisingConfig::default();
        let counts: Vec<usize> = config
            .budget_options
            .iter()
            .map(|option| option.countries.len())
            .collect();
        assert_eq!(counts, vec![5, 9, 12]);

        let high = config
            .budget_option("More than 3 billion tomans")
            .expect("high budget option");
        assert_eq!(high.category, BudgetCategory::High);
        assert!(high.countries.iter().any(|country| country == "Canada"));
        assert!(config.budget_option("more than 3 billion tomans").is_none());
    }

    #[test]
    fn stem_detection_is_exact_on_lowercased_major() {
        let config = AdvisingConfig::default();
        assert!(config.is_stem_major("Computer Science"));
        assert!(config.is_stem_major("SCIENCES"));
        assert!(!config.is_stem_major("Science"));
        assert!(!config.is_stem_major("Law"));
    }
}
