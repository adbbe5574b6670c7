//! Stateless input predicates gating each intake transition.
//!
//! Major and degree matching is substring containment of the applicant's text inside a
//! canonical label, without normalization beyond lower-casing.

use super::domain::LanguageLevel;

pub const MIN_APPLICANT_AGE: u8 = 16;
pub const MAX_APPLICANT_AGE: u8 = 80;
pub const GPA_SCALE_MIN: f64 = 0.0;
pub const GPA_SCALE_MAX: f64 = 20.0;

/// Sentinel accepted as a major even when no canonical label contains it.
pub const OTHER_MAJOR: &str = "other";

pub fn parse_age(text: &str) -> Option<u8> {
    let value = text.trim().parse::<i64>().ok()?;
    if (i64::from(MIN_APPLICANT_AGE)..=i64::from(MAX_APPLICANT_AGE)).contains(&value) {
        u8::try_from(value).ok()
    } else {
        None
    }
}

pub fn parse_gpa(text: &str) -> Option<f64> {
    let value = text.trim().parse::<f64>().ok()?;
    (GPA_SCALE_MIN..=GPA_SCALE_MAX)
        .contains(&value)
        .then_some(value)
}

pub fn valid_age(text: &str) -> bool {
    parse_age(text).is_some()
}

pub fn valid_gpa(text: &str) -> bool {
    parse_gpa(text).is_some()
}

pub fn valid_language_level(text: &str) -> bool {
    LanguageLevel::parse(text).is_some()
}

pub fn valid_major<S: AsRef<str>>(text: &str, majors: &[S]) -> bool {
    let needle = text.to_lowercase();
    majors
        .iter()
        .any(|major| major.as_ref().to_lowercase().contains(&needle))
        || needle == OTHER_MAJOR
}

pub fn valid_degree<S: AsRef<str>>(text: &str, degrees: &[S]) -> bool {
    let needle = text.to_lowercase();
    degrees
        .iter()
        .any(|degree| degree.as_ref().to_lowercase().contains(&needle))
}
