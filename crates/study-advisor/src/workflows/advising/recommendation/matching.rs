use std::cmp::Ordering;

use super::super::domain::DegreeLevel;
use super::catalog::{CountryRecord, StudyProgramRecord};

/// Program level as inferred from its free-text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProgramLevel {
    Undergraduate,
    Graduate,
    Doctorate,
    Open,
}

impl ProgramLevel {
    /// `undergraduate` contains `graduate`, so the undergraduate check must run first.
    pub(crate) fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("undergraduate") || label.contains("bachelor") {
            ProgramLevel::Undergraduate
        } else if label.contains("graduate") || label.contains("master") {
            ProgramLevel::Graduate
        } else if label.contains("phd") || label.contains("doctorate") {
            ProgramLevel::Doctorate
        } else {
            ProgramLevel::Open
        }
    }

    pub(crate) fn admits(self, degree: DegreeLevel) -> bool {
        match self {
            ProgramLevel::Undergraduate => degree <= DegreeLevel::Associate,
            ProgramLevel::Graduate => degree >= DegreeLevel::Bachelor,
            ProgramLevel::Doctorate => degree >= DegreeLevel::Master,
            ProgramLevel::Open => true,
        }
    }
}

/// First catalog entry whose name contains the preference, or whose alias is contained in
/// the preference.
pub(crate) fn find_country<'a>(
    countries: &'a [CountryRecord],
    preferred_country: &str,
) -> Option<&'a CountryRecord> {
    let preferred = preferred_country.to_lowercase();
    countries.iter().find(|country| {
        country.name.to_lowercase().contains(&preferred)
            || country
                .aliases
                .iter()
                .any(|alias| preferred.contains(&alias.to_lowercase()))
    })
}

pub(crate) fn program_qualifies(
    program: &StudyProgramRecord,
    major: &str,
    degree: DegreeLevel,
    gpa: f64,
) -> bool {
    let major = major.to_lowercase();
    program
        .fields
        .iter()
        .any(|field| field.to_lowercase() == major)
        && gpa >= program.min_gpa
        && ProgramLevel::classify(&program.level).admits(degree)
}

/// Highest minimum GPA first; equal minimums order by name.
pub(crate) fn rank_programs(left: &StudyProgramRecord, right: &StudyProgramRecord) -> Ordering {
    right
        .min_gpa
        .total_cmp(&left.min_gpa)
        .then_with(|| left.name.cmp(&right.name))
}

pub(crate) fn matching_programs<'a>(
    programs: &'a [StudyProgramRecord],
    major: &str,
    degree: DegreeLevel,
    gpa: f64,
) -> Vec<&'a StudyProgramRecord> {
    let mut matches: Vec<&StudyProgramRecord> = programs
        .iter()
        .filter(|program| program_qualifies(program, major, degree, gpa))
        .collect();
    matches.sort_by(|left, right| rank_programs(left, right));
    matches
}
