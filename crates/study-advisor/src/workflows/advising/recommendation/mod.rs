mod catalog;
mod guidance;
mod matching;
mod report;

pub use catalog::{
    read_countries, read_programs, CatalogError, CatalogSource, CountryRecord, ReferenceCatalog,
    StudyProgramRecord,
};
pub use guidance::TimelineEntry;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::config::AdvisingConfig;
use super::domain::ApplicantProfile;

const MAX_RECOMMENDED_PROGRAMS: usize = 3;

/// Ranked recommendations produced for an eligible applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    pub country: Option<CountryRecord>,
    pub programs: Vec<StudyProgramRecord>,
    pub scholarships: Vec<String>,
    pub next_steps: Vec<String>,
    pub timeline: Vec<TimelineEntry>,
}

impl RecommendationBundle {
    pub fn render(&self) -> String {
        report::render_bundle(self)
    }
}

/// Matches profiles against the shared reference catalogs.
#[derive(Debug, Clone)]
pub struct RecommendationMatcher {
    config: Arc<AdvisingConfig>,
    catalog: Arc<ReferenceCatalog>,
}

impl RecommendationMatcher {
    pub fn new(config: Arc<AdvisingConfig>, catalog: Arc<ReferenceCatalog>) -> Self {
        Self { config, catalog }
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    pub fn recommend(&self, profile: &ApplicantProfile) -> RecommendationBundle {
        recommend(profile, &self.config, &self.catalog)
    }
}

pub fn recommend(
    profile: &ApplicantProfile,
    config: &AdvisingConfig,
    catalog: &ReferenceCatalog,
) -> RecommendationBundle {
    let country = profile
        .preferred_country
        .as_deref()
        .and_then(|preferred| matching::find_country(catalog.countries(), preferred));

    let degree = config.degree_level(profile.degree.as_deref().unwrap_or_default());
    let programs = matching::matching_programs(
        catalog.programs(),
        profile.major.as_deref().unwrap_or_default(),
        degree,
        profile.effective_gpa(),
    )
    .into_iter()
    .take(MAX_RECOMMENDED_PROGRAMS)
    .cloned()
    .collect();

    RecommendationBundle {
        country: country.cloned(),
        programs,
        scholarships: guidance::scholarships(profile, country, config),
        next_steps: guidance::next_steps(profile, country),
        timeline: guidance::application_timeline(),
    }
}
