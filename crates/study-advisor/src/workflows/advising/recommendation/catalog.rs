use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::CatalogConfig;

/// Destination country reference entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub description: String,
    pub language_requirement: String,
    pub avg_tuition: String,
    pub application_deadline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_requirements: Option<Vec<String>>,
}

/// Study program reference entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyProgramRecord {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub level: String,
    pub duration: String,
    #[serde(default)]
    pub min_gpa: f64,
    pub requirements: String,
    #[serde(default)]
    pub focus_areas: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CountryCatalogFile {
    #[serde(default)]
    countries: Vec<CountryRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct ProgramCatalogFile {
    #[serde(default)]
    programs: Vec<StudyProgramRecord>,
}

/// Where a catalog's records came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    BuiltIn,
    Inline,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "file {}", path.display()),
            CatalogSource::BuiltIn => f.write_str("built-in dataset"),
            CatalogSource::Inline => f.write_str("inline records"),
        }
    }
}

/// Failure reading a catalog file. Never reaches a session: the loader falls back instead.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only country and program catalogs shared by every session.
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    countries: Vec<CountryRecord>,
    programs: Vec<StudyProgramRecord>,
    countries_source: CatalogSource,
    programs_source: CatalogSource,
}

impl ReferenceCatalog {
    pub fn new(countries: Vec<CountryRecord>, programs: Vec<StudyProgramRecord>) -> Self {
        Self {
            countries,
            programs,
            countries_source: CatalogSource::Inline,
            programs_source: CatalogSource::Inline,
        }
    }

    pub fn built_in() -> Self {
        Self {
            countries: default_countries(),
            programs: default_programs(),
            countries_source: CatalogSource::BuiltIn,
            programs_source: CatalogSource::BuiltIn,
        }
    }

    /// Load both catalogs, substituting the built-in dataset for whichever one cannot be
    /// read or parsed.
    pub fn load(config: &CatalogConfig) -> Self {
        let (countries, countries_source) = match read_countries_file(&config.countries_path) {
            Ok(countries) => {
                info!(path = %config.countries_path.display(), count = countries.len(), "loaded country catalog");
                (countries, CatalogSource::File(config.countries_path.clone()))
            }
            Err(err) => {
                warn!(error = %err, "country catalog unavailable, using built-in dataset");
                (default_countries(), CatalogSource::BuiltIn)
            }
        };

        let (programs, programs_source) = match read_programs_file(&config.programs_path) {
            Ok(programs) => {
                info!(path = %config.programs_path.display(), count = programs.len(), "loaded program catalog");
                (programs, CatalogSource::File(config.programs_path.clone()))
            }
            Err(err) => {
                warn!(error = %err, "program catalog unavailable, using built-in dataset");
                (default_programs(), CatalogSource::BuiltIn)
            }
        };

        Self {
            countries,
            programs,
            countries_source,
            programs_source,
        }
    }

    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }

    pub fn programs(&self) -> &[StudyProgramRecord] {
        &self.programs
    }

    pub fn countries_source(&self) -> &CatalogSource {
        &self.countries_source
    }

    pub fn programs_source(&self) -> &CatalogSource {
        &self.programs_source
    }
}

impl Default for ReferenceCatalog {
    fn default() -> Self {
        Self::built_in()
    }
}

pub fn read_countries<R: Read>(reader: R) -> Result<Vec<CountryRecord>, serde_json::Error> {
    let file: CountryCatalogFile = serde_json::from_reader(reader)?;
    Ok(file.countries)
}

pub fn read_programs<R: Read>(reader: R) -> Result<Vec<StudyProgramRecord>, serde_json::Error> {
    let file: ProgramCatalogFile = serde_json::from_reader(reader)?;
    Ok(file.programs)
}

fn read_countries_file(path: &Path) -> Result<Vec<CountryRecord>, CatalogError> {
    let file = open(path)?;
    read_countries(std::io::BufReader::new(file)).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_programs_file(path: &Path) -> Result<Vec<StudyProgramRecord>, CatalogError> {
    let file = open(path)?;
    read_programs(std::io::BufReader::new(file)).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn open(path: &Path) -> Result<std::fs::File, CatalogError> {
    std::fs::File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn default_countries() -> Vec<CountryRecord> {
    vec![
        CountryRecord {
            name: "United States".to_string(),
            aliases: strings(&["USA", "US", "America"]),
            description:
                "World-renowned universities with diverse programs and research opportunities"
                    .to_string(),
            language_requirement: "TOEFL 80+ or IELTS 6.5+".to_string(),
            avg_tuition: "$20,000-60,000 per year".to_string(),
            application_deadline: "December-February".to_string(),
            additional_requirements: Some(strings(&[
                "SAT/GRE scores may be required",
                "Financial statement required",
            ])),
        },
        CountryRecord {
            name: "Canada".to_string(),
            aliases: strings(&["CA"]),
            description: "High-quality education with post-graduation work opportunities"
                .to_string(),
            language_requirement: "IELTS 6.5+ or TOEFL 90+".to_string(),
            avg_tuition: "$15,000-35,000 CAD per year".to_string(),
            application_deadline: "January-March".to_string(),
            additional_requirements: Some(strings(&[
                "Study permit required",
                "Medical exam may be required",
            ])),
        },
        CountryRecord {
            name: "United Kingdom".to_string(),
            aliases: strings(&["UK", "Britain", "England"]),
            description: "Prestigious universities with rich academic tradition".to_string(),
            language_requirement: "IELTS 6.5+ or TOEFL 90+".to_string(),
            avg_tuition: "£15,000-45,000 per year".to_string(),
            application_deadline: "January (UCAS deadline)".to_string(),
            additional_requirements: Some(strings(&[
                "UCAS application required",
                "Tier 4 student visa",
            ])),
        },
    ]
}

fn default_programs() -> Vec<StudyProgramRecord> {
    vec![
        StudyProgramRecord {
            name: "International Business Administration".to_string(),
            fields: strings(&["Business Administration", "Economics"]),
            level: "Graduate".to_string(),
            duration: "2 years".to_string(),
            min_gpa: 14.0,
            requirements: "Bachelor's degree, IELTS 6.5+".to_string(),
            focus_areas: strings(&[
                "Global Management",
                "International Trade",
                "Strategic Planning",
            ]),
        },
        StudyProgramRecord {
            name: "Computer Science & Engineering".to_string(),
            fields: strings(&["Computer Science", "Engineering"]),
            level: "Graduate".to_string(),
            duration: "2 years".to_string(),
            min_gpa: 15.0,
            requirements: "Bachelor's in related field, IELTS 6.5+".to_string(),
            focus_areas: strings(&["AI/ML", "Software Engineering", "Data Science"]),
        },
        StudyProgramRecord {
            name: "International Relations".to_string(),
            fields: strings(&["Law", "Arts", "Sciences"]),
            level: "Graduate".to_string(),
            duration: "2 years".to_string(),
            min_gpa: 13.5,
            requirements: "Bachelor's degree, IELTS 6.0+".to_string(),
            focus_areas: strings(&["Diplomacy", "Global Politics", "International Law"]),
        },
    ]
}
