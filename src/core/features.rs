use crate::models::{AccommodationType, EmployerRecord, JobSeekerProfile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
use validator::Validate;

/// Version tag of the feature layout produced by [`build_feature_vector`].
///
/// Bump whenever a field is added, removed, renamed or reordered.
pub const FEATURE_SCHEMA_VERSION: &str = "employment-match/v1";

/// Six raw attributes plus a need/provide pair per accommodation type
pub const FEATURE_COUNT: usize = 6 + 2 * 7;

/// Errors raised while building a feature vector
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("invalid job seeker profile: {0}")]
    InvalidProfile(#[from] validator::ValidationErrors),

    #[error("invalid employer record: {0}")]
    InvalidEmployer(String),
}

/// One column of the model input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureField {
    DisabilityType,
    ExperienceYears,
    WorkPreference,
    CompanySize,
    Industry,
    RemotePolicy,
    Needs(AccommodationType),
    Provides(AccommodationType),
}

impl FeatureField {
    /// Every field in model column order
    pub fn all() -> &'static [FeatureField] {
        static FIELDS: OnceLock<Vec<FeatureField>> = OnceLock::new();
        FIELDS.get_or_init(|| {
            let mut fields = vec![
                FeatureField::DisabilityType,
                FeatureField::ExperienceYears,
                FeatureField::WorkPreference,
                FeatureField::CompanySize,
                FeatureField::Industry,
                FeatureField::RemotePolicy,
            ];
            for accommodation in AccommodationType::ALL {
                fields.push(FeatureField::Needs(*accommodation));
                fields.push(FeatureField::Provides(*accommodation));
            }
            fields
        })
    }

    /// Column name the scoring model was trained with
    pub fn name(&self) -> String {
        match self {
            FeatureField::DisabilityType => "disability_type".to_string(),
            FeatureField::ExperienceYears => "experience_years".to_string(),
            FeatureField::WorkPreference => "work_preference".to_string(),
            FeatureField::CompanySize => "company_size".to_string(),
            FeatureField::Industry => "industry".to_string(),
            FeatureField::RemotePolicy => "remote_policy".to_string(),
            FeatureField::Needs(accommodation) => format!("emp_needs_{}", accommodation.as_str()),
            FeatureField::Provides(accommodation) => {
                format!("employer_provides_{}", accommodation.as_str())
            }
        }
    }

    fn value(&self, profile: &JobSeekerProfile, employer: &EmployerRecord) -> FeatureValue {
        match self {
            FeatureField::DisabilityType => FeatureValue::text(profile.disability_type.as_str()),
            FeatureField::ExperienceYears => FeatureValue::Integer(profile.experience_years as i64),
            FeatureField::WorkPreference => FeatureValue::text(profile.work_preference.as_str()),
            FeatureField::CompanySize => FeatureValue::text(&employer.company_size),
            FeatureField::Industry => FeatureValue::text(&employer.industry),
            FeatureField::RemotePolicy => FeatureValue::text(&employer.remote_policy),
            FeatureField::Needs(accommodation) => FeatureValue::flag(profile.needs(*accommodation)),
            FeatureField::Provides(accommodation) => {
                FeatureValue::flag(employer.provides(*accommodation))
            }
        }
    }
}

/// Versioned, ordered list of model input columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: String,
    pub fields: Vec<String>,
}

impl FeatureSchema {
    /// Schema of the vectors produced by this crate
    pub fn current() -> &'static FeatureSchema {
        static SCHEMA: OnceLock<FeatureSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| FeatureSchema {
            version: FEATURE_SCHEMA_VERSION.to_string(),
            fields: FeatureField::all().iter().map(FeatureField::name).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field == name)
    }
}

/// Value of a single feature column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Text(String),
}

impl FeatureValue {
    fn text(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }

    fn flag(set: bool) -> Self {
        FeatureValue::Integer(i64::from(set))
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FeatureValue::Integer(value) => Some(*value),
            FeatureValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(value) => Some(value),
            FeatureValue::Integer(_) => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Integer(value) => write!(f, "{}", value),
            FeatureValue::Text(value) => f.write_str(value),
        }
    }
}

/// Model input for one (job seeker, employer) pair, in schema column order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(&'static str, FeatureValue)>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.entries
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> + '_ {
        self.entries.iter().map(|(name, value)| (*name, value))
    }
}

/// Build the model input for a job seeker and one employer.
///
/// Column names and order come from [`FeatureSchema::current`], so the
/// vector always has [`FEATURE_COUNT`] entries.
pub fn build_feature_vector(
    profile: &JobSeekerProfile,
    employer: &EmployerRecord,
) -> Result<FeatureVector, FeatureError> {
    profile.validate()?;

    if employer.name.trim().is_empty() {
        return Err(FeatureError::InvalidEmployer(
            "employer name must not be empty".to_string(),
        ));
    }

    let schema = FeatureSchema::current();
    let entries = FeatureField::all()
        .iter()
        .zip(schema.fields.iter())
        .map(|(field, name)| (name.as_str(), field.value(profile, employer)))
        .collect();

    Ok(FeatureVector { entries })
}
