use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

/// A label that does not belong to one of the closed categorical sets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed categorical enum whose wire form is its display label.
///
/// Variant order is the enumeration order, and it drives `ALL` and `Ord`.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($label => Ok($name::$variant),)+
                    _ => Err(UnknownLabel {
                        kind: $kind,
                        value: value.to_string(),
                    }),
                }
            }
        }
    };
}

labeled_enum! {
    /// Disability category reported by the job seeker
    DisabilityType, "disability type" {
        Mobility => "mobility",
        Vision => "vision",
        Hearing => "hearing",
        Cognitive => "cognitive",
        Psychiatric => "psychiatric",
        ChronicHealth => "chronic health",
    }
}

labeled_enum! {
    /// Preferred working arrangement
    WorkPreference, "work preference" {
        FullyRemote => "fully remote",
        Hybrid => "hybrid",
        InOffice => "in-office",
    }
}

labeled_enum! {
    /// Industry sector the job seeker wants to work in
    Industry, "industry" {
        Tech => "tech",
        Healthcare => "healthcare",
        Finance => "finance",
        Retail => "retail",
        Manufacturing => "manufacturing",
    }
}

labeled_enum! {
    /// Workplace accommodation categories.
    ///
    /// The declaration order is the order in which the need/provide flags
    /// appear in the feature vector.
    AccommodationType, "accommodation type" {
        NoiseReduction => "noise reduction",
        ModifiedTrainingMaterials => "modified training materials",
        RemoteWork => "remote work",
        PhysicalWorkspaceModifications => "physical workspace modifications",
        FlexibleSchedule => "flexible schedule",
        InterpreterServices => "interpreter services",
        AssistiveTechnology => "assistive technology",
    }
}

pub const MAX_EXPERIENCE_YEARS: u8 = 30;

/// Attributes of the job seeker for a single match request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct JobSeekerProfile {
    #[serde(rename = "disabilityType")]
    pub disability_type: DisabilityType,
    #[validate(range(max = 30))]
    #[serde(rename = "experienceYears")]
    pub experience_years: u8,
    #[serde(rename = "workPreference")]
    pub work_preference: WorkPreference,
    #[serde(rename = "industry")]
    pub industry_preference: Industry,
    #[serde(rename = "accommodations", default)]
    pub desired_accommodations: BTreeSet<AccommodationType>,
}

impl JobSeekerProfile {
    pub fn needs(&self, accommodation: AccommodationType) -> bool {
        self.desired_accommodations.contains(&accommodation)
    }
}

/// Employer entry from the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerRecord {
    pub name: String,
    #[serde(rename = "companySize")]
    pub company_size: String,
    /// Industry exactly as stored in the directory
    pub industry: String,
    #[serde(rename = "remotePolicy")]
    pub remote_policy: String,
    #[serde(rename = "availableAccommodations", default)]
    pub available_accommodations: BTreeSet<AccommodationType>,
}

impl EmployerRecord {
    pub fn provides(&self, accommodation: AccommodationType) -> bool {
        self.available_accommodations.contains(&accommodation)
    }
}

/// Scored employer, score expressed as a percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "employerName")]
    pub employer_name: String,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
}
