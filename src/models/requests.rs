use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;
use crate::models::domain::{AccommodationType, DisabilityType, Industry, JobSeekerProfile, WorkPreference};

/// Request to find the best employer matches for a job seeker
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[serde(alias = "disability_type", rename = "disabilityType")]
    pub disability_type: DisabilityType,
    #[validate(range(max = 30))]
    #[serde(alias = "experience_years", rename = "experienceYears", default = "default_experience")]
    pub experience_years: u8,
    #[serde(alias = "work_preference", rename = "workPreference")]
    pub work_preference: WorkPreference,
    #[serde(alias = "industry_preference", rename = "industry")]
    pub industry: Industry,
    #[serde(default)]
    pub accommodations: Vec<AccommodationType>,
}

/// Same default as the experience slider
fn default_experience() -> u8 {
    5
}

impl FindMatchesRequest {
    pub fn into_profile(self) -> JobSeekerProfile {
        JobSeekerProfile {
            disability_type: self.disability_type,
            experience_years: self.experience_years,
            work_preference: self.work_preference,
            industry_preference: self.industry,
            desired_accommodations: self.accommodations.into_iter().collect::<BTreeSet<_>>(),
        }
    }
}
