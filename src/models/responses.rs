use serde::{Deserialize, Serialize};
use crate::core::ranking::DisplayTier;
use crate::models::domain::MatchResult;

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "topScore")]
    pub top_score: Option<f64>,
    #[serde(rename = "numTopMatches")]
    pub num_top_matches: usize,
    pub display: DisplayTier,
    /// Top ranked results, before the display policy is applied
    pub results: Vec<MatchResult>,
    /// Rendered text for the display tier
    pub lines: Vec<String>,
    #[serde(rename = "totalEmployers")]
    pub total_employers: usize,
    #[serde(rename = "candidatesScored")]
    pub candidates_scored: usize,
    #[serde(rename = "skippedEmployers")]
    pub skipped_employers: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(rename = "employerCount")]
    pub employer_count: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Values accepted by the find matches form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    #[serde(rename = "disabilityTypes")]
    pub disability_types: Vec<String>,
    #[serde(rename = "workPreferences")]
    pub work_preferences: Vec<String>,
    pub industries: Vec<String>,
    pub accommodations: Vec<String>,
    #[serde(rename = "experienceYears")]
    pub experience_years: ExperienceRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceRange {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
