// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AccommodationType, DisabilityType, EmployerRecord, Industry, JobSeekerProfile, MatchResult,
    UnknownLabel, WorkPreference, MAX_EXPERIENCE_YEARS,
};
pub use requests::FindMatchesRequest;
pub use responses::{ErrorResponse, ExperienceRange, FindMatchesResponse, HealthResponse, OptionsResponse};
