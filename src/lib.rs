//! Inclusive Match - employer matching for job seekers with disabilities
//!
//! This library builds the feature vectors a pre-trained compatibility model
//! expects, scores every employer in the seeker's preferred industry, and
//! decides how the ranked result should be displayed.

pub mod config;
pub mod core;
pub mod models;
pub mod render;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_feature_vector, DisplayTier, FeatureVector, MatchError, MatchOutcome, Matcher, ScoringModel};
pub use crate::models::{AccommodationType, EmployerRecord, FindMatchesRequest, FindMatchesResponse, JobSeekerProfile, MatchResult};
pub use crate::render::render_lines;
