// Core algorithm exports
pub mod features;
pub mod filters;
pub mod matcher;
pub mod ranking;
pub mod scoring;

pub use features::{build_feature_vector, FeatureError, FeatureField, FeatureSchema, FeatureValue, FeatureVector, FEATURE_COUNT, FEATURE_SCHEMA_VERSION};
pub use filters::{filter_by_industry, matches_industry};
pub use matcher::{FailurePolicy, MatchError, MatchOutcome, Matcher};
pub use ranking::{rank, DisplayTier, PolicyError, RankedMatches, RankingPolicy};
pub use scoring::{check_columns, score_percentage, ScoringError, ScoringModel};
