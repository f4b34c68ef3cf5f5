use crate::core::{
    features::{build_feature_vector, FeatureError},
    filters::filter_by_industry,
    ranking::{rank, DisplayTier, RankedMatches, RankingPolicy},
    scoring::{score_percentage, ScoringError, ScoringModel},
};
use crate::models::{EmployerRecord, JobSeekerProfile, MatchResult};
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

/// What to do when the model fails on one candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Fail the whole request
    #[default]
    Abort,
    /// Drop the candidate and keep going
    Skip,
}

/// Errors that end a match request
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("employer directory is empty")]
    EmptyDirectory,

    #[error("invalid input: {0}")]
    InvalidInput(#[from] FeatureError),

    #[error("scoring failed for employer '{employer}': {source}")]
    Scoring {
        employer: String,
        #[source]
        source: ScoringError,
    },
}

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub ranked: RankedMatches,
    pub total_employers: usize,
    /// Employers in the preferred industry
    pub candidates: usize,
    pub scored: usize,
    /// Employers dropped under [`FailurePolicy::Skip`]
    pub skipped: Vec<String>,
}

impl MatchOutcome {
    /// True when no employer could be shown (the empty result set)
    pub fn is_empty(&self) -> bool {
        self.ranked.tier == DisplayTier::NoMatches
    }
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Industry filter
/// 2. Feature vector construction
/// 3. Model scoring
/// 4. Ranking and display tier selection
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    policy: RankingPolicy,
    failure_policy: FailurePolicy,
}

impl Matcher {
    pub fn new(policy: RankingPolicy, failure_policy: FailurePolicy) -> Self {
        Self {
            policy,
            failure_policy,
        }
    }

    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Rank employers for a job seeker
    ///
    /// # Arguments
    /// * `profile` - The job seeker's attributes
    /// * `employers` - Every employer in the directory
    /// * `model` - The compatibility model
    ///
    /// # Returns
    /// MatchOutcome with the ranked results and the display tier. Zero
    /// candidates after filtering is a normal outcome with
    /// [`DisplayTier::NoMatches`].
    pub fn find_matches(
        &self,
        profile: &JobSeekerProfile,
        employers: &[EmployerRecord],
        model: &dyn ScoringModel,
    ) -> Result<MatchOutcome, MatchError> {
        if employers.is_empty() {
            return Err(MatchError::EmptyDirectory);
        }

        profile.validate().map_err(FeatureError::from)?;

        let candidates = filter_by_industry(employers, profile);
        tracing::debug!(
            "{} of {} employers in industry '{}'",
            candidates.len(),
            employers.len(),
            profile.industry_preference
        );

        let mut results = Vec::with_capacity(candidates.len());
        let mut skipped = Vec::new();

        for employer in &candidates {
            let features = build_feature_vector(profile, employer)?;

            match score_percentage(model, &features) {
                Ok(score) => {
                    tracing::trace!("Scored {}: {:.3}", employer.name, score);
                    results.push(MatchResult {
                        employer_name: employer.name.clone(),
                        match_score: score,
                    });
                }
                Err(source) if self.failure_policy == FailurePolicy::Skip => {
                    tracing::warn!("Skipping employer {}: {}", employer.name, source);
                    skipped.push(employer.name.clone());
                }
                Err(source) => {
                    return Err(MatchError::Scoring {
                        employer: employer.name.clone(),
                        source,
                    });
                }
            }
        }

        let scored = results.len();
        let ranked = rank(results, &self.policy);

        Ok(MatchOutcome {
            ranked,
            total_employers: employers.len(),
            candidates: candidates.len(),
            scored,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::{FeatureSchema, FeatureValue, FeatureVector};
    use crate::models::{AccommodationType, DisabilityType, Industry, WorkPreference};
    use std::collections::BTreeSet;

    /// Scores by company size and rejects employers named "broken"
    struct SizeModel;

    impl ScoringModel for SizeModel {
        fn schema(&self) -> &FeatureSchema {
            FeatureSchema::current()
        }

        fn predict(&self, features: &FeatureVector) -> Result<f64, ScoringError> {
            match features.get("company_size").and_then(FeatureValue::as_text) {
                Some("large") => Ok(0.9),
                Some("medium") => Ok(0.6),
                Some("broken") => Err(ScoringError::Model("cannot score".to_string())),
                _ => Ok(0.3),
            }
        }
    }

    fn create_employer(name: &str, industry: &str, size: &str) -> EmployerRecord {
        EmployerRecord {
            name: name.to_string(),
            company_size: size.to_string(),
            industry: industry.to_string(),
            remote_policy: "hybrid".to_string(),
            available_accommodations: [AccommodationType::RemoteWork].into_iter().collect(),
        }
    }

    fn create_profile() -> JobSeekerProfile {
        JobSeekerProfile {
            disability_type: DisabilityType::Hearing,
            experience_years: 4,
            work_preference: WorkPreference::FullyRemote,
            industry_preference: Industry::Tech,
            desired_accommodations: BTreeSet::new(),
        }
    }

    #[test]
    fn test_find_matches_basic() {
        let employers = vec![
            create_employer("Small Tech", "tech", "small"),
            create_employer("Big Bank", "finance", "large"),
            create_employer("Big Tech", "tech", "large"),
        ];

        let outcome = Matcher::default()
            .find_matches(&create_profile(), &employers, &SizeModel)
            .unwrap();

        assert_eq!(outcome.total_employers, 3);
        assert_eq!(outcome.candidates, 2);
        assert_eq!(outcome.scored, 2);
        assert_eq!(outcome.ranked.results[0].employer_name, "Big Tech");
        assert!((outcome.ranked.results[0].match_score - 90.0).abs() < 1e-9);
        assert!(outcome.ranked.results.iter().all(|r| r.employer_name != "Big Bank"));
    }

    #[test]
    fn test_empty_directory_is_error() {
        let result = Matcher::default().find_matches(&create_profile(), &[], &SizeModel);

        assert!(matches!(result, Err(MatchError::EmptyDirectory)));
    }

    #[test]
    fn test_no_candidates_is_normal_outcome() {
        let employers = vec![create_employer("Big Bank", "finance", "large")];

        let outcome = Matcher::default()
            .find_matches(&create_profile(), &employers, &SizeModel)
            .unwrap();

        assert!(outcome.is_empty());
        assert_eq!(outcome.candidates, 0);
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let mut profile = create_profile();
        profile.experience_years = 31;
        let employers = vec![create_employer("Big Tech", "tech", "large")];

        let result = Matcher::default().find_matches(&profile, &employers, &SizeModel);
        assert!(matches!(result, Err(MatchError::InvalidInput(_))));
    }

    #[test]
    fn test_abort_policy_fails_request() {
        let employers = vec![
            create_employer("Fine", "tech", "large"),
            create_employer("Faulty", "tech", "broken"),
        ];

        let result = Matcher::default().find_matches(&create_profile(), &employers, &SizeModel);
        match result {
            Err(MatchError::Scoring { employer, .. }) => assert_eq!(employer, "Faulty"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_skip_policy_drops_candidate() {
        let employers = vec![
            create_employer("Fine", "tech", "large"),
            create_employer("Faulty", "tech", "broken"),
        ];
        let matcher = Matcher::new(RankingPolicy::default(), FailurePolicy::Skip);

        let outcome = matcher.find_matches(&create_profile(), &employers, &SizeModel).unwrap();
        assert_eq!(outcome.candidates, 2);
        assert_eq!(outcome.scored, 1);
        assert_eq!(outcome.skipped, vec!["Faulty".to_string()]);
        assert_eq!(outcome.ranked.results.len(), 1);
    }

    #[test]
    fn test_failure_policy_deserializes() {
        let policy: FailurePolicy = serde_json::from_str("\"skip\"").unwrap();
        assert_eq!(policy, FailurePolicy::Skip);
        assert_eq!(FailurePolicy::default(), FailurePolicy::Abort);
    }
}
