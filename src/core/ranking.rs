use crate::models::MatchResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Limits applied when selecting what to display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingPolicy {
    /// Ranked results kept after sorting
    pub top_n: usize,
    /// Largest tie count still shown as individual scored entries
    pub individual_limit: usize,
    /// Largest tie count listed in full; larger ties are truncated to this
    pub tied_list_limit: usize,
    /// Absolute score distance treated as a tie. 0.0 means exact equality.
    pub tie_tolerance: f64,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            top_n: 25,
            individual_limit: 5,
            tied_list_limit: 20,
            tie_tolerance: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    #[error("top_n must be at least 1")]
    EmptyTopN,

    #[error("individual_limit must be at least 1")]
    EmptyIndividualLimit,

    #[error("tied_list_limit ({tied}) must not be smaller than individual_limit ({individual})")]
    TiedBelowIndividual { tied: usize, individual: usize },

    #[error("tie_tolerance must be a finite, non-negative number")]
    InvalidTolerance,
}

impl RankingPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.top_n == 0 {
            return Err(PolicyError::EmptyTopN);
        }
        if self.individual_limit == 0 {
            return Err(PolicyError::EmptyIndividualLimit);
        }
        if self.tied_list_limit < self.individual_limit {
            return Err(PolicyError::TiedBelowIndividual {
                tied: self.tied_list_limit,
                individual: self.individual_limit,
            });
        }
        if !self.tie_tolerance.is_finite() || self.tie_tolerance < 0.0 {
            return Err(PolicyError::InvalidTolerance);
        }
        Ok(())
    }

    #[inline]
    pub fn is_tied(&self, score: f64, top_score: f64) -> bool {
        if self.tie_tolerance == 0.0 {
            score == top_score
        } else {
            (top_score - score).abs() <= self.tie_tolerance
        }
    }
}

/// What to show for a ranked result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "camelCase")]
pub enum DisplayTier {
    /// No employer survived filtering
    NoMatches,
    /// Few ties: the leading ranked entries, with scores
    Individual {
        #[serde(rename = "numTopMatches")]
        num_top_matches: usize,
        entries: Vec<MatchResult>,
    },
    /// Every employer tied at the top score, names only
    TiedGroup {
        #[serde(rename = "topScore")]
        top_score: f64,
        entries: Vec<MatchResult>,
    },
    /// More ties than can be listed; only the first ones are shown
    Overflow {
        #[serde(rename = "topScore")]
        top_score: f64,
        #[serde(rename = "numTopMatches")]
        num_top_matches: usize,
        entries: Vec<MatchResult>,
    },
}

impl DisplayTier {
    pub fn kind(&self) -> &'static str {
        match self {
            DisplayTier::NoMatches => "no_matches",
            DisplayTier::Individual { .. } => "individual",
            DisplayTier::TiedGroup { .. } => "tied_group",
            DisplayTier::Overflow { .. } => "overflow",
        }
    }

    pub fn entries(&self) -> &[MatchResult] {
        match self {
            DisplayTier::NoMatches => &[],
            DisplayTier::Individual { entries, .. }
            | DisplayTier::TiedGroup { entries, .. }
            | DisplayTier::Overflow { entries, .. } => entries,
        }
    }
}

/// Ranked top results with the chosen display tier
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatches {
    pub results: Vec<MatchResult>,
    pub top_score: Option<f64>,
    pub num_top_matches: usize,
    pub tier: DisplayTier,
}

/// Sort by score descending; equal scores keep their input order
pub fn sort_by_score(results: &mut [MatchResult]) {
    results.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
}

/// Rank scored results and apply the display policy
pub fn rank(mut results: Vec<MatchResult>, policy: &RankingPolicy) -> RankedMatches {
    sort_by_score(&mut results);
    results.truncate(policy.top_n);

    let top_score = results.first().map(|r| r.match_score);
    let (num_top_matches, tier) = {
        let top_matches: Vec<&MatchResult> = match top_score {
            Some(top) => results
                .iter()
                .filter(|r| policy.is_tied(r.match_score, top))
                .collect(),
            None => Vec::new(),
        };
        let num_top_matches = top_matches.len();

        let tier = match (top_score, num_top_matches) {
            (None, _) | (_, 0) => DisplayTier::NoMatches,
            (Some(_), n) if n <= policy.individual_limit => DisplayTier::Individual {
                num_top_matches: n,
                entries: results.iter().take(policy.individual_limit).cloned().collect(),
            },
            (Some(top), n) if n <= policy.tied_list_limit => DisplayTier::TiedGroup {
                top_score: top,
                entries: top_matches.into_iter().cloned().collect(),
            },
            (Some(top), n) => DisplayTier::Overflow {
                top_score: top,
                num_top_matches: n,
                entries: top_matches
                    .into_iter()
                    .take(policy.tied_list_limit)
                    .cloned()
                    .collect(),
            },
        };
        (num_top_matches, tier)
    };

    RankedMatches {
        results,
        top_score,
        num_top_matches,
        tier,
    }
}
