//! Text rendering of a ranked outcome.
//!
//! Produces the same headers and numbered rows the matching tool has always
//! printed, so any front end can display them verbatim.

use crate::core::DisplayTier;

pub const NO_MATCHES_MESSAGE: &str = "No matching employers found.";

/// Header and row lines for a display tier
pub fn render_lines(tier: &DisplayTier) -> Vec<String> {
    match tier {
        DisplayTier::NoMatches => vec![NO_MATCHES_MESSAGE.to_string()],
        DisplayTier::Individual { num_top_matches, entries } => {
            let mut lines = Vec::with_capacity(entries.len() + 1);
            lines.push(format!("Top {} Employer Matches", num_top_matches));
            for (i, entry) in entries.iter().enumerate() {
                lines.push(format!(
                    "{}. {} - Match Score: {:.1}%",
                    i + 1,
                    entry.employer_name,
                    entry.match_score
                ));
            }
            lines
        }
        DisplayTier::TiedGroup { top_score, entries } => {
            let mut lines = Vec::with_capacity(entries.len() + 1);
            lines.push(format!(
                "Top {} Employer Matches (Score: {:.1}%)",
                entries.len(),
                top_score
            ));
            lines.extend(numbered_names(entries.iter().map(|e| e.employer_name.as_str())));
            lines
        }
        DisplayTier::Overflow { top_score, entries, .. } => {
            let mut lines = Vec::with_capacity(entries.len() + 2);
            lines.push(format!(
                "Many potential matches found. Here are the first {} matches.",
                entries.len()
            ));
            lines.push(format!("Employers with score: {:.1}%", top_score));
            lines.extend(numbered_names(entries.iter().map(|e| e.employer_name.as_str())));
            lines
        }
    }
}

fn numbered_names<'a>(names: impl Iterator<Item = &'a str> + 'a) -> impl Iterator<Item = String> + 'a {
    names.enumerate().map(|(i, name)| format!("{}. {}", i + 1, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchResult;

    fn result(name: &str, score: f64) -> MatchResult {
        MatchResult {
            employer_name: name.to_string(),
            match_score: score,
        }
    }

    #[test]
    fn test_no_matches() {
        assert_eq!(render_lines(&DisplayTier::NoMatches), vec!["No matching employers found."]);
    }

    #[test]
    fn test_individual_rows_have_scores() {
        let tier = DisplayTier::Individual {
            num_top_matches: 2,
            entries: vec![result("Acme", 87.3), result("Globex", 87.3), result("Initech", 41.06)],
        };

        assert_eq!(
            render_lines(&tier),
            vec![
                "Top 2 Employer Matches",
                "1. Acme - Match Score: 87.3%",
                "2. Globex - Match Score: 87.3%",
                "3. Initech - Match Score: 41.1%",
            ]
        );
    }

    #[test]
    fn test_tied_group_rows_are_names_only() {
        let tier = DisplayTier::TiedGroup {
            top_score: 72.0,
            entries: (1..=6).map(|i| result(&format!("Co {}", i), 72.0)).collect(),
        };

        let lines = render_lines(&tier);
        assert_eq!(lines[0], "Top 6 Employer Matches (Score: 72.0%)");
        assert_eq!(lines[1], "1. Co 1");
        assert_eq!(lines[6], "6. Co 6");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_overflow_headers() {
        let tier = DisplayTier::Overflow {
            top_score: 55.55,
            num_top_matches: 25,
            entries: (1..=20).map(|i| result(&format!("Co {}", i), 55.55)).collect(),
        };

        let lines = render_lines(&tier);
        assert_eq!(lines[0], "Many potential matches found. Here are the first 20 matches.");
        assert_eq!(lines[1], "Employers with score: 55.5%");
        assert_eq!(lines[21], "20. Co 20");
        assert_eq!(lines.len(), 22);
    }
}
