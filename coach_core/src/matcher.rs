//! Catalog matcher: maps free-text names onto catalog entries.
//!
//! Every catalog entry is scored against the query; the highest scorer
//! wins, with ties going to the entry that appears first. The winner is
//! only returned when its score reaches the policy threshold.

use crate::normalize::normalize;
use crate::similarity::ScoringStrategy;
use crate::{Catalog, CatalogEntry, CatalogKind, Error, Result};
use serde::{Deserialize, Serialize};

/// Scoring strategy plus acceptance threshold for one call site
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchPolicy {
    #[serde(default)]
    pub strategy: ScoringStrategy,
    pub threshold: f64,
}

impl MatchPolicy {
    pub fn new(strategy: ScoringStrategy, threshold: f64) -> Self {
        Self {
            strategy,
            threshold,
        }
    }

    /// Built-in policy for a catalog kind
    ///
    /// - exercises: 0.6
    /// - yoga poses: 0.45
    /// - meditations: 1.0 (same word set, any order or punctuation)
    pub fn default_for(kind: CatalogKind) -> Self {
        let threshold = match kind {
            CatalogKind::Exercise => 0.6,
            CatalogKind::Yoga => 0.45,
            CatalogKind::Meditation => 1.0,
        };
        Self::new(ScoringStrategy::SetOverlap, threshold)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::Config(format!(
                "match threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// A catalog entry together with the score that selected it
#[derive(Clone, Copy, Debug)]
pub struct Match<'a> {
    pub entry: &'a CatalogEntry,
    pub score: f64,
}

/// Highest-scoring entry for `query`, ignoring any threshold
///
/// Returns `None` when nothing scores above zero, including when the
/// query normalizes to an empty string.
pub fn best_candidate<'a>(
    query: &str,
    catalog: &'a Catalog,
    strategy: ScoringStrategy,
) -> Option<Match<'a>> {
    let query = normalize(query);
    if query.is_empty() {
        return None;
    }

    let mut best: Option<Match<'a>> = None;
    let mut best_score = 0.0;

    for entry in &catalog.entries {
        let score = strategy.score(&query, &normalize(&entry.name));
        if score > best_score {
            best_score = score;
            best = Some(Match { entry, score });
        }
    }

    best
}

/// Best entry for `query` if it clears the policy threshold
pub fn best_match<'a>(query: &str, catalog: &'a Catalog, policy: &MatchPolicy) -> Option<Match<'a>> {
    match best_candidate(query, catalog, policy.strategy) {
        Some(m) if m.score >= policy.threshold => {
            tracing::debug!(
                "Matched {:?} to {} entry {:?} (score {:.3})",
                query,
                catalog.kind,
                m.entry.name,
                m.score
            );
            Some(m)
        }
        Some(m) => {
            tracing::debug!(
                "Rejected {:?}: best {} entry {:?} scored {:.3} < {}",
                query,
                catalog.kind,
                m.entry.name,
                m.score,
                policy.threshold
            );
            None
        }
        None => {
            tracing::debug!("No {} entry shares a word with {:?}", catalog.kind, query);
            None
        }
    }
}

/// Catalog entry that best matches `query`, or `None` below the threshold
pub fn find_best_match<'a>(
    query: &str,
    catalog: &'a Catalog,
    policy: &MatchPolicy,
) -> Option<&'a CatalogEntry> {
    best_match(query, catalog, policy).map(|m| m.entry)
}

/// A catalog paired with the policy used to match against it
#[derive(Clone, Copy, Debug)]
pub struct CatalogMatcher<'a> {
    catalog: &'a Catalog,
    policy: MatchPolicy,
}

impl<'a> CatalogMatcher<'a> {
    pub fn new(catalog: &'a Catalog, policy: MatchPolicy) -> Self {
        Self { catalog, policy }
    }

    /// Matcher using the built-in policy for the catalog's kind
    pub fn with_default_policy(catalog: &'a Catalog) -> Self {
        Self::new(catalog, MatchPolicy::default_for(catalog.kind))
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    pub fn find(&self, query: &str) -> Option<&'a CatalogEntry> {
        find_best_match(query, self.catalog, &self.policy)
    }

    /// Media reference of the best match, if any
    pub fn media_for(&self, query: &str) -> Option<&'a str> {
        self.find(query).and_then(|entry| entry.media.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    fn catalog_of(kind: CatalogKind, entries: &[(&str, &str)]) -> Catalog {
        Catalog::new(
            kind,
            entries
                .iter()
                .map(|(name, media)| CatalogEntry::new(*name, Some(media)))
                .collect(),
        )
    }

    #[test]
    fn test_mountain_pose_matches_with_alias() {
        crate::logging::init_test();
        let catalog = catalog_of(
            CatalogKind::Yoga,
            &[("Mountain Pose (Tadasana)", "/yoga/mountain.gif")],
        );
        let policy = MatchPolicy::new(ScoringStrategy::SetOverlap, 0.45);

        let entry = find_best_match("Mountain Pose", &catalog, &policy).unwrap();
        assert_eq!(entry.media.as_deref(), Some("/yoga/mountain.gif"));
    }

    #[test]
    fn test_hammer_curl_rejected_against_bicep_curl() {
        let catalog = catalog_of(
            CatalogKind::Exercise,
            &[("Bicep Curl", "/pose/biceps1.gif")],
        );
        let policy = MatchPolicy::new(ScoringStrategy::SetOverlap, 0.6);

        let candidate = best_candidate("Hammer Curl", &catalog, policy.strategy).unwrap();
        assert_eq!(candidate.score, 0.5);
        assert!(find_best_match("Hammer Curl", &catalog, &policy).is_none());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let catalog = catalog_of(
            CatalogKind::Exercise,
            &[("Bicep Curl", "/pose/biceps1.gif")],
        );
        let policy = MatchPolicy::new(ScoringStrategy::SetOverlap, 0.5);

        assert!(find_best_match("Hammer Curl", &catalog, &policy).is_some());
    }

    #[test]
    fn test_ties_keep_first_entry() {
        let catalog = catalog_of(
            CatalogKind::Exercise,
            &[
                ("Front Raise", "/pose/front.gif"),
                ("Lateral Raise", "/pose/lateral.gif"),
            ],
        );
        let policy = MatchPolicy::new(ScoringStrategy::SetOverlap, 0.5);

        let m = best_match("Raise", &catalog, &policy).unwrap();
        assert_eq!(m.entry.name, "Front Raise");
        assert_eq!(m.score, 0.5);
    }

    #[test]
    fn test_higher_score_later_wins() {
        let catalog = catalog_of(
            CatalogKind::Exercise,
            &[
                ("Chest Press", "/pose/chest1.gif"),
                ("Dumbbell Chest Press", "/pose/chest4.gif"),
            ],
        );
        let policy = MatchPolicy::default_for(CatalogKind::Exercise);

        let entry = find_best_match("dumbbell chest press", &catalog, &policy).unwrap();
        assert_eq!(entry.name, "Dumbbell Chest Press");
    }

    #[test]
    fn test_empty_query_never_matches() {
        let catalog = default_catalog(CatalogKind::Exercise);
        for threshold in [0.0, 0.45, 1.0] {
            let policy = MatchPolicy::new(ScoringStrategy::SetOverlap, threshold);
            assert!(find_best_match("", catalog, &policy).is_none());
            assert!(find_best_match("(!!)", catalog, &policy).is_none());
        }
    }

    #[test]
    fn test_zero_threshold_still_needs_overlap() {
        let catalog = catalog_of(CatalogKind::Exercise, &[("Plank Hold", "/pose/plank.gif")]);
        let policy = MatchPolicy::new(ScoringStrategy::SetOverlap, 0.0);

        assert!(find_best_match("Burpees", &catalog, &policy).is_none());
    }

    #[test]
    fn test_empty_catalog_returns_none() {
        let catalog = Catalog::new(CatalogKind::Yoga, vec![]);
        let policy = MatchPolicy::default_for(CatalogKind::Yoga);

        assert!(find_best_match("Tree Pose", &catalog, &policy).is_none());
    }

    #[test]
    fn test_threshold_gating_against_max_score() {
        let catalog = default_catalog(CatalogKind::Exercise);
        let queries = ["Squats", "Hammer Curls", "Overhead Press", "Flying Superman Jump"];

        for strategy in [ScoringStrategy::SetOverlap, ScoringStrategy::PrefixOverlap] {
            for query in queries {
                let max = catalog
                    .entries
                    .iter()
                    .map(|e| strategy.score(&normalize(query), &normalize(&e.name)))
                    .fold(0.0, f64::max);

                for threshold in [0.3, 0.45, 0.6, 1.0] {
                    let policy = MatchPolicy::new(strategy, threshold);
                    let found = find_best_match(query, catalog, &policy);
                    if max > 0.0 && max >= threshold {
                        assert!(found.is_some(), "{} @ {} should match", query, threshold);
                    } else {
                        assert!(found.is_none(), "{} @ {} should not match", query, threshold);
                    }
                }
            }
        }
    }

    #[test]
    fn test_prefix_strategy_matches_plurals() {
        let catalog = default_catalog(CatalogKind::Exercise);
        let policy = MatchPolicy::new(ScoringStrategy::PrefixOverlap, 0.6);

        let entry = find_best_match("Squat", catalog, &policy).unwrap();
        assert_eq!(entry.name, "Squats");
        assert_eq!(entry.media.as_deref(), Some("/pose/leg.gif"));
    }

    #[test]
    fn test_meditation_policy_requires_same_words() {
        let catalog = default_catalog(CatalogKind::Meditation);
        let matcher = CatalogMatcher::with_default_policy(catalog);

        assert_eq!(
            matcher.media_for("deep sleep meditation"),
            Some("/meditation/sleep.mp3")
        );
        assert_eq!(
            matcher.media_for("Meditation: Deep Sleep"),
            Some("/meditation/sleep.mp3")
        );
        assert!(matcher.media_for("Deep Sleep").is_none());
    }

    #[test]
    fn test_policy_validation() {
        assert!(MatchPolicy::new(ScoringStrategy::SetOverlap, 0.6).validate().is_ok());
        assert!(MatchPolicy::new(ScoringStrategy::SetOverlap, 1.2).validate().is_err());
        assert!(MatchPolicy::new(ScoringStrategy::SetOverlap, -0.1).validate().is_err());
        assert!(MatchPolicy::new(ScoringStrategy::SetOverlap, f64::NAN).validate().is_err());
    }
}
