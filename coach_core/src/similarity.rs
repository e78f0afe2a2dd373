//! Word-overlap similarity between normalized names.
//!
//! Two scorers are available:
//! - `SetOverlap`: shared distinct words over the larger word set
//! - `PrefixOverlap`: word pairs where one is a prefix of the other, over
//!   the longer word list, so "squat" meets "squats" and "press" meets
//!   "presses"
//!
//! Both expect input that already went through `normalize` and
//! both return a value in `[0, 1]`. Words are split on whitespace with
//! empty tokens dropped; an empty token would prefix-match every word.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which scoring function a matcher uses
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    #[default]
    SetOverlap,
    PrefixOverlap,
}

impl ScoringStrategy {
    pub fn score(&self, a: &str, b: &str) -> f64 {
        match self {
            ScoringStrategy::SetOverlap => set_overlap(a, b),
            ScoringStrategy::PrefixOverlap => prefix_overlap(a, b),
        }
    }
}

/// `|A ∩ B| / max(|A|, |B|)` over distinct words
pub fn set_overlap(a: &str, b: &str) -> f64 {
    let a_words: HashSet<&str> = a.split_whitespace().collect();
    let b_words: HashSet<&str> = b.split_whitespace().collect();

    if a_words.is_empty() || b_words.is_empty() {
        return 0.0;
    }

    let shared = a_words.intersection(&b_words).count();
    shared as f64 / a_words.len().max(b_words.len()) as f64
}

/// Prefix-aware pair count over the longer word list, capped at 1.0
///
/// Repeated words can produce more matching pairs than there are words
/// ("curl curl" against "curl curl" has four), so the raw ratio can go
/// past 1. The cap keeps the result comparable with `set_overlap` and
/// only changes ordering between candidates that already score a
/// perfect match.
pub fn prefix_overlap(a: &str, b: &str) -> f64 {
    let a_words: Vec<&str> = a.split_whitespace().collect();
    let b_words: Vec<&str> = b.split_whitespace().collect();

    if a_words.is_empty() || b_words.is_empty() {
        return 0.0;
    }

    let pairs = prefix_pairs(&a_words, &b_words);
    (pairs as f64 / a_words.len().max(b_words.len()) as f64).min(1.0)
}

fn prefix_pairs(a_words: &[&str], b_words: &[&str]) -> usize {
    a_words
        .iter()
        .map(|aw| {
            b_words
                .iter()
                .filter(|bw| aw.starts_with(**bw) || bw.starts_with(*aw))
                .count()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: &[(&str, &str)] = &[
        ("mountain pose", "mountain pose tadasana"),
        ("hammer curl", "bicep curl"),
        ("squat", "jump squats"),
        ("curl curl", "curl"),
        ("shoulder press", "advanced shoulder press"),
        ("", "anything"),
        ("flying superman jump", "superman lift"),
    ];

    #[test]
    fn test_set_overlap_examples() {
        assert_eq!(set_overlap("hammer curl", "bicep curl"), 0.5);
        assert_eq!(set_overlap("squat", "squats"), 0.0);
        assert!((set_overlap("mountain pose", "mountain pose tadasana") - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(set_overlap("chest press", "chest press"), 1.0);
    }

    #[test]
    fn test_set_overlap_collapses_duplicates() {
        assert_eq!(set_overlap("curl curl", "curl"), 1.0);
    }

    #[test]
    fn test_prefix_overlap_examples() {
        assert_eq!(prefix_overlap("squat", "squats"), 1.0);
        assert_eq!(prefix_overlap("press", "presses"), 1.0);
        assert_eq!(prefix_overlap("hammer curl", "bicep curl"), 0.5);
        assert!((prefix_overlap("jump squat", "jump squats now") - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_prefix_overlap_is_capped() {
        let a = ["curl", "curl"];
        let b = ["curl", "curl"];
        assert_eq!(prefix_pairs(&a, &b), 4);
        assert_eq!(prefix_overlap("curl curl", "curl curl"), 1.0);
    }

    #[test]
    fn test_extra_spaces_do_not_match_everything() {
        // "cardio + core" normalizes with a double space
        assert_eq!(prefix_overlap("cardio  core", "lunges"), 0.0);
        assert_eq!(set_overlap("cardio  core", "cardio core"), 1.0);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        for strategy in [ScoringStrategy::SetOverlap, ScoringStrategy::PrefixOverlap] {
            assert_eq!(strategy.score("", "anything"), 0.0);
            assert_eq!(strategy.score("anything", ""), 0.0);
            assert_eq!(strategy.score("", ""), 0.0);
        }
    }

    #[test]
    fn test_symmetry() {
        for strategy in [ScoringStrategy::SetOverlap, ScoringStrategy::PrefixOverlap] {
            for (a, b) in PAIRS {
                assert_eq!(
                    strategy.score(a, b),
                    strategy.score(b, a),
                    "{:?} not symmetric for {:?} / {:?}",
                    strategy,
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_bounds() {
        for strategy in [ScoringStrategy::SetOverlap, ScoringStrategy::PrefixOverlap] {
            for (a, b) in PAIRS {
                let s = strategy.score(a, b);
                assert!((0.0..=1.0).contains(&s), "{:?} out of range: {}", strategy, s);
            }
        }
    }

    #[test]
    fn test_strategy_serde_names() {
        let s: ScoringStrategy = serde_json::from_str("\"prefix_overlap\"").unwrap();
        assert_eq!(s, ScoringStrategy::PrefixOverlap);
        assert_eq!(ScoringStrategy::default(), ScoringStrategy::SetOverlap);
    }
}
