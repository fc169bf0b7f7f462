//! Result ordering and selection policies.
//!
//! - [`originals_first`]: search results with original research ahead of reviews
//! - [`ReviewTag`]: review detection from a title
//! - [`Selection`]: the high-impact bucket decision table for similar articles

use crate::journals::JournalTier;

/// A search result paired with its ordering keys.
///
/// Only the basic search path builds these; the keys are dropped by
/// [`originals_first`] and never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<T> {
    /// Position in the esearch relevance order.
    pub rank: usize,
    /// Whether esummary lists a review publication type.
    pub is_review: bool,
    /// The record itself.
    pub item: T,
}

/// Sort by `(is_review, rank)` and unwrap the records.
///
/// Non-reviews always precede reviews; relevance order is kept within each group.
#[must_use]
pub fn originals_first<T>(mut ranked: Vec<Ranked<T>>) -> Vec<T> {
    ranked.sort_by_key(|r| (r.is_review, r.rank));
    ranked.into_iter().map(|r| r.item).collect()
}

/// Review flavor detected from an article title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTag {
    /// "meta-analysis" or "metaanalysis".
    MetaAnalysis,
    /// "systematic review".
    SystematicReview,
    /// Starts with "review", or contains ": a review" / "review article".
    Review,
}

impl ReviewTag {
    /// Detect a review pattern, checking meta-analysis, then systematic
    /// review, then generic review.
    #[must_use]
    pub fn detect(title: &str) -> Option<Self> {
        let lower = title.to_lowercase();

        if lower.contains("meta-analysis") || lower.contains("metaanalysis") {
            Some(Self::MetaAnalysis)
        } else if lower.contains("systematic review") {
            Some(Self::SystematicReview)
        } else if lower.starts_with("review")
            || lower.contains(": a review")
            || lower.contains("review article")
        {
            Some(Self::Review)
        } else {
            None
        }
    }

    /// Suffix appended to the displayed title.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::MetaAnalysis => " [Meta-Analysis]",
            Self::SystematicReview => " [Systematic Review]",
            Self::Review => " [Review]",
        }
    }
}

/// Title with its review tag appended, plus whether a tag applied.
#[must_use]
pub fn tag_title(title: &str) -> (String, bool) {
    match ReviewTag::detect(title) {
        Some(tag) => (format!("{title}{}", tag.suffix()), true),
        None => (title.to_string(), false),
    }
}

/// How similar articles are drawn from the two journal buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Filtering requested and the high-impact bucket fills the request.
    HighImpactFull,
    /// Filtering requested and the bucket holds at least `max / 2`
    /// (floor) entries: still high-impact only, without padding.
    HighImpactPartial,
    /// Filtering requested but too few high-impact entries: high-impact
    /// first, then the rest.
    Fallback,
    /// No filtering: high-impact first, then the rest.
    Unfiltered,
}

impl Selection {
    /// Pick a strategy from the filter flag and bucket size.
    ///
    /// | high_impact_only | high-impact count     | strategy          |
    /// |------------------|-----------------------|-------------------|
    /// | false            | any                   | Unfiltered        |
    /// | true             | >= max                | HighImpactFull    |
    /// | true             | >= max / 2 (floor)    | HighImpactPartial |
    /// | true             | < max / 2             | Fallback          |
    #[must_use]
    pub const fn choose(high_impact_only: bool, high_impact_count: usize, max_results: usize) -> Self {
        match (high_impact_only, high_impact_count) {
            (false, _) => Self::Unfiltered,
            (true, n) if n >= max_results => Self::HighImpactFull,
            (true, n) if n >= max_results / 2 => Self::HighImpactPartial,
            (true, _) => Self::Fallback,
        }
    }

    /// Whether the other bucket may contribute entries.
    #[must_use]
    pub const fn includes_other(self) -> bool {
        matches!(self, Self::Fallback | Self::Unfiltered)
    }

    /// Apply the strategy to the two buckets, truncating to `max_results`.
    #[must_use]
    pub fn apply<T>(self, high_impact: Vec<T>, other: Vec<T>, max_results: usize) -> Vec<T> {
        let mut selected = high_impact;
        if self.includes_other() {
            selected.extend(other);
        }
        selected.truncate(max_results);
        selected
    }
}

/// Split items into high-impact and other buckets, keeping relative order.
#[must_use]
pub fn partition_by_tier<T, F>(items: Vec<T>, tier_of: F) -> (Vec<T>, Vec<T>)
where
    F: Fn(&T) -> JournalTier,
{
    items.into_iter().partition(|item| tier_of(item) == JournalTier::HighImpact)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(rank: usize, is_review: bool) -> Ranked<usize> {
        Ranked { rank, is_review, item: rank }
    }

    #[test]
    fn test_originals_before_reviews() {
        let input = vec![ranked(0, true), ranked(1, false), ranked(2, true), ranked(3, false)];
        assert_eq!(originals_first(input), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_originals_first_stable_by_rank() {
        let input = vec![ranked(4, false), ranked(2, false), ranked(3, true)];
        assert_eq!(originals_first(input), vec![2, 4, 3]);
    }

    #[test]
    fn test_review_tag_precedence() {
        assert_eq!(
            ReviewTag::detect("A systematic review and review article on stroke"),
            Some(ReviewTag::SystematicReview)
        );
        assert_eq!(
            ReviewTag::detect("Systematic review and Meta-Analysis of X"),
            Some(ReviewTag::MetaAnalysis)
        );
        assert_eq!(ReviewTag::detect("A metaanalysis"), Some(ReviewTag::MetaAnalysis));
        assert_eq!(ReviewTag::detect("Review: tau in AD"), Some(ReviewTag::Review));
        assert_eq!(ReviewTag::detect("Tremor: a review"), Some(ReviewTag::Review));
        assert_eq!(ReviewTag::detect("A review article"), Some(ReviewTag::Review));
        assert_eq!(ReviewTag::detect("We review the evidence"), None);
        assert_eq!(ReviewTag::detect("Peer reviewers agree"), None);
    }

    #[test]
    fn test_tag_title() {
        let (title, is_review) = tag_title("A systematic review of X. A review article");
        assert_eq!(title, "A systematic review of X. A review article [Systematic Review]");
        assert!(is_review);

        let (title, is_review) = tag_title("Plain trial");
        assert_eq!(title, "Plain trial");
        assert!(!is_review);
    }

    #[test]
    fn test_selection_table() {
        assert_eq!(Selection::choose(false, 0, 5), Selection::Unfiltered);
        assert_eq!(Selection::choose(false, 10, 5), Selection::Unfiltered);
        assert_eq!(Selection::choose(true, 5, 5), Selection::HighImpactFull);
        assert_eq!(Selection::choose(true, 2, 5), Selection::HighImpactPartial);
        assert_eq!(Selection::choose(true, 1, 5), Selection::Fallback);
        assert_eq!(Selection::choose(true, 3, 10), Selection::Fallback);
        assert_eq!(Selection::choose(true, 5, 10), Selection::HighImpactPartial);
        // max / 2 floors to zero, so an empty bucket still counts as "half".
        assert_eq!(Selection::choose(true, 0, 1), Selection::HighImpactPartial);
    }

    #[test]
    fn test_apply_fallback_pads_with_other() {
        let high = vec![1, 2, 3];
        let other: Vec<i32> = (10..27).collect();
        let selected = Selection::choose(true, high.len(), 10).apply(high, other, 10);
        assert_eq!(selected, vec![1, 2, 3, 10, 11, 12, 13, 14, 15, 16]);
    }

    #[test]
    fn test_apply_partial_does_not_pad() {
        let selected = Selection::HighImpactPartial.apply(vec![1, 2, 3], vec![10, 11], 5);
        assert_eq!(selected, vec![1, 2, 3]);
    }

    #[test]
    fn test_apply_full_truncates() {
        let selected = Selection::HighImpactFull.apply(vec![1, 2, 3, 4], vec![10], 2);
        assert_eq!(selected, vec![1, 2]);
    }

    #[test]
    fn test_partition_keeps_order() {
        let (high, other) = partition_by_tier(vec![1, 2, 3, 4, 5], |n| {
            if n % 2 == 0 { JournalTier::HighImpact } else { JournalTier::Other }
        });
        assert_eq!(high, vec![2, 4]);
        assert_eq!(other, vec![1, 3, 5]);
    }
}
