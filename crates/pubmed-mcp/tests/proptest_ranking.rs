//! Property-based tests for ordering, classification and selection.

use proptest::prelude::*;
use serde_json::json;

use pubmed_mcp::HighImpactJournals;
use pubmed_mcp::normalize;
use pubmed_mcp::ranking::{Ranked, Selection, originals_first, tag_title};

fn arb_ranked() -> impl Strategy<Value = Vec<Ranked<usize>>> {
    proptest::collection::vec(any::<bool>(), 0..40).prop_map(|flags| {
        flags
            .into_iter()
            .enumerate()
            .map(|(rank, is_review)| Ranked { rank, is_review, item: rank })
            .collect()
    })
}

proptest! {
    /// Every original precedes every review, each group in relevance order.
    #[test]
    fn originals_precede_reviews(ranked in arb_ranked()) {
        let reviews: Vec<usize> = ranked.iter().filter(|r| r.is_review).map(|r| r.rank).collect();
        let originals: Vec<usize> = ranked.iter().filter(|r| !r.is_review).map(|r| r.rank).collect();

        let ordered = originals_first(ranked);

        let mut expected = originals;
        expected.extend(reviews);
        prop_assert_eq!(ordered, expected);
    }

    /// Classification ignores case and surrounding whitespace.
    #[test]
    fn classifier_case_insensitive(prefix in "[A-Za-z ]{0,8}", suffix in "[A-Za-z ]{0,8}") {
        let journals = HighImpactJournals::default();
        let name = format!("{prefix}LaNcEt{suffix}");
        prop_assert!(journals.is_high_impact(&name));
        let padded = format!("  {}  ", name.to_uppercase());
        prop_assert!(journals.is_high_impact(&padded));
    }

    /// Selection never exceeds the request and only pads in fallback or unfiltered mode.
    #[test]
    fn selection_bounds(
        high_impact_only in any::<bool>(),
        high in 0usize..30,
        other in 0usize..30,
        max in 1usize..20,
    ) {
        let selection = Selection::choose(high_impact_only, high, max);
        let high_items: Vec<(bool, usize)> = (0..high).map(|i| (true, i)).collect();
        let other_items: Vec<(bool, usize)> = (0..other).map(|i| (false, i)).collect();

        let picked = selection.apply(high_items, other_items, max);

        prop_assert!(picked.len() <= max);
        prop_assert_eq!(picked.len(), if selection.includes_other() { (high + other).min(max) } else { high.min(max) });

        // high-impact entries always come first
        let first_other = picked.iter().position(|(is_high, _)| !is_high).unwrap_or(picked.len());
        prop_assert!(picked[first_other..].iter().all(|(is_high, _)| !is_high));

        if high_impact_only && high < max / 2 {
            prop_assert_eq!(selection, Selection::Fallback);
        }
        if !high_impact_only {
            prop_assert_eq!(selection, Selection::Unfiltered);
        }
    }

    /// A tagged title always keeps the original text as its prefix.
    #[test]
    fn tag_title_preserves_prefix(title in "[A-Za-z:\\- ]{0,60}") {
        let (tagged, is_review) = tag_title(&title);
        prop_assert!(tagged.starts_with(&title));
        prop_assert_eq!(is_review, tagged.len() > title.len());
    }

    /// Summary authors never exceed the display limit.
    #[test]
    fn display_authors_limit(names in proptest::collection::vec("[A-Z][a-z]{1,8} [A-Z]", 0..10)) {
        let authors: Vec<_> = names.iter().map(|n| json!({"name": n})).collect();
        let doc = json!({"authors": authors});

        let shown = normalize::display_authors(&doc, normalize::SUMMARY_AUTHOR_LIMIT);

        if names.is_empty() {
            prop_assert_eq!(shown, normalize::NO_AUTHORS);
        } else {
            prop_assert_eq!(shown.split(", ").count(), names.len().min(normalize::SUMMARY_AUTHOR_LIMIT));
        }
    }
}
