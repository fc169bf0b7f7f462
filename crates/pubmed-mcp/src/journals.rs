//! High-impact journal classification.

use crate::config::HIGH_IMPACT_JOURNALS;

/// Impact tier of a journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JournalTier {
    /// Name contains a configured high-impact entry.
    HighImpact,
    /// Everything else, including unknown journals.
    Other,
}

/// Fixed set of high-impact journal names.
///
/// Matching is case-insensitive substring containment of an entry within
/// the trimmed journal name, so "Lancet Neurol" matches "Lancet Neurology"
/// and "The Lancet". Entries are lowercased once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighImpactJournals {
    entries: Vec<String>,
}

impl HighImpactJournals {
    /// Build a classifier from journal names. Blank entries are dropped.
    #[must_use]
    pub fn new<I, S>(journals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = journals
            .into_iter()
            .map(|j| j.as_ref().trim().to_lowercase())
            .filter(|j| !j.is_empty())
            .collect();
        Self { entries }
    }

    /// Whether `journal` belongs to the high-impact set.
    #[must_use]
    pub fn is_high_impact(&self, journal: &str) -> bool {
        let normalized = journal.trim().to_lowercase();
        if normalized.is_empty() {
            return false;
        }
        self.entries.iter().any(|entry| normalized.contains(entry.as_str()))
    }

    /// Tier of `journal`.
    #[must_use]
    pub fn tier(&self, journal: &str) -> JournalTier {
        if self.is_high_impact(journal) { JournalTier::HighImpact } else { JournalTier::Other }
    }

    /// Number of configured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HighImpactJournals {
    fn default() -> Self {
        Self::new(HIGH_IMPACT_JOURNALS)
    }
}
