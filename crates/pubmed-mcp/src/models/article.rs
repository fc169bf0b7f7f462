//! Normalized article records emitted by the tools.

use serde::Serialize;
use serde_json::Value;

/// One `search_pubmed` result.
///
/// The review flag used for ordering lives on [`crate::ranking::Ranked`],
/// so it never reaches the serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleSummary {
    /// PubMed identifier, as returned by esearch.
    pub pmid: String,

    /// Article title.
    pub title: String,

    /// First authors joined with ", ", or "No authors".
    pub authors: String,

    /// Publication date as reported by esummary.
    pub pubdate: String,

    /// Journal abbreviation.
    pub source: String,
}

/// One `advanced_search_pubmed` result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedSearchHit {
    /// PubMed identifier.
    pub pmid: String,

    /// Article title.
    pub title: String,

    /// Publication date.
    pub pubdate: String,

    /// Journal abbreviation.
    pub source: String,

    /// Author entries exactly as esummary returned them.
    pub authors: Value,
}

/// One `get_similar_articles` result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedArticle {
    /// PubMed identifier, taken from the elink neighbor list.
    pub pmid: String,

    /// Title, suffixed with a review tag such as " [Meta-Analysis]".
    pub title: String,

    /// Publication date.
    pub pubdate: String,

    /// Journal abbreviation (empty when unknown).
    pub source: String,

    /// Author entries exactly as esummary returned them.
    pub authors: Value,

    /// Whether a review pattern was detected in the title.
    pub is_review: bool,
}

/// Full record returned by `get_paper_details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleDetail {
    /// PubMed identifier.
    pub pmid: String,

    /// Article title.
    pub title: String,

    /// "LastName ForeName" for each complete author entry.
    pub authors: Vec<String>,

    /// Full journal title.
    pub journal: String,

    /// DOI, when listed among the article IDs.
    pub doi: Option<String>,

    /// PubMed Central ID, when listed among the article IDs.
    pub pmc_id: Option<String>,

    /// Abstract text; structured abstracts are joined with newlines.
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Outbound links.
    pub links: ArticleLinks,
}

/// Links attached to an [`ArticleDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleLinks {
    /// Canonical PubMed page.
    pub pubmed: String,

    /// PubMed Central page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pmc: Option<String>,

    /// DOI resolver link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

impl ArticleLinks {
    /// Build links for a PMID and its optional PMC ID and DOI.
    #[must_use]
    pub fn new(pmid: &str, pmc_id: Option<&str>, doi: Option<&str>) -> Self {
        use crate::config::links;

        Self {
            pubmed: links::pubmed(pmid),
            pmc: pmc_id.map(links::pmc),
            doi: doi.map(links::doi),
        }
    }
}
