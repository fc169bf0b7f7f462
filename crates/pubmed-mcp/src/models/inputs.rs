//! Input models for MCP tool parameters.
//!
//! Field names are snake_case, matching the tool schemas advertised in
//! `tools/list`.

use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};

/// Default number of results when `max_results` is omitted.
pub const DEFAULT_MAX_RESULTS: u32 = 5;

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

/// Input for `search_pubmed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPubmedInput {
    /// Free-text PubMed query.
    pub query: String,

    /// Maximum results to return.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl SearchPubmedInput {
    /// Check field constraints.
    pub fn validate(&self) -> ToolResult<()> {
        require_text("query", &self.query)?;
        require_positive("max_results", self.max_results)
    }
}

/// Input for `get_paper_details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperDetailsInput {
    /// PubMed identifier.
    pub pmid: String,
}

impl PaperDetailsInput {
    /// Check field constraints.
    pub fn validate(&self) -> ToolResult<()> {
        require_text("pmid", &self.pmid)
    }
}

/// Input for `advanced_search_pubmed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvancedSearchInput {
    /// Main search keywords.
    pub query: String,

    /// Author name (e.g. "Smith J").
    #[serde(default)]
    pub author: Option<String>,

    /// Journal name or abbreviation.
    #[serde(default)]
    pub journal: Option<String>,

    /// Lower publication date bound, YYYY/MM/DD.
    #[serde(default)]
    pub pub_date_from: Option<String>,

    /// Upper publication date bound, YYYY/MM/DD.
    #[serde(default)]
    pub pub_date_to: Option<String>,

    /// Maximum results to return.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl AdvancedSearchInput {
    /// Check field constraints.
    pub fn validate(&self) -> ToolResult<()> {
        require_text("query", &self.query)?;
        require_positive("max_results", self.max_results)
    }

    /// Author filter, if given and non-blank.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        non_blank(self.author.as_deref())
    }

    /// Journal filter, if given and non-blank.
    #[must_use]
    pub fn journal(&self) -> Option<&str> {
        non_blank(self.journal.as_deref())
    }

    /// Lower date bound, if given and non-blank.
    #[must_use]
    pub fn date_from(&self) -> Option<&str> {
        non_blank(self.pub_date_from.as_deref())
    }

    /// Upper date bound, if given and non-blank.
    #[must_use]
    pub fn date_to(&self) -> Option<&str> {
        non_blank(self.pub_date_to.as_deref())
    }
}

/// Input for `get_similar_articles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarArticlesInput {
    /// PMID of the reference paper.
    pub pmid: String,

    /// Maximum similar articles to return.
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Restrict results to high-impact journals where enough exist.
    #[serde(default)]
    pub high_impact_only: bool,
}

impl SimilarArticlesInput {
    /// Check field constraints.
    pub fn validate(&self) -> ToolResult<()> {
        require_text("pmid", &self.pmid)?;
        require_positive("max_results", self.max_results)
    }

    /// Number of neighbor IDs to request from elink.
    ///
    /// Three times the target when filtering, so the high-impact bucket has
    /// room to fill.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        let max = self.max_results as usize;
        if self.high_impact_only { max.saturating_mul(3) } else { max }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn require_text(field: &str, value: &str) -> ToolResult<()> {
    if value.trim().is_empty() {
        return Err(ToolError::validation(field, "cannot be empty"));
    }
    Ok(())
}

fn require_positive(field: &str, value: u32) -> ToolResult<()> {
    if value == 0 {
        return Err(ToolError::validation(field, "must be at least 1"));
    }
    Ok(())
}
