//! Search tools: search_pubmed, advanced_search_pubmed.

use serde_json::json;

use super::{McpTool, ToolContext, failure_text};
use crate::error::ToolResult;
use crate::formatters;
use crate::models::{AdvancedSearchInput, AdvancedSearchHit, SearchPubmedInput, SummaryBatch};
use crate::normalize;
use crate::ranking::{self, Ranked};

/// Result text when esearch matches nothing.
pub const NO_RESULTS: &str = "No results found.";

/// Lower publication date bound used when only an upper bound is given.
pub const EARLIEST_DATE: &str = "1900/01/01";

/// Upper publication date bound used when only a lower bound is given.
pub const LATEST_DATE: &str = "3000/12/31";

/// Run esearch then one batched esummary for the hits.
///
/// `None` when the search matched nothing.
async fn search_and_summarize(
    ctx: &ToolContext,
    term: &str,
    max_results: u32,
) -> ToolResult<Option<(Vec<String>, SummaryBatch)>> {
    let ids = ctx.client.search(term, max_results).await?;
    if ids.is_empty() {
        return Ok(None);
    }

    let batch = ctx.client.summarize(&ids).await?;
    let missing = ids.iter().filter(|id| batch.get(id).is_none()).count();
    if missing > 0 {
        tracing::warn!(missing, total = ids.len(), "Dropping PMIDs without summary data");
    }

    Ok(Some((ids, batch)))
}

/// Build the compound esearch term for an advanced search.
///
/// Clauses are AND-combined: the parenthesized query, then author, journal
/// and a `[PDAT]` date range when either bound is given.
#[must_use]
pub fn build_advanced_query(input: &AdvancedSearchInput) -> String {
    let mut parts = vec![format!("({})", input.query)];

    if let Some(author) = input.author() {
        parts.push(format!("({author}[Author])"));
    }

    if let Some(journal) = input.journal() {
        parts.push(format!("({journal}[Journal])"));
    }

    if input.date_from().is_some() || input.date_to().is_some() {
        let from = input.date_from().unwrap_or(EARLIEST_DATE);
        let to = input.date_to().unwrap_or(LATEST_DATE);
        parts.push(format!("(\"{from}\"[PDAT] : \"{to}\"[PDAT])"));
    }

    parts.join(" AND ")
}

/// Basic PubMed search tool.
pub struct SearchPubmedTool;

impl SearchPubmedTool {
    async fn run(&self, ctx: &ToolContext, params: &SearchPubmedInput) -> ToolResult<String> {
        let Some((ids, batch)) = search_and_summarize(ctx, &params.query, params.max_results).await? else {
            return Ok(NO_RESULTS.to_string());
        };

        let ranked: Vec<_> = ids
            .iter()
            .enumerate()
            .filter_map(|(rank, pmid)| {
                let doc = batch.get(pmid)?;
                let (item, is_review) = normalize::summary_record(pmid, doc);
                Some(Ranked { rank, is_review, item })
            })
            .collect();

        formatters::to_pretty_json(&ranking::originals_first(ranked))
    }
}

#[async_trait::async_trait]
impl McpTool for SearchPubmedTool {
    fn name(&self) -> &'static str {
        "search_pubmed"
    }

    fn description(&self) -> &'static str {
        concat!(
            "Search PubMed database and return REAL PMIDs with full details.",
            pmid_warning!(),
            " Results are sorted to prioritize original research articles over reviews. \
             Each result includes: PMID, full title, authors (first 3), publication date, journal name."
        )
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "PubMed search query (e.g., 'levodopa dyskinesia')"
                },
                "max_results": {
                    "type": "integer",
                    "default": 5,
                    "minimum": 1
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SearchPubmedInput = serde_json::from_value(input)?;
        params.validate()?;

        tracing::info!(query = %params.query, max_results = params.max_results, "Searching PubMed");

        match self.run(ctx, &params).await {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::error!(error = %e, "PubMed search failed");
                Ok(failure_text("Error searching PubMed", &e))
            }
        }
    }
}

/// Filtered PubMed search tool.
pub struct AdvancedSearchTool;

impl AdvancedSearchTool {
    async fn run(&self, ctx: &ToolContext, params: &AdvancedSearchInput) -> ToolResult<String> {
        let query = build_advanced_query(params);
        tracing::info!(query = %query, "Constructed advanced query");

        let Some((ids, batch)) = search_and_summarize(ctx, &query, params.max_results).await? else {
            return Ok(format!("No results found for query: {query}"));
        };

        let hits: Vec<AdvancedSearchHit> = ids
            .iter()
            .filter_map(|pmid| batch.get(pmid).map(|doc| normalize::advanced_hit(pmid, doc)))
            .collect();

        formatters::to_pretty_json(&hits)
    }
}

#[async_trait::async_trait]
impl McpTool for AdvancedSearchTool {
    fn name(&self) -> &'static str {
        "advanced_search_pubmed"
    }

    fn description(&self) -> &'static str {
        concat!(
            "Advanced PubMed search with filters (author, journal, date range). Returns REAL PMIDs only.",
            pmid_warning!(),
            " Can parse natural language like 'Smith's 2023 gastric cancer papers' into the \
             structured filters."
        )
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Main search keywords"},
                "author": {"type": "string", "description": "Author name (e.g., 'Smith J', 'Tanaka')"},
                "journal": {
                    "type": "string",
                    "description": "Journal name or abbreviation (e.g., 'NEJM', 'Lancet', 'Nature')"
                },
                "pub_date_from": {"type": "string", "description": "Start date in YYYY/MM/DD format"},
                "pub_date_to": {"type": "string", "description": "End date in YYYY/MM/DD format"},
                "max_results": {"type": "integer", "default": 5, "minimum": 1}
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: AdvancedSearchInput = serde_json::from_value(input)?;
        params.validate()?;

        tracing::info!(
            query = %params.query,
            author = ?params.author(),
            journal = ?params.journal(),
            "Advanced search"
        );

        match self.run(ctx, &params).await {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::error!(error = %e, "Advanced search failed");
                Ok(failure_text("Error searching PubMed", &e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(query: &str) -> AdvancedSearchInput {
        AdvancedSearchInput { query: query.to_string(), max_results: 5, ..Default::default() }
    }

    #[test]
    fn test_query_only() {
        assert_eq!(build_advanced_query(&input("gastric cancer")), "(gastric cancer)");
    }

    #[test]
    fn test_all_filters() {
        let mut params = input("gastric cancer");
        params.author = Some("Smith J".to_string());
        params.journal = Some("Lancet".to_string());
        params.pub_date_from = Some("2020/01/01".to_string());
        params.pub_date_to = Some("2023/12/31".to_string());

        assert_eq!(
            build_advanced_query(&params),
            "(gastric cancer) AND (Smith J[Author]) AND (Lancet[Journal]) AND \
             (\"2020/01/01\"[PDAT] : \"2023/12/31\"[PDAT])"
        );
    }

    #[test]
    fn test_date_from_only_uses_latest_bound() {
        let mut params = input("x");
        params.pub_date_from = Some("2020/01/01".to_string());
        assert_eq!(build_advanced_query(&params), "(x) AND (\"2020/01/01\"[PDAT] : \"3000/12/31\"[PDAT])");
    }

    #[test]
    fn test_date_to_only_uses_earliest_bound() {
        let mut params = input("x");
        params.pub_date_to = Some("2010/06/30".to_string());
        assert_eq!(build_advanced_query(&params), "(x) AND (\"1900/01/01\"[PDAT] : \"2010/06/30\"[PDAT])");
    }

    #[test]
    fn test_blank_filters_ignored() {
        let mut params = input("x");
        params.author = Some(String::new());
        params.journal = Some("   ".to_string());
        assert_eq!(build_advanced_query(&params), "(x)");
    }
}
