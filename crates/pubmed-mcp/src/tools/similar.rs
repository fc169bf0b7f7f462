//! Related-article tool: get_similar_articles.

use serde_json::json;

use super::{McpTool, ToolContext, failure_text};
use crate::error::ToolResult;
use crate::formatters;
use crate::models::{RelatedArticle, SimilarArticlesInput};
use crate::normalize;
use crate::ranking::{self, Selection};

/// Result text when no neighbors survive.
pub const NO_SIMILAR: &str = "No similar articles found.";

/// Similar-article discovery tool.
pub struct SimilarArticlesTool;

impl SimilarArticlesTool {
    async fn run(&self, ctx: &ToolContext, params: &SimilarArticlesInput) -> ToolResult<String> {
        let pmid = params.pmid.trim();
        let neighbors = ctx.client.find_related(pmid, params.fetch_count()).await?;
        if neighbors.is_empty() {
            return Ok(NO_SIMILAR.to_string());
        }

        let batch = ctx.client.summarize(&neighbors).await?;
        let candidates: Vec<RelatedArticle> = neighbors
            .iter()
            .filter_map(|id| batch.get(id).map(|doc| normalize::related_article(id, doc)))
            .collect();

        let (high_impact, other) =
            ranking::partition_by_tier(candidates, |article| ctx.journals.tier(&article.source));

        let max_results = params.max_results as usize;
        let selection = Selection::choose(params.high_impact_only, high_impact.len(), max_results);

        tracing::debug!(
            high_impact = high_impact.len(),
            other = other.len(),
            selection = ?selection,
            "Bucketed similar articles"
        );
        if selection == Selection::Fallback {
            tracing::info!(
                high_impact = high_impact.len(),
                "Fallback: too few high-impact papers, including others"
            );
        }

        let results = selection.apply(high_impact, other, max_results);
        if results.is_empty() {
            return Ok(NO_SIMILAR.to_string());
        }

        formatters::to_pretty_json(&results)
    }
}

#[async_trait::async_trait]
impl McpTool for SimilarArticlesTool {
    fn name(&self) -> &'static str {
        "get_similar_articles"
    }

    fn description(&self) -> &'static str {
        concat!(
            "Find similar/related articles for a given PMID using PubMed's built-in relevance \
             algorithm. Can optionally filter to show only high-impact journal publications \
             (NEJM, Lancet, JAMA, Nature, etc.). Useful for literature review and finding related research.",
            pmid_warning!()
        )
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "pmid": {"type": "string", "description": "PMID of the reference paper"},
                "max_results": {
                    "type": "integer",
                    "default": 5,
                    "minimum": 1,
                    "description": "Maximum number of similar articles to return"
                },
                "high_impact_only": {
                    "type": "boolean",
                    "default": false,
                    "description": "If true, only return articles from high-impact journals \
                                    (NEJM, Lancet, JAMA, Nature, etc.)"
                }
            },
            "required": ["pmid"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SimilarArticlesInput = serde_json::from_value(input)?;
        params.validate()?;

        tracing::info!(
            pmid = %params.pmid,
            max_results = params.max_results,
            high_impact_only = params.high_impact_only,
            "Getting similar articles"
        );

        match self.run(ctx, &params).await {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::error!(error = %e, "Failed to get similar articles");
                Ok(failure_text("Error retrieving similar articles", &e))
            }
        }
    }
}
