//! Detail tool: get_paper_details.

use serde_json::json;

use super::{McpTool, ToolContext, failure_text};
use crate::error::ToolResult;
use crate::formatters;
use crate::models::PaperDetailsInput;
use crate::normalize;

/// Full-record lookup tool.
pub struct PaperDetailsTool;

impl PaperDetailsTool {
    async fn run(&self, ctx: &ToolContext, pmid: &str) -> ToolResult<String> {
        let tree = ctx.client.fetch_full_record(pmid).await?;

        match normalize::article_detail(pmid, &tree) {
            Ok(detail) => formatters::to_pretty_json(&detail),
            Err(missing) => {
                tracing::warn!(pmid, "{missing}");
                Ok(missing.to_string())
            }
        }
    }
}

#[async_trait::async_trait]
impl McpTool for PaperDetailsTool {
    fn name(&self) -> &'static str {
        "get_paper_details"
    }

    fn description(&self) -> &'static str {
        concat!(
            "Get detailed information (Abstract, Authors, DOI, full-text links) for a specific PMID \
             previously returned by a PubMed search.",
            pmid_warning!()
        )
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "pmid": {"type": "string", "description": "PubMed ID (e.g., '31978945')"}
            },
            "required": ["pmid"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: PaperDetailsInput = serde_json::from_value(input)?;
        params.validate()?;

        let pmid = params.pmid.trim();
        tracing::info!(pmid, "Fetching paper details");

        match self.run(ctx, pmid).await {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::error!(pmid, error = %e, "Failed to fetch paper details");
                Ok(failure_text(&format!("Error retrieving details for PMID {pmid}"), &e))
            }
        }
    }
}
