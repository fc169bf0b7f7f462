//! MCP tool implementations.
//!
//! Each tool:
//! 1. Parses and validates its arguments
//! 2. Sequences E-utilities calls through the shared client
//! 3. Normalizes, ranks and pretty-prints the records
//!
//! Remote failures and empty results come back as text, never as a
//! `ToolError`; callers read the outcome from the returned string.

/// Warning appended to every tool description.
macro_rules! pmid_warning {
    () => {
        " CRITICAL WARNING: The PMIDs returned by this tool are the ONLY valid PMIDs. \
         You MUST NOT generate, guess, or make up any PMIDs. NEVER cite a PMID that was not \
         explicitly returned by a PubMed tool."
    };
}

mod details;
mod search;
mod similar;

pub use details::*;
pub use search::*;
pub use similar::*;

use std::sync::Arc;

use crate::client::EutilsClient;
use crate::config::Config;
use crate::error::{ToolError, ToolResult};
use crate::journals::HighImpactJournals;

/// Tool execution context.
pub struct ToolContext {
    /// API client.
    pub client: Arc<EutilsClient>,

    /// High-impact journal classifier.
    pub journals: Arc<HighImpactJournals>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(client: Arc<EutilsClient>, journals: Arc<HighImpactJournals>) -> Self {
        Self { client, journals }
    }

    /// Build the client and classifier from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = EutilsClient::new(config)?;
        let journals = HighImpactJournals::new(&config.high_impact_journals);
        Ok(Self::new(Arc::new(client), Arc::new(journals)))
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("client", &self.client)
            .field("journals", &self.journals.len())
            .finish()
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "search_pubmed").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(
        &self,
        ctx: &ToolContext,
        input: serde_json::Value,
    ) -> ToolResult<String>;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(search::SearchPubmedTool),
        Box::new(details::PaperDetailsTool),
        Box::new(search::AdvancedSearchTool),
        Box::new(similar::SimilarArticlesTool),
    ]
}

/// Turn a failed run into the text result shown to the caller.
pub(crate) fn failure_text(context: &str, err: &ToolError) -> String {
    match err {
        ToolError::Client(client_err) => format!("{context}: {client_err}"),
        other => format!("{context}: {}", other.to_user_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_tool_names() {
        let names: Vec<&str> = register_all_tools().iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec!["search_pubmed", "get_paper_details", "advanced_search_pubmed", "get_similar_articles"]
        );
    }

    #[test]
    fn test_every_description_warns_about_pmids() {
        for tool in register_all_tools() {
            assert!(tool.description().contains("ONLY valid PMIDs"), "{}", tool.name());
            assert!(tool.description().contains("MUST NOT"), "{}", tool.name());
        }
    }

    #[test]
    fn test_every_schema_is_object_with_required() {
        for tool in register_all_tools() {
            let schema = tool.input_schema();
            assert_eq!(schema["type"], "object", "{}", tool.name());
            assert!(schema["required"].as_array().is_some_and(|r| !r.is_empty()), "{}", tool.name());
        }
    }

    #[test]
    fn test_failure_text_uses_client_message() {
        let err = ToolError::from(crate::error::ClientError::server(503, "busy"));
        assert_eq!(failure_text("Error searching PubMed", &err), "Error searching PubMed: Server error (503): busy");
    }
}
