//! MCP server implementation over stdio.

pub mod protocol;
pub mod stdio;

use tokio::io::BufReader;

use crate::config::Config;
use crate::tools::{self, McpTool, ToolContext};

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// MCP server for PubMed.
pub struct McpServer {
    /// Tool execution context.
    ctx: ToolContext,

    /// Registered tools.
    tools: Vec<Box<dyn McpTool>>,
}

impl McpServer {
    /// Create a new MCP server.
    #[must_use]
    pub fn new(ctx: ToolContext) -> Self {
        let tools = tools::register_all_tools();

        Self { ctx, tools }
    }

    /// Build the server, its client and journal classifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(ToolContext::from_config(config)?))
    }

    /// Run the server on stdin/stdout until stdin closes.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in stdio mode");
        tracing::info!("Registered {} tools", self.tools.len());

        let reader = BufReader::new(tokio::io::stdin());
        stdio::serve(&self, reader, tokio::io::stdout()).await
    }

    /// Get tool by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// Registered tools in announcement order.
    #[must_use]
    pub fn tools(&self) -> &[Box<dyn McpTool>] {
        &self.tools
    }

    /// Get tool context for execution.
    #[must_use]
    pub const fn context(&self) -> &ToolContext {
        &self.ctx
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("tools", &self.tools.len()).finish()
    }
}
