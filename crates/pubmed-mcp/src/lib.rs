//! PubMed MCP Server
//!
//! A Model Context Protocol (MCP) server for PubMed, backed by NCBI
//! E-utilities. Exposes literature search, full-record lookup, filtered
//! search and related-article discovery as tools over stdio.
//!
//! # Features
//!
//! - **4 MCP Tools**: `search_pubmed`, `get_paper_details`,
//!   `advanced_search_pubmed`, `get_similar_articles`
//! - **Review-aware ranking**: original research ahead of reviews
//! - **High-impact journals**: configurable prestige list with fallback selection
//!
//! # Example
//!
//! ```no_run
//! use pubmed_mcp::{config::Config, server::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::from_config(&config)?;
//!
//!     server.run_stdio().await
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod journals;
pub mod models;
pub mod normalize;
pub mod ranking;
pub mod server;
pub mod tools;

pub use client::EutilsClient;
pub use config::Config;
pub use error::{ClientError, RecordError, ToolError};
pub use journals::HighImpactJournals;
