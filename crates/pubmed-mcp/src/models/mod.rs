//! Data models for E-utilities responses, tool inputs and tool outputs.
//!
//! Response envelopes use `#[serde(default)]` throughout: NCBI omits
//! wrappers rather than sending empty ones when nothing matched.

mod article;
mod eutils;
mod inputs;

pub use article::{AdvancedSearchHit, ArticleDetail, ArticleLinks, ArticleSummary, RelatedArticle};
pub use eutils::{ELinkResponse, ESearchResponse, ESearchResult, ESummaryResponse, LinkSet, LinkSetDb, SummaryBatch};
pub use inputs::*;
