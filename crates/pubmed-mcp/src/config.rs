//! Configuration for the PubMed MCP server.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for NCBI E-utilities.
    pub const EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

    /// Entrez database queried by every call.
    pub const DATABASE: &str = "pubmed";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Environment variable holding the optional NCBI API key.
    pub const API_KEY_ENV: &str = "NCBI_API_KEY";
}

/// Public URL builders for records returned to the caller.
pub mod links {
    /// Canonical PubMed page for a PMID.
    #[must_use]
    pub fn pubmed(pmid: &str) -> String {
        format!("https://pubmed.ncbi.nlm.nih.gov/{pmid}/")
    }

    /// PubMed Central full-text page.
    #[must_use]
    pub fn pmc(pmc_id: &str) -> String {
        format!("https://www.ncbi.nlm.nih.gov/pmc/articles/{pmc_id}/")
    }

    /// DOI resolver link.
    #[must_use]
    pub fn doi(doi: &str) -> String {
        format!("https://doi.org/{doi}")
    }
}

/// High-impact neurology and general-medicine journals.
///
/// Entries are matched as case-insensitive substrings of the journal name
/// reported by esummary, so abbreviations like "Lancet Neurol" also cover
/// "Lancet Neurology".
pub const HIGH_IMPACT_JOURNALS: &[&str] = &[
    "N Engl J Med",
    "Lancet",
    "Lancet Neurol",
    "JAMA",
    "JAMA Neurol",
    "BMJ",
    "Nature",
    "Nature Medicine",
    "Nature Reviews Neurology",
    "Cell",
    "Science",
    "Neurology",
    "Brain",
    "Neuron",
    "Ann Neurol",
    "J Neurol Neurosurg Psychiatry",
    "Mov Disord",
    "Mov Disord Clin Pract",
    "Amyloid",
    "Parkinsons Relat Disord",
    "Stroke",
    "CNS Neurol Disord Drug Targets",
    "Clin Neurol Neurosurg",
    "Mult Scler J",
    "Epilepsia",
    "Sleep",
];

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// NCBI API key (optional, raises the rate limit from 3 to 10 req/s).
    pub api_key: Option<String>,

    /// Base URL for E-utilities (for testing with mock servers).
    pub eutils_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Journal names treated as high impact by `get_similar_articles`.
    pub high_impact_journals: Vec<String>,
}

impl Config {
    /// Create a new configuration with optional API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            eutils_url: api::EUTILS_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            high_impact_journals: HIGH_IMPACT_JOURNALS.iter().map(|j| (*j).to_string()).collect(),
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            eutils_url: format!("{}/entrez/eutils", base_url.trim_end_matches('/')),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            ..Self::new(None)
        }
    }

    /// Create configuration from environment variables.
    ///
    /// A missing `NCBI_API_KEY` is a normal state; E-utilities accepts
    /// anonymous requests at a lower rate limit.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var(api::API_KEY_ENV).ok();
        Ok(Self::new(api_key))
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
