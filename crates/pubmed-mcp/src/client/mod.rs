//! NCBI E-utilities client.
//!
//! One GET per call against esearch, esummary, efetch and elink. Nothing is
//! cached or retried: a failed round trip surfaces as a [`ClientError`] and
//! the calling tool decides how to report it.

pub mod xml;

use reqwest::Client;
use serde_json::Value;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{ELinkResponse, ESearchResponse, ESummaryResponse, SummaryBatch};

/// E-utilities API client.
#[derive(Clone)]
pub struct EutilsClient {
    /// HTTP client.
    client: Client,

    /// API key (optional).
    api_key: Option<String>,

    /// E-utilities base URL.
    eutils_url: String,
}

impl EutilsClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let base = url::Url::parse(&config.eutils_url)?;
        if base.cannot_be_a_base() {
            anyhow::bail!("E-utilities URL cannot be used as a base: {base}");
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            eutils_url: config.eutils_url.trim_end_matches('/').to_string(),
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search PubMed, returning PMIDs in relevance order.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search(&self, term: &str, max_results: u32) -> ClientResult<Vec<String>> {
        let params = vec![
            ("db", api::DATABASE.to_string()),
            ("term", term.to_string()),
            ("retmode", "json".to_string()),
            ("retmax", max_results.to_string()),
            ("sort", "relevance".to_string()),
        ];

        let response: ESearchResponse = self.get_json("esearch.fcgi", params).await?;
        Ok(response.into_ids())
    }

    /// Fetch summary documents for a batch of PMIDs in a single call.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn summarize(&self, pmids: &[String]) -> ClientResult<SummaryBatch> {
        let params = vec![
            ("db", api::DATABASE.to_string()),
            ("id", pmids.join(",")),
            ("retmode", "json".to_string()),
        ];

        let response: ESummaryResponse = self.get_json("esummary.fcgi", params).await?;
        Ok(SummaryBatch::from(response))
    }

    /// Fetch the full XML record for a PMID, converted to a JSON tree.
    ///
    /// An unknown PMID is not an error here: NCBI answers with an empty
    /// `PubmedArticleSet`, which the normalizer reports as not found.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or malformed XML.
    pub async fn fetch_full_record(&self, pmid: &str) -> ClientResult<Value> {
        let params = vec![
            ("db", api::DATABASE.to_string()),
            ("id", pmid.to_string()),
            ("retmode", "xml".to_string()),
        ];

        let body = self.get_text("efetch.fcgi", params).await?;
        xml::parse(&body)
    }

    /// Find related PMIDs by neighbor score, keeping at most `fetch_count`.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn find_related(&self, pmid: &str, fetch_count: usize) -> ClientResult<Vec<String>> {
        let params = vec![
            ("dbfrom", api::DATABASE.to_string()),
            ("db", api::DATABASE.to_string()),
            ("id", pmid.to_string()),
            ("cmd", "neighbor_score".to_string()),
            ("retmode", "json".to_string()),
        ];

        let response: ELinkResponse = self.get_json("elink.fcgi", params).await?;
        let mut ids = response.neighbor_ids();
        ids.truncate(fetch_count);
        Ok(ids)
    }

    /// Make a GET request and decode a JSON body.
    async fn get_json<T>(&self, endpoint: &str, params: Vec<(&str, String)>) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = self.get_text(endpoint, params).await?;
        serde_json::from_str(&body).map_err(ClientError::from)
    }

    /// Make a GET request and return the raw body.
    async fn get_text(&self, endpoint: &str, mut params: Vec<(&str, String)>) -> ClientResult<String> {
        let url = format!("{}/{}", self.eutils_url, endpoint);

        if let Some(ref key) = self.api_key {
            params.push(("api_key", key.clone()));
        }

        tracing::debug!(url = %url, "E-utilities request");

        let response = self.client.get(&url).query(&params).send().await?;
        let response = self.handle_response(response).await?;

        Ok(response.text().await?)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

impl std::fmt::Debug for EutilsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EutilsClient")
            .field("eutils_url", &self.eutils_url)
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = Config::default();
        config.eutils_url = "not a url".to_string();
        assert!(EutilsClient::new(&config).is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let config = Config::new(Some("secret-key".to_string()));
        let client = EutilsClient::new(&config).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("has_api_key: true"));
        assert!(!debug.contains("secret-key"));
    }
}
