//! Raw E-utilities JSON envelopes.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Link name of PubMed-to-PubMed neighbor relations in elink output.
pub const PUBMED_NEIGHBOR_LINK: &str = "pubmed_pubmed";

/// Top-level esearch response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ESearchResponse {
    /// Search result wrapper.
    #[serde(default)]
    pub esearchresult: Option<ESearchResult>,
}

/// esearch result payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ESearchResult {
    /// Matching PMIDs in relevance order.
    #[serde(default)]
    pub idlist: Vec<String>,
}

impl ESearchResponse {
    /// Consume the response, yielding the ID list (empty when absent).
    #[must_use]
    pub fn into_ids(self) -> Vec<String> {
        self.esearchresult.map(|r| r.idlist).unwrap_or_default()
    }
}

/// Top-level esummary response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ESummaryResponse {
    /// Mapping of PMID to summary document, plus a `uids` index.
    #[serde(default)]
    pub result: Map<String, Value>,
}

/// Summary documents keyed by PMID.
#[derive(Debug, Clone, Default)]
pub struct SummaryBatch {
    docs: Map<String, Value>,
}

impl SummaryBatch {
    /// Wrap an esummary `result` mapping.
    #[must_use]
    pub fn new(docs: Map<String, Value>) -> Self {
        Self { docs }
    }

    /// Summary document for `pmid`.
    ///
    /// Entries esummary could not resolve carry an `error` field instead of
    /// metadata; those count as missing.
    #[must_use]
    pub fn get(&self, pmid: &str) -> Option<&Value> {
        if pmid == "uids" {
            return None;
        }
        self.docs
            .get(pmid)
            .filter(|doc| doc.is_object() && doc.get("error").is_none())
    }
}

impl From<ESummaryResponse> for SummaryBatch {
    fn from(response: ESummaryResponse) -> Self {
        Self::new(response.result)
    }
}

/// Top-level elink response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ELinkResponse {
    /// One linkset per input ID.
    #[serde(default)]
    pub linksets: Vec<LinkSet>,
}

/// Relation-typed ID lists for one source ID.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkSet {
    /// Link databases, one per relation name.
    #[serde(default)]
    pub linksetdbs: Vec<LinkSetDb>,
}

/// A single relation and its linked IDs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkSetDb {
    /// Relation name (e.g. `pubmed_pubmed`).
    #[serde(default)]
    pub linkname: String,

    /// Linked IDs; bare IDs or `{"id", "score"}` objects with `neighbor_score`.
    #[serde(default)]
    pub links: Vec<Value>,
}

impl LinkSetDb {
    /// Linked IDs in order, skipping entries without a usable ID.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.links
            .iter()
            .filter_map(|link| match link {
                Value::Object(obj) => obj.get("id").and_then(id_text),
                other => id_text(other),
            })
            .collect()
    }
}

impl ELinkResponse {
    /// Neighbor IDs from the first linkset's `pubmed_pubmed` relation.
    ///
    /// Later linksets and other relation names are ignored.
    #[must_use]
    pub fn neighbor_ids(&self) -> Vec<String> {
        self.linksets
            .first()
            .and_then(|set| set.linksetdbs.iter().find(|db| db.linkname == PUBMED_NEIGHBOR_LINK))
            .map(LinkSetDb::ids)
            .unwrap_or_default()
    }
}

fn id_text(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_esearch_missing_wrapper() {
        let resp: ESearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(resp.into_ids().is_empty());
    }

    #[test]
    fn test_esearch_ids() {
        let resp: ESearchResponse =
            serde_json::from_value(json!({"esearchresult": {"count": "2", "idlist": ["1", "2"]}}))
                .unwrap();
        assert_eq!(resp.into_ids(), vec!["1", "2"]);
    }

    #[test]
    fn test_summary_batch_skips_uids_and_errors() {
        let resp: ESummaryResponse = serde_json::from_value(json!({
            "result": {
                "uids": ["1", "2"],
                "1": {"uid": "1", "title": "One"},
                "2": {"uid": "2", "error": "cannot get document summary"}
            }
        }))
        .unwrap();
        let batch = SummaryBatch::from(resp);

        assert!(batch.get("1").is_some());
        assert!(batch.get("2").is_none());
        assert!(batch.get("uids").is_none());
    }

    #[test]
    fn test_neighbor_ids_mixed_link_shapes() {
        let resp: ELinkResponse = serde_json::from_value(json!({
            "linksets": [{
                "linksetdbs": [
                    {"linkname": "pubmed_pubmed_citedin", "links": ["9"]},
                    {"linkname": "pubmed_pubmed", "links": [{"id": "10", "score": 99}, "11", 12, {"score": 1}]},
                    {"linkname": "pubmed_pubmed", "links": ["13"]}
                ]
            }, {
                "linksetdbs": [{"linkname": "pubmed_pubmed", "links": ["14"]}]
            }]
        }))
        .unwrap();

        assert_eq!(resp.neighbor_ids(), vec!["10", "11", "12"]);
    }

    #[test]
    fn test_neighbor_ids_empty() {
        let resp: ELinkResponse = serde_json::from_value(json!({"linksets": []})).unwrap();
        assert!(resp.neighbor_ids().is_empty());
    }
}
