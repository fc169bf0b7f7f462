#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_mcp::models::{ELinkResponse, ESearchResponse, ESummaryResponse, SummaryBatch};
use pubmed_mcp::normalize;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = serde_json::from_value::<ESearchResponse>(json.clone()).map(ESearchResponse::into_ids);
        let _ = serde_json::from_value::<ELinkResponse>(json.clone()).map(|r| r.neighbor_ids());

        if let Ok(summary) = serde_json::from_value::<ESummaryResponse>(json) {
            let batch = SummaryBatch::from(summary);
            if let Some(doc) = batch.get("1") {
                let _ = normalize::summary_record("1", doc);
                let _ = normalize::related_article("1", doc);
            }
        }
    }
});
