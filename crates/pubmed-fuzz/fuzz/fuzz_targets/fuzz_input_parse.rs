#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_mcp::models::{AdvancedSearchInput, PaperDetailsInput, SearchPubmedInput, SimilarArticlesInput};
use pubmed_mcp::tools::build_advanced_query;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = serde_json::from_slice::<SearchPubmedInput>(data) {
        let _ = input.validate();
    }
    if let Ok(input) = serde_json::from_slice::<PaperDetailsInput>(data) {
        let _ = input.validate();
    }
    if let Ok(input) = serde_json::from_slice::<AdvancedSearchInput>(data) {
        if input.validate().is_ok() {
            let _ = build_advanced_query(&input);
        }
    }
    if let Ok(input) = serde_json::from_slice::<SimilarArticlesInput>(data) {
        let _ = input.fetch_count();
    }
});
