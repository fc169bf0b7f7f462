#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_mcp::client::xml;
use pubmed_mcp::normalize;

fuzz_target!(|data: &[u8]| {
    // Malformed markup must surface as Err, and any tree must normalize without panicking
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(tree) = xml::parse(text) {
            let _ = normalize::article_detail("1", &tree);
        }
    }
});
