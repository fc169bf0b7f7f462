//! Fuzzing library for pubmed-mcp.
//!
//! This crate provides fuzzing targets for the E-utilities response
//! decoders, the efetch XML converter and the tool input models.
//!
//! # Usage
//!
//! ```bash
//! cd crates/pubmed-fuzz
//! cargo +nightly fuzz run fuzz_efetch_xml -- -max_total_time=60
//! ```

pub use pubmed_mcp::{client::xml, models, normalize};
