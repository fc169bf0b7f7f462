//! Output formatters.

mod json;

pub use self::json::*;
