//! JSON output formatting.
//!
//! Tool results are pretty-printed with two-space indentation. Non-ASCII
//! characters (author names, titles) are written literally, not as `\u`
//! escapes.

use serde::Serialize;

use crate::error::ToolResult;

/// Pretty-print a tool result.
pub fn to_pretty_json<T>(value: &T) -> ToolResult<String>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::ArticleSummary;

    #[test]
    fn test_two_space_indent() {
        let out = to_pretty_json(&json!({"a": [1]})).unwrap();
        assert_eq!(out, "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_non_ascii_preserved() {
        let summary = ArticleSummary {
            pmid: "1".to_string(),
            title: "Étude sur la maladie de Parkinson".to_string(),
            authors: "Müller K, Øster J".to_string(),
            pubdate: "2024".to_string(),
            source: "Rev Neurol (Paris)".to_string(),
        };
        let out = to_pretty_json(&[summary]).unwrap();
        assert!(out.contains("Étude"));
        assert!(out.contains("Müller K, Øster J"));
        assert!(!out.contains("\\u"));
    }

    #[test]
    fn test_summary_field_order() {
        let summary = ArticleSummary {
            pmid: "1".to_string(),
            title: "T".to_string(),
            authors: "A".to_string(),
            pubdate: "D".to_string(),
            source: "S".to_string(),
        };
        let out = to_pretty_json(&summary).unwrap();
        let order: Vec<usize> = ["\"pmid\"", "\"title\"", "\"authors\"", "\"pubdate\"", "\"source\""]
            .iter()
            .map(|k| out.find(k).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }
}
