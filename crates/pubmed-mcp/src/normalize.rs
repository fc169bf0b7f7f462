//! Response normalization.
//!
//! Turns esummary documents and efetch trees into the flat records in
//! [`crate::models`]. Missing or oddly shaped fields fall back to defaults
//! rather than failing; only a missing full record is an error.

use serde_json::Value;

use crate::client::xml::{ATTR_PREFIX, TEXT_KEY};
use crate::error::RecordError;
use crate::models::{AdvancedSearchHit, ArticleDetail, ArticleLinks, ArticleSummary, RelatedArticle};
use crate::ranking;

/// Number of authors shown in a search summary.
pub const SUMMARY_AUTHOR_LIMIT: usize = 3;

/// Default title when a record has none.
pub const NO_TITLE: &str = "No title";

/// Default publication date.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Default journal name in search summaries.
pub const UNKNOWN_SOURCE: &str = "Unknown source";

/// Placeholder when no author names are available.
pub const NO_AUTHORS: &str = "No authors";

/// View a repeated field as a list regardless of its shape.
///
/// `null` yields nothing, an array yields its elements, and any other value
/// (a single object or scalar) yields itself.
#[must_use]
pub fn as_list(node: &Value) -> Vec<&Value> {
    match node {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

/// [`as_list`] applied to `node[field]`, treating an absent field as empty.
#[must_use]
pub fn list_field<'a>(node: &'a Value, field: &str) -> Vec<&'a Value> {
    node.get(field).map(as_list).unwrap_or_default()
}

/// Text content of a node.
///
/// Strings are returned as-is, numbers and booleans in their text form, and
/// objects through their `#text` entry. An element wrapped whole in a single
/// inline tag, such as `<ArticleTitle><i>Title</i></ArticleTitle>`, yields
/// the inner text.
#[must_use]
pub fn node_text(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => {
            if let Some(text) = map.get(TEXT_KEY) {
                return node_text(text);
            }
            let mut elements = map.iter().filter(|(key, _)| !key.starts_with(ATTR_PREFIX));
            match (elements.next(), elements.next()) {
                (Some((_, Value::String(inner))), None) => Some(inner.clone()),
                _ => None,
            }
        }
        Value::Null | Value::Array(_) => None,
    }
}

/// Attribute value of an element node.
#[must_use]
pub fn attribute<'a>(node: &'a Value, name: &str) -> Option<&'a str> {
    node.get(format!("{ATTR_PREFIX}{name}")).and_then(Value::as_str)
}

/// Follow a chain of object keys.
#[must_use]
pub fn path<'a>(node: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(node, |current, key| current.get(*key))
}

fn str_field(doc: &Value, field: &str, default: &str) -> String {
    doc.get(field).and_then(Value::as_str).unwrap_or(default).to_string()
}

/// First display names from an esummary `authors` list, or "No authors".
#[must_use]
pub fn display_authors(doc: &Value, limit: usize) -> String {
    let names: Vec<&str> = list_field(doc, "authors")
        .into_iter()
        .take(limit)
        .filter_map(|author| author.get("name").and_then(Value::as_str))
        .collect();

    if names.is_empty() { NO_AUTHORS.to_string() } else { names.join(", ") }
}

/// Whether any esummary `pubtype` mentions "review".
#[must_use]
pub fn is_review_pubtype(doc: &Value) -> bool {
    list_field(doc, "pubtype")
        .into_iter()
        .filter_map(Value::as_str)
        .any(|pt| pt.to_lowercase().contains("review"))
}

/// Build a search summary from an esummary document.
///
/// Returns the record together with its review flag.
#[must_use]
pub fn summary_record(pmid: &str, doc: &Value) -> (ArticleSummary, bool) {
    let summary = ArticleSummary {
        pmid: pmid.to_string(),
        title: str_field(doc, "title", NO_TITLE),
        authors: display_authors(doc, SUMMARY_AUTHOR_LIMIT),
        pubdate: str_field(doc, "pubdate", UNKNOWN_DATE),
        source: str_field(doc, "source", UNKNOWN_SOURCE),
    };
    (summary, is_review_pubtype(doc))
}

/// Build an advanced search hit, keeping the raw author entries.
#[must_use]
pub fn advanced_hit(pmid: &str, doc: &Value) -> AdvancedSearchHit {
    AdvancedSearchHit {
        pmid: pmid.to_string(),
        title: str_field(doc, "title", NO_TITLE),
        pubdate: str_field(doc, "pubdate", UNKNOWN_DATE),
        source: str_field(doc, "source", UNKNOWN_SOURCE),
        authors: raw_authors(doc),
    }
}

/// Build a similar-article candidate with a review-tagged title.
#[must_use]
pub fn related_article(pmid: &str, doc: &Value) -> RelatedArticle {
    let title = str_field(doc, "title", NO_TITLE);
    let (title, is_review) = ranking::tag_title(&title);

    RelatedArticle {
        pmid: pmid.to_string(),
        title,
        pubdate: str_field(doc, "pubdate", UNKNOWN_DATE),
        source: str_field(doc, "source", ""),
        authors: raw_authors(doc),
        is_review,
    }
}

fn raw_authors(doc: &Value) -> Value {
    match doc.get("authors") {
        Some(Value::Null) | None => Value::Array(Vec::new()),
        Some(authors) => authors.clone(),
    }
}

fn is_present(node: &Value) -> bool {
    match node {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Build the full record from an efetch tree.
///
/// # Errors
///
/// [`RecordError::NotFound`] when the article set or article is missing,
/// [`RecordError::Incomplete`] when the citation or article node is.
pub fn article_detail(pmid: &str, tree: &Value) -> Result<ArticleDetail, RecordError> {
    let not_found = || RecordError::NotFound { pmid: pmid.to_string() };

    let article_set = tree.get("PubmedArticleSet").filter(|n| is_present(n)).ok_or_else(not_found)?;
    let pubmed_article = list_field(article_set, "PubmedArticle")
        .into_iter()
        .find(|n| is_present(n))
        .ok_or_else(not_found)?;

    let article = path(pubmed_article, &["MedlineCitation", "Article"])
        .filter(|n| n.is_object())
        .ok_or_else(|| RecordError::Incomplete { pmid: pmid.to_string() })?;

    let title = article.get("ArticleTitle").and_then(node_text).unwrap_or_else(|| NO_TITLE.to_string());

    let abstract_text = path(article, &["Abstract", "AbstractText"])
        .map(|node| as_list(node).into_iter().map(|p| node_text(p).unwrap_or_default()).collect::<Vec<_>>())
        .unwrap_or_default()
        .join("\n");

    let authors = path(article, &["AuthorList", "Author"])
        .map(as_list)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|author| {
            let last = author.get("LastName").and_then(node_text)?;
            let fore = author.get("ForeName").and_then(node_text)?;
            Some(format!("{last} {fore}"))
        })
        .collect();

    let journal = path(article, &["Journal", "Title"]).and_then(node_text).unwrap_or_default();

    let mut doi = None;
    let mut pmc_id = None;
    let article_ids = path(pubmed_article, &["PubmedData", "ArticleIdList", "ArticleId"]);
    for id in article_ids.map(as_list).unwrap_or_default() {
        let Some(id_type) = attribute(id, "IdType") else {
            continue;
        };
        match id_type {
            "doi" => doi = node_text(id),
            "pmc" => pmc_id = node_text(id),
            _ => {}
        }
    }

    let links = ArticleLinks::new(pmid, pmc_id.as_deref(), doi.as_deref());

    Ok(ArticleDetail {
        pmid: pmid.to_string(),
        title,
        authors,
        journal,
        doi,
        pmc_id,
        abstract_text,
        links,
    })
}
