//! XML to JSON-tree conversion for efetch responses.
//!
//! The tree mirrors the document the way xmltodict-style converters do:
//!
//! - an element becomes an object keyed by child tag name
//! - repeated sibling tags collapse into an array
//! - attributes are stored under `@name`
//! - text next to attributes or children is stored under `#text`; for mixed
//!   content such as `Role of <i>APOE</i> in AD` it holds the flattened
//!   text of the whole element, inline children included, in document order
//! - a text-only element becomes a plain string, an empty one becomes `null`
//!
//! Whether a repeated field arrives as an object or an array therefore
//! depends on the record; [`crate::normalize::as_list`] absorbs that.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};

/// Key prefix for attributes.
pub const ATTR_PREFIX: char = '@';

/// Key for element text that shares a node with attributes or children.
pub const TEXT_KEY: &str = "#text";

struct Frame {
    name: String,
    children: Map<String, Value>,
    /// All text under this element, descendants included.
    text: String,
    /// Whether the element has non-whitespace text of its own.
    mixed: bool,
}

impl Frame {
    fn root() -> Self {
        Self { name: String::new(), children: Map::new(), text: String::new(), mixed: false }
    }

    fn open(start: &BytesStart<'_>) -> ClientResult<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut children = Map::new();

        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = format!("{ATTR_PREFIX}{}", String::from_utf8_lossy(attr.key.as_ref()));
            let value = attr.unescape_value()?.into_owned();
            children.insert(key, Value::String(value));
        }

        Ok(Self { name, children, text: String::new(), mixed: false })
    }

    fn push_text(&mut self, text: &str) {
        if !text.trim().is_empty() {
            self.mixed = true;
        }
        self.text.push_str(text);
    }

    fn into_value(self) -> Value {
        let text = self.text.trim();

        if self.children.is_empty() {
            return if text.is_empty() { Value::Null } else { Value::String(text.to_string()) };
        }

        let mut map = self.children;
        if self.mixed {
            map.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        }
        Value::Object(map)
    }
}

/// Parse an XML document into a JSON tree rooted at its top-level element.
///
/// # Errors
///
/// Returns [`ClientError::Xml`] for malformed markup or unbalanced tags.
pub fn parse(xml: &str) -> ClientResult<Value> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut stack = vec![Frame::root()];

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => stack.push(Frame::open(e)?),
            Event::Empty(ref e) => {
                let frame = Frame::open(e)?;
                attach(&mut stack, frame);
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(ClientError::xml("closing tag without matching opening tag"));
                }
                if let Some(frame) = stack.pop() {
                    attach(&mut stack, frame);
                }
            }
            Event::Text(ref e) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if stack.len() != 1 {
        let open = stack.last().map(|f| f.name.clone()).unwrap_or_default();
        return Err(ClientError::xml(format!("unexpected end of document inside <{open}>")));
    }

    let root = stack.pop().map(|f| f.children).unwrap_or_default();
    Ok(Value::Object(root))
}

fn attach(stack: &mut [Frame], frame: Frame) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    parent.text.push_str(&frame.text);
    let name = frame.name.clone();
    let value = frame.into_value();

    match parent.children.entry(name) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            Value::Array(items) => items.push(value),
            existing => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_text_only_element_is_string() {
        let tree = parse("<Root><Title>Hello</Title></Root>").unwrap();
        assert_eq!(tree, json!({"Root": {"Title": "Hello"}}));
    }

    #[test]
    fn test_empty_element_is_null() {
        let tree = parse("<PubmedArticleSet></PubmedArticleSet>").unwrap();
        assert_eq!(tree, json!({"PubmedArticleSet": null}));

        let tree = parse("<PubmedArticleSet/>").unwrap();
        assert_eq!(tree, json!({"PubmedArticleSet": null}));
    }

    #[test]
    fn test_attributes_and_text() {
        let tree = parse(r#"<ArticleIdList><ArticleId IdType="doi">10.1/abc</ArticleId></ArticleIdList>"#)
            .unwrap();
        assert_eq!(
            tree,
            json!({"ArticleIdList": {"ArticleId": {"@IdType": "doi", "#text": "10.1/abc"}}})
        );
    }

    #[test]
    fn test_repeated_siblings_become_array() {
        let tree = parse("<L><A>1</A><A>2</A><A>3</A><B>x</B></L>").unwrap();
        assert_eq!(tree, json!({"L": {"A": ["1", "2", "3"], "B": "x"}}));
    }

    #[test]
    fn test_entities_are_unescaped() {
        let tree = parse("<T>Cats &amp; dogs &lt;3</T>").unwrap();
        assert_eq!(tree, json!({"T": "Cats & dogs <3"}));
    }

    #[test]
    fn test_declaration_and_doctype_ignored() {
        let xml = r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2024//EN" "https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_240101.dtd">
<PubmedArticleSet>
  <PubmedArticle><PMID Version="1">123</PMID></PubmedArticle>
</PubmedArticleSet>"#;
        let tree = parse(xml).unwrap();
        assert_eq!(tree["PubmedArticleSet"]["PubmedArticle"]["PMID"]["#text"], "123");
        assert_eq!(tree["PubmedArticleSet"]["PubmedArticle"]["PMID"]["@Version"], "1");
    }

    #[test]
    fn test_inline_markup_keeps_text_in_order() {
        let tree = parse("<ArticleTitle>Role of <i>APOE</i> in AD</ArticleTitle>").unwrap();
        assert_eq!(tree["ArticleTitle"]["#text"], "Role of APOE in AD");
        assert_eq!(tree["ArticleTitle"]["i"], "APOE");

        let tree =
            parse(r#"<AbstractText Label="RESULTS">Levels of <sup>18</sup>F-FDG fell.</AbstractText>"#).unwrap();
        assert_eq!(tree["AbstractText"]["#text"], "Levels of 18F-FDG fell.");
        assert_eq!(tree["AbstractText"]["@Label"], "RESULTS");
    }

    #[test]
    fn test_structured_element_has_no_text() {
        let xml = "<Author>\n  <LastName>Zhu</LastName>\n  <ForeName>Na</ForeName>\n</Author>";
        let tree = parse(xml).unwrap();
        assert_eq!(tree, json!({"Author": {"LastName": "Zhu", "ForeName": "Na"}}));
    }

    #[test]
    fn test_unbalanced_document_is_error() {
        assert!(parse("<A><B></A>").is_err());
        assert!(parse("<A><B>text</B>").is_err());
    }
}
