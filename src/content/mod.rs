//! Verse content flattening.
//!
//! The content provider returns a verse either as a JSON node tree
//! (paragraphs, verse markers, footnotes, styled spans) or as an HTML
//! fragment. Both are reduced to the plain reading text a reciter is
//! expected to say.

mod html;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Node attributes as delivered by the content provider.
pub type Attrs = BTreeMap<String, serde_json::Value>;

/// Attribute tying a text fragment to the verse it belongs to.
const VERSE_ID_ATTR: &str = "verseId";

/// Paragraph styles for section headings, titles and references.
const HEADING_STYLES: &[&str] = &[
    "s", "s1", "s2", "s3", "s4", "ms", "ms1", "ms2", "ms3", "mr", "sr", "r", "sp", "d", "cl",
    "mt", "mt1", "mt2", "mt3",
];

/// Footnote and cross-reference styles.
const NOTE_STYLES: &[&str] = &["f", "fe", "ef", "x", "ex"];

/// Chapter and verse number markers.
const MARKER_STYLES: &[&str] = &["v", "vp", "va", "c", "ca", "cp"];

/// One node of a verse content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentNode {
    /// An element such as a paragraph, verse marker, note or styled span.
    Tag {
        /// Element name ("para", "verse", "note", "char", ...).
        name: String,
        /// Element attributes ("style", "number", ...).
        #[serde(default)]
        attrs: Attrs,
        /// Child nodes.
        #[serde(default)]
        items: Vec<ContentNode>,
    },
    /// A run of text.
    Text {
        /// The text itself.
        text: String,
        /// Text attributes ("verseId", "verseOrgIds").
        #[serde(default)]
        attrs: Attrs,
    },
}

impl ContentNode {
    fn style(attrs: &Attrs) -> Option<&str> {
        attrs.get("style").and_then(serde_json::Value::as_str)
    }

    /// Whether the whole subtree is excluded from the reading text.
    fn is_removed(&self) -> bool {
        match self {
            Self::Tag { name, attrs, .. } => {
                matches!(name.as_str(), "note" | "verse" | "chapter")
                    || Self::style(attrs).is_some_and(|style| {
                        HEADING_STYLES.contains(&style)
                            || NOTE_STYLES.contains(&style)
                            || MARKER_STYLES.contains(&style)
                    })
            }
            Self::Text { .. } => false,
        }
    }
}

/// Verse content in one of the provider's two shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerseContent {
    /// Structured node tree.
    Nodes(Vec<ContentNode>),
    /// HTML fragment.
    Html(String),
}

impl VerseContent {
    /// Deserialize content from JSON: a node array or an HTML string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| crate::error::Error::content(format!("unreadable verse content: {e}")))
    }

    /// Flatten to plain reading text.
    pub fn to_plain_text(&self) -> Result<String> {
        to_plain_text(self)
    }
}

/// Flatten verse content to whitespace-normalized reading text.
///
/// Headings, footnotes and verse numbers are dropped, as is any text not
/// associated with a verse. HTML without verse spans has no such
/// association at all, so every remaining text node is kept.
pub fn to_plain_text(content: &VerseContent) -> Result<String> {
    match content {
        VerseContent::Nodes(nodes) => Ok(flatten(nodes, true)),
        VerseContent::Html(markup) => {
            let nodes = html::parse_fragment(markup)?;
            Ok(flatten(&nodes, html::has_verse_spans(markup)))
        }
    }
}

fn flatten(nodes: &[ContentNode], require_verse_ids: bool) -> String {
    let mut fragments = Vec::new();
    collect_text(nodes, require_verse_ids, &mut fragments);
    fragments
        .iter()
        .flat_map(|f| f.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_text<'a>(nodes: &'a [ContentNode], require_verse_ids: bool, out: &mut Vec<&'a str>) {
    for node in nodes.iter().filter(|n| !n.is_removed()) {
        match node {
            ContentNode::Tag { items, .. } => collect_text(items, require_verse_ids, out),
            ContentNode::Text { text, attrs } => {
                if !require_verse_ids || attrs.contains_key(VERSE_ID_ATTR) {
                    out.push(text);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    const JOHN_3_16: &str = r#"[
        {"name": "para", "type": "tag", "attrs": {"style": "s1"},
         "items": [{"text": "For God So Loved the World", "type": "text"}]},
        {"name": "para", "type": "tag", "attrs": {"style": "b"}, "items": []},
        {"name": "para", "type": "tag", "attrs": {"style": "p"},
         "items": [
            {"name": "verse", "type": "tag", "attrs": {"number": "16", "style": "v", "sid": "JHN 3:16"},
             "items": [{"text": "16", "type": "text"}]},
            {"text": "For God so loved the world, that he gave his only Son, ", "type": "text",
             "attrs": {"verseId": "JHN.3.16", "verseOrgIds": ["JHN.3.16"]}},
            {"name": "note", "type": "tag", "attrs": {"style": "f", "caller": "+"},
             "items": [{"text": "Or his only begotten Son", "type": "text", "attrs": {"verseId": "JHN.3.16"}}]},
            {"name": "char", "type": "tag", "attrs": {"style": "wj"},
             "items": [{"text": "that whoever believes in him", "type": "text", "attrs": {"verseId": "JHN.3.16"}}]},
            {"text": "  should not perish but have eternal life.", "type": "text", "attrs": {"verseId": "JHN.3.16"}}
         ]},
        {"name": "para", "type": "tag", "attrs": {"style": "b"}, "items": []}
    ]"#;

    #[test]
    fn test_node_tree_flattening() {
        let content = VerseContent::from_json(JOHN_3_16).unwrap();
        assert_eq!(
            content.to_plain_text().unwrap(),
            "For God so loved the world, that he gave his only Son, that whoever believes in him should not perish but have eternal life."
        );
    }

    #[test]
    fn test_text_without_verse_id_is_dropped() {
        let json = r#"[{"name": "para", "type": "tag", "attrs": {"style": "q1"}, "items": [
            {"text": "Selah", "type": "text"},
            {"text": "The Lord is my shepherd;", "type": "text", "attrs": {"verseId": "PSA.23.1"}}
        ]}]"#;
        let content = VerseContent::from_json(json).unwrap();
        assert_eq!(content.to_plain_text().unwrap(), "The Lord is my shepherd;");
    }

    #[test]
    fn test_html_string_deserializes_as_html() {
        let content = VerseContent::from_json(r#""<p class=\"p\">Jesus wept.</p>""#).unwrap();
        assert!(matches!(content, VerseContent::Html(_)));
        assert_eq!(content.to_plain_text().unwrap(), "Jesus wept.");
    }

    #[test]
    fn test_bad_json_is_a_content_error() {
        assert!(VerseContent::from_json("{not json").is_err());
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(to_plain_text(&VerseContent::Nodes(Vec::new())).unwrap(), "");
    }
}
