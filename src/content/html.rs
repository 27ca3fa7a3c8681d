//! HTML verse fragments read into [`ContentNode`] trees.
//!
//! The provider's HTML mirrors its node tree: `class` carries the paragraph
//! or character style and `data-verse-id` the verse association. Text nodes
//! inherit the verse id of their closest tagged ancestor.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{Attrs, ContentNode, VERSE_ID_ATTR};
use crate::error::{Error, Result};

/// Elements that never have children, whether or not they are self-closed.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "wbr", "input", "meta", "link"];

/// HTML entities quick-xml does not know about.
const HTML_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
    ("&lsquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
    ("&ldquo;", "\u{201c}"),
    ("&rdquo;", "\u{201d}"),
    ("&para;", "\u{b6}"),
];

/// Whether the fragment marks text with verse ids at all.
pub(super) fn has_verse_spans(markup: &str) -> bool {
    markup.contains("data-verse-id")
}

struct OpenElement {
    name: String,
    attrs: Attrs,
    items: Vec<ContentNode>,
}

/// Parse an HTML fragment into content nodes.
pub(super) fn parse_fragment(markup: &str) -> Result<Vec<ContentNode>> {
    let markup = HTML_ENTITIES
        .iter()
        .fold(Cow::Borrowed(markup), |text, (entity, replacement)| {
            if text.contains(entity) {
                Cow::Owned(text.replace(entity, replacement))
            } else {
                text
            }
        });

    let mut reader = Reader::from_str(&markup);
    reader.trim_text(false);
    reader.check_end_names(false);

    let mut root = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let element = open_element(&e);
                if VOID_ELEMENTS.contains(&element.name.as_str()) {
                    close_element(element, &mut stack, &mut root);
                } else {
                    stack.push(element);
                }
            }
            Ok(Event::Empty(e)) => close_element(open_element(&e), &mut stack, &mut root),
            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    close_element(element, &mut stack, &mut root);
                }
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_or_else(|_| String::from_utf8_lossy(&t).into_owned(), Cow::into_owned);
                push_text(text, &mut stack, &mut root);
            }
            Ok(Event::CData(t)) => {
                push_text(String::from_utf8_lossy(&t).into_owned(), &mut stack, &mut root);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::content(format!(
                    "malformed HTML at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
    }

    // Unclosed elements are closed at end of input
    while let Some(element) = stack.pop() {
        close_element(element, &mut stack, &mut root);
    }
    Ok(root)
}

/// Map an HTML start tag onto the node-tree attribute names.
fn open_element(e: &BytesStart<'_>) -> OpenElement {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_lowercase();
    let mut attrs = Attrs::new();

    for attr in e.html_attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned(), Cow::into_owned);
        match key.as_str() {
            "class" => {
                if let Some(style) = value.split_whitespace().next() {
                    attrs.insert("style".into(), style.into());
                }
            }
            "data-verse-id" => {
                attrs.insert(VERSE_ID_ATTR.into(), value.into());
            }
            other => {
                let key = other.strip_prefix("data-").unwrap_or(other);
                attrs.insert(key.into(), value.into());
            }
        }
    }

    // Heading elements carry no class in some renderings
    if matches!(name.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6") {
        attrs.insert("style".into(), "s".into());
    }

    OpenElement { name, attrs, items: Vec::new() }
}

fn close_element(element: OpenElement, stack: &mut [OpenElement], root: &mut Vec<ContentNode>) {
    let node = ContentNode::Tag {
        name: element.name,
        attrs: element.attrs,
        items: element.items,
    };
    match stack.last_mut() {
        Some(parent) => parent.items.push(node),
        None => root.push(node),
    }
}

fn push_text(text: String, stack: &mut [OpenElement], root: &mut Vec<ContentNode>) {
    let mut attrs = Attrs::new();
    if let Some(verse_id) = stack
        .iter()
        .rev()
        .find_map(|open| open.attrs.get(VERSE_ID_ATTR))
    {
        attrs.insert(VERSE_ID_ATTR.into(), verse_id.clone());
    }
    let node = ContentNode::Text { text, attrs };
    match stack.last_mut() {
        Some(parent) => parent.items.push(node),
        None => root.push(node),
    }
}
