//! Owned HTML node tree.
//!
//! Blocks read and rewrite fragments through this tree; pages are parsed into
//! it with `tl` (see [`parse`]) and written back out by [`render`].
//!
//! Positional access ([`Element::child`], [`Element::descendant`]) counts
//! element children only, so whitespace between authored rows never shifts
//! an index.

pub mod parse;
pub mod render;

use smallvec::SmallVec;
use thiserror::Error;

use crate::utils::html::{escape_attr, escape_text, unescape};

pub use parse::{Document, parse_document, parse_fragment};
pub use render::{render_element, render_nodes};

/// Child list; most fragment nodes hold a handful of children.
pub type Children = SmallVec<[Node; 4]>;

/// DOM errors
#[derive(Debug, Error)]
pub enum DomError {
    #[error("failed to parse html: {0}")]
    Parse(String),
}

// ============================================================================
// Nodes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Box<Element>),
    Text(Text),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(elem) => Some(&**elem),
            Self::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(elem) => Some(&mut **elem),
            Self::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Self::Element(Box::new(elem))
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

/// Decoded text. `raw` text is emitted verbatim (script and style bodies).
///
/// Parsed text keeps its authored form when re-escaping `content` would not
/// reproduce it, so untouched page text renders back byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub content: String,
    pub raw: bool,
    source: Option<String>,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            raw: false,
            source: None,
        }
    }

    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            raw: true,
            source: None,
        }
    }

    /// Text as written in a page.
    pub(crate) fn parsed(source: &str) -> Self {
        let content = unescape(source);
        let source = (escape_text(&content) != source).then(|| source.to_string());
        Self {
            content: content.into_owned(),
            raw: false,
            source,
        }
    }
}

// ============================================================================
// Attributes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct Attr {
    name: String,
    value: String,
    /// Authored value, kept while it differs from the re-escaped `value`.
    source: Option<String>,
}

/// Ordered attribute list. Keys are unique; `set` replaces in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(Vec<Attr>);

impl Attrs {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|a| a.name.eq_ignore_ascii_case(key))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.0[i].value.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(i) => {
                self.0[i].value = value;
                self.0[i].source = None;
            }
            None => self.0.push(Attr {
                name: key,
                value,
                source: None,
            }),
        }
    }

    /// Append an attribute as written in a page. A repeated name keeps the
    /// first occurrence.
    pub(crate) fn push_parsed(&mut self, name: &str, source: Option<&str>) {
        if self.position(name).is_some() {
            return;
        }
        let source = source.unwrap_or_default();
        let value = unescape(source);
        let keep = !source.contains('"') && escape_attr(&value) != source;
        self.0.push(Attr {
            name: name.to_string(),
            value: value.into_owned(),
            source: keep.then(|| source.to_string()),
        });
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.position(key)?;
        Some(self.0.remove(index).value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|a| (a.name.as_str(), a.value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attrs {
    fn from(pairs: [(K, V); N]) -> Self {
        let mut attrs = Self::new();
        for (k, v) in pairs {
            attrs.set(k, v);
        }
        attrs
    }
}

// ============================================================================
// Element
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Attrs,
    pub children: Children,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attrs::new(),
            children: Children::new(),
        }
    }

    /// Element with an optional `class` attribute.
    pub fn with_class(tag: impl Into<String>, class: Option<&str>) -> Self {
        let mut elem = Self::new(tag);
        if let Some(class) = class {
            elem.attrs.set("class", class);
        }
        elem
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(Text::new(text)));
    }

    /// Whitespace-separated class names, in order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs.get("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// The element's first class name (a fragment's block name).
    pub fn first_class(&self) -> Option<&str> {
        self.classes().next()
    }

    /// Element children, skipping text nodes.
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Element child at `index`.
    pub fn child(&self, index: usize) -> Option<&Element> {
        self.element_children().nth(index)
    }

    /// Follow a path of element-child indices; an empty path is `self`.
    pub fn descendant(&self, path: &[usize]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |elem, &index| elem.child(index))
    }

    /// Concatenated descendant text.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(&text.content),
                Node::Element(elem) => elem.collect_text(out),
            }
        }
    }

    /// Replace all children.
    pub fn replace_children(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.children.clear();
        self.children.extend(nodes);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(text: &str) -> Element {
        let mut cell = Element::new("div");
        cell.push_text(text);
        let mut row = Element::new("div");
        row.push(cell);
        row
    }

    #[test]
    fn test_attrs_set_replaces() {
        let mut attrs = Attrs::from([("class", "a")]);
        attrs.set("CLASS", "b");
        assert_eq!(attrs.get("class"), Some("b"));
        assert_eq!(attrs.iter().count(), 1);
        assert_eq!(attrs.remove("class").as_deref(), Some("b"));
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parsed_text_keeps_authored_form() {
        let text = Text::parsed("&copy; 2024 it&rsquo;s");
        assert_eq!(text.content, "\u{a9} 2024 it\u{2019}s");
        assert_eq!(text.source.as_deref(), Some("&copy; 2024 it&rsquo;s"));

        // Re-escaping reproduces plain text, nothing extra is stored
        assert_eq!(Text::parsed("Tom &amp; Jerry").source, None);
    }

    #[test]
    fn test_parsed_attrs() {
        let mut attrs = Attrs::new();
        attrs.push_parsed("title", Some("&copy; Acme"));
        attrs.push_parsed("TITLE", Some("second"));
        attrs.push_parsed("hidden", None);
        assert_eq!(attrs.get("title"), Some("\u{a9} Acme"));
        assert_eq!(attrs.get("hidden"), Some(""));
        assert_eq!(attrs.iter().count(), 2);
        assert_eq!(attrs.0[0].source.as_deref(), Some("&copy; Acme"));

        // A rewritten value drops its authored form
        attrs.set("title", "New");
        assert_eq!(attrs.0[0].source, None);
    }

    #[test]
    fn test_classes() {
        let elem = Element::with_class("span", Some("card-tag  alt"));
        assert_eq!(elem.classes().collect::<Vec<_>>(), ["card-tag", "alt"]);
        assert!(elem.has_class("alt"));
        assert_eq!(elem.first_class(), Some("card-tag"));
        assert_eq!(Element::new("div").first_class(), None);
    }

    #[test]
    fn test_positional_access_skips_text() {
        let mut block = Element::new("div");
        block.push_text("\n  ");
        block.push(row("first"));
        block.push_text("\n  ");
        block.push(row("second"));

        assert_eq!(block.child(1).map(Element::text_content).as_deref(), Some("second"));
        assert!(block.child(2).is_none());
        assert_eq!(
            block.descendant(&[0, 0]).map(Element::text_content).as_deref(),
            Some("first")
        );
        assert!(block.descendant(&[0, 1]).is_none());
        assert_eq!(block.descendant(&[]), Some(&block));
    }

    #[test]
    fn test_text_content_nested() {
        let mut p = Element::new("p");
        p.push_text("Great ");
        let mut strong = Element::new("strong");
        strong.push_text("milestone");
        p.push(strong);
        p.push_text("!");
        assert_eq!(p.text_content(), "Great milestone!");
    }

    #[test]
    fn test_replace_children() {
        let mut block = Element::new("div");
        block.push(row("old"));
        block.replace_children([Node::from(Element::new("section"))]);
        assert_eq!(block.children.len(), 1);
        assert_eq!(block.child(0).map(|e| e.tag.as_str()), Some("section"));
    }
}
