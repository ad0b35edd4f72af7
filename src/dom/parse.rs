//! HTML parsing via `tl`.
//!
//! `tl` builds the element tree. Three things are read from the source here
//! instead:
//!
//! - script and style bodies, which `tl` tokenizes as markup
//! - attributes, which `tl` keeps in a map with id and class split out
//! - the doctype, which `tl` drops
//!
//! Text and attribute values are entity-decoded; see [`Text`] for how their
//! authored form survives a round trip. Comments are dropped.

use std::{borrow::Cow, slice};

use super::{Attrs, Children, DomError, Element, Node, Text};
use crate::utils::html::is_raw_text_element;

/// Parsed document: optional doctype declaration plus top-level nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Everything up to the end of the doctype, leading whitespace included.
    pub doctype: Option<String>,
    pub nodes: Children,
}

/// Parse an HTML fragment into top-level nodes.
pub fn parse_fragment(html: &str) -> Result<Children, DomError> {
    let (markup, bodies) = take_raw_bodies(html);
    let dom = tl::parse(&markup, tl::ParserOptions::default())
        .map_err(|err| DomError::Parse(format!("{err:?}")))?;

    let parser = dom.parser();
    let mut bodies = bodies.iter();
    Ok(dom
        .children()
        .iter()
        .filter_map(|handle| convert(*handle, parser, &mut bodies))
        .collect())
}

/// Parse a full page, keeping a leading `<!DOCTYPE ...>` aside.
pub fn parse_document(html: &str) -> Result<Document, DomError> {
    let (doctype, body) = split_doctype(html);
    Ok(Document {
        doctype: doctype.map(str::to_string),
        nodes: parse_fragment(body)?,
    })
}

/// Split a leading doctype declaration from the rest of the source.
///
/// The declaration keeps any whitespace or byte order mark in front of it.
fn split_doctype(html: &str) -> (Option<&str>, &str) {
    let trimmed = html.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let is_doctype = trimmed
        .get(..9)
        .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"));
    if !is_doctype {
        return (None, html);
    }

    let start = html.len() - trimmed.len();
    match trimmed.find('>') {
        Some(end) => {
            let (doctype, rest) = html.split_at(start + end + 1);
            (Some(doctype), rest)
        }
        None => (None, html),
    }
}

// ============================================================================
// Raw text bodies
// ============================================================================

/// Cut script and style bodies out of `html`.
///
/// Returns the markup with every such element emptied, plus the bodies in
/// document order. Comments are skipped so a commented-out script does not
/// consume a body.
fn take_raw_bodies(html: &str) -> (Cow<'_, str>, Vec<&str>) {
    // ASCII lowercasing keeps byte offsets, so positions carry over to `html`
    let lower = html.to_ascii_lowercase();
    let mut markup = String::new();
    let mut bodies = Vec::new();
    let mut copied = 0;
    let mut pos = 0;

    while let Some(offset) = lower[pos..].find('<') {
        let start = pos + offset;
        let rest = &lower[start..];

        if rest.starts_with("<!--") {
            pos = rest.find("-->").map_or(lower.len(), |end| start + end + 3);
            continue;
        }
        let Some(tag) = raw_text_open(rest) else {
            pos = start + 1;
            continue;
        };
        let Some(open_end) = rest.find('>') else {
            break;
        };

        let body_start = start + open_end + 1;
        let close = format!("</{tag}");
        let body_end = lower[body_start..]
            .find(&close)
            .map_or(lower.len(), |end| body_start + end);

        markup.push_str(&html[copied..body_start]);
        bodies.push(&html[body_start..body_end]);
        copied = body_end;
        pos = body_end;
    }

    if bodies.is_empty() {
        return (Cow::Borrowed(html), bodies);
    }
    markup.push_str(&html[copied..]);
    (Cow::Owned(markup), bodies)
}

/// Name of the raw text element `tag` opens, if any. `tag` is lowercase.
fn raw_text_open(tag: &str) -> Option<&'static str> {
    ["script", "style"].into_iter().find(|name| {
        tag[1..].starts_with(name)
            && tag[1 + name.len()..]
                .starts_with(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
    })
}

// ============================================================================
// Conversion
// ============================================================================

/// Convert a `tl` node. Raw text elements take the next body from `bodies`.
fn convert(
    handle: tl::NodeHandle,
    parser: &tl::Parser,
    bodies: &mut slice::Iter<'_, &str>,
) -> Option<Node> {
    match handle.get(parser)? {
        tl::Node::Tag(tag) => {
            let name = tag.name().as_utf8_str().to_ascii_lowercase();
            let mut elem = Element::new(name);
            elem.attrs = convert_attrs(&tag.raw().as_utf8_str());

            if is_raw_text_element(&elem.tag) {
                if let Some(body) = bodies.next().filter(|body| !body.is_empty()) {
                    elem.push(Text::raw(*body));
                }
                return Some(Node::from(elem));
            }

            for child in tag.children().top().iter() {
                if let Some(node) = convert(*child, parser, bodies) {
                    elem.children.push(node);
                }
            }
            Some(Node::from(elem))
        }
        tl::Node::Raw(bytes) => Some(Node::Text(Text::parsed(&bytes.as_utf8_str()))),
        tl::Node::Comment(_) => None,
    }
}

/// Attributes of the opening tag at the start of `source`, in source order.
fn convert_attrs(source: &str) -> Attrs {
    let mut attrs = Attrs::new();
    let mut scanner = AttrScanner::new(source);
    while let Some((name, value)) = scanner.next_attr() {
        attrs.push_parsed(name, value);
    }
    attrs
}

/// Walks the attributes of one opening tag.
struct AttrScanner<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> AttrScanner<'a> {
    /// Position the scanner after `<` and the tag name.
    fn new(source: &'a str) -> Self {
        let mut scanner = Self { source, pos: 0 };
        scanner.eat_while(|c| c == '<');
        scanner.eat_while(|c| !c.is_whitespace() && c != '/' && c != '>');
        scanner
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn eat_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !keep(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Next `(name, value)`; `None` at the end of the tag.
    fn next_attr(&mut self) -> Option<(&'a str, Option<&'a str>)> {
        loop {
            self.eat_while(|c| c.is_whitespace() || c == '/');
            if self.rest().is_empty() || self.rest().starts_with('>') {
                return None;
            }

            let name = self.eat_while(|c| !c.is_whitespace() && !matches!(c, '/' | '>' | '='));
            if name.is_empty() {
                // Stray `=`
                self.pos += 1;
                continue;
            }

            self.eat_while(char::is_whitespace);
            if !self.rest().starts_with('=') {
                return Some((name, None));
            }
            self.pos += 1;
            self.eat_while(char::is_whitespace);

            let value = match self.rest().chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    self.pos += 1;
                    let value = self.eat_while(|c| c != quote);
                    self.pos = (self.pos + 1).min(self.source.len());
                    value
                }
                _ => self.eat_while(|c| !c.is_whitespace() && c != '>'),
            };
            return Some((name, Some(value)));
        }
    }
}
