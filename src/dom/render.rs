//! HTML serialization.

use std::fmt::Write;

use super::{Element, Node};
use crate::utils::html::{escape_attr, escape_text, is_raw_text_element, is_void_element};

/// Render a node list to HTML.
pub fn render_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node, false);
    }
    out
}

/// Render one element, including its own tag.
pub fn render_element(elem: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, elem);
    out
}

fn write_node(out: &mut String, node: &Node, raw_parent: bool) {
    match node {
        Node::Element(elem) => write_element(out, elem),
        Node::Text(text) if text.raw || raw_parent => out.push_str(&text.content),
        Node::Text(text) => match &text.source {
            Some(source) => out.push_str(source),
            None => out.push_str(&escape_text(&text.content)),
        },
    }
}

fn write_element(out: &mut String, elem: &Element) {
    out.push('<');
    out.push_str(&elem.tag);
    for attr in &elem.attrs.0 {
        let _ = match &attr.source {
            Some(source) => write!(out, " {}=\"{source}\"", attr.name),
            None if attr.value.is_empty() => write!(out, " {}", attr.name),
            None => write!(out, " {}=\"{}\"", attr.name, escape_attr(&attr.value)),
        };
    }
    out.push('>');

    if is_void_element(&elem.tag) {
        return;
    }

    let raw = is_raw_text_element(&elem.tag);
    for child in &elem.children {
        write_node(out, child, raw);
    }

    out.push_str("</");
    out.push_str(&elem.tag);
    out.push('>');
}
