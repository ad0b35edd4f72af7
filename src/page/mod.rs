//! Page host: finds block fragments in a document and decorates them.
//!
//! A fragment is any element whose first class names a registered block.
//! Each fragment is decorated once and its subtree is not searched further.
//! Failures are isolated: a failing fragment is left as authored and recorded
//! in the [`PageReport`], the rest of the page is still decorated.

mod meta;

use crate::block::{BlockError, Decorate, Outcome, Registry, SiteContext, is_decorated};
use crate::debug;
use crate::dom::{Document, DomError, Element, Node, parse_document, render_nodes};

/// One fragment that could not be decorated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFailure {
    pub block: &'static str,
    pub error: BlockError,
}

/// What happened to the fragments of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageReport {
    pub decorated: usize,
    /// Block applied nothing (tags with no metadata).
    pub untouched: usize,
    /// Fragment already carried rendered output.
    pub skipped: usize,
    pub failures: Vec<BlockFailure>,
}

impl PageReport {
    /// Number of block fragments found on the page.
    pub fn fragments(&self) -> usize {
        self.decorated + self.untouched + self.skipped + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, block: &'static str, result: Result<Outcome, BlockError>) {
        match result {
            Ok(Outcome::Decorated { nodes }) => {
                debug!("block"; "{block}: rendered {nodes} node(s)");
                self.decorated += 1;
            }
            Ok(Outcome::Untouched) => {
                debug!("block"; "{block}: nothing to render, left as authored");
                self.untouched += 1;
            }
            Err(error) => self.failures.push(BlockFailure { block, error }),
        }
    }
}

/// A parsed HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    doc: Document,
}

impl Page {
    pub fn parse(html: &str) -> Result<Self, DomError> {
        Ok(Self {
            doc: parse_document(html)?,
        })
    }

    /// Site context from the page's `<meta>` tags.
    pub fn metadata(&self) -> SiteContext {
        meta::collect(&self.doc.nodes)
    }

    /// Decorate every block fragment on the page with `ctx`.
    pub fn decorate(&mut self, registry: &Registry, ctx: &SiteContext) -> PageReport {
        let mut report = PageReport::default();
        walk(&mut self.doc.nodes, registry, ctx, &mut report);
        report
    }

    pub fn render(&self) -> String {
        let body = render_nodes(&self.doc.nodes);
        match &self.doc.doctype {
            Some(doctype) => format!("{doctype}{body}"),
            None => body,
        }
    }
}

fn walk(nodes: &mut [Node], registry: &Registry, ctx: &SiteContext, report: &mut PageReport) {
    for node in nodes {
        let Some(elem) = node.as_element_mut() else {
            continue;
        };

        match registry.for_fragment(elem) {
            Some(block) => visit(block, elem, ctx, report),
            None => walk(&mut elem.children, registry, ctx, report),
        }
    }
}

fn visit(block: &dyn Decorate, fragment: &mut Element, ctx: &SiteContext, report: &mut PageReport) {
    if is_decorated(fragment) {
        debug!("block"; "{}: already decorated, skipped", block.name());
        report.skipped += 1;
        return;
    }
    report.record(block.name(), block.decorate(fragment, ctx));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decorate(html: &str, ctx: &SiteContext) -> (String, PageReport) {
        let mut page = Page::parse(html).unwrap();
        let report = page.decorate(&Registry::builtin(), ctx);
        (page.render(), report)
    }

    #[test]
    fn test_doctype_round_trip() {
        let html = "<!DOCTYPE html><html><head><title>A &amp; B</title></head><body><p>x</p></body></html>";
        let page = Page::parse(html).unwrap();
        assert_eq!(page.render(), html);
    }

    #[test]
    fn test_rest_of_page_survives_decoration() {
        let head = concat!(
            "\u{feff}\n<!DOCTYPE html><html><head>",
            "<script>for (let i = 0; i<n; i++) { if (a < b) {} }</script></head><body>",
            r#"<a id="x" class="c d" href="/p?a=1&amp;b=2" data-k="v">link</a>"#,
        );
        let tail = "<footer><p>&copy; 2024 Acme &mdash; it&rsquo;s here</p></footer></body></html>";
        let html = format!(r#"{head}<div class="about"><div>Engineer &mdash; Acme</div></div>{tail}"#);

        let (out, report) = decorate(&html, &SiteContext::new());
        assert_eq!(report.decorated, 1);
        assert!(out.starts_with(head));
        assert!(out.ends_with(tail));
        assert!(out.contains("<p>Engineer \u{2014} Acme</p>"));
    }

    #[test]
    fn test_broken_fragment_is_isolated() {
        let html = concat!(
            r#"<main><div class="activity"><div>only one row</div></div>"#,
            r#"<div class="about"><div>Engineer at Acme</div></div></main>"#,
        );
        let (out, report) = decorate(html, &SiteContext::new());

        assert_eq!(report.decorated, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].block, "activity");
        assert!(!report.is_clean());
        assert!(out.contains(r#"<div class="activity"><div>only one row</div></div>"#));
        assert!(out.contains(r#"<section class="about-section"><h2>About</h2><p>Engineer at Acme</p></section>"#));
    }

    #[test]
    fn test_meta_feeds_tags() {
        let html = concat!(
            r#"<html><head><meta name="content-technology" content="Rust">"#,
            r#"<meta property="category" content="Talks"></head>"#,
            r#"<body><div class="tags"></div></body></html>"#,
        );
        let mut page = Page::parse(html).unwrap();
        let ctx = page.metadata();
        let report = page.decorate(&Registry::builtin(), &ctx);

        assert_eq!(report.decorated, 1);
        assert!(page.render().contains(
            r#"<span class="card-tag">Rust</span><span class="card-tag alt">Talks</span>"#
        ));
    }

    #[test]
    fn test_decorated_fragments_are_skipped() {
        let html = r#"<div class="about"><div>Engineer</div></div>"#;
        let mut page = Page::parse(html).unwrap();
        let registry = Registry::builtin();
        let ctx = SiteContext::new();
        assert_eq!(page.decorate(&registry, &ctx).decorated, 1);

        let once = page.render();
        let report = page.decorate(&registry, &ctx);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.fragments(), 1);
        assert_eq!(page.render(), once);
    }

    #[test]
    fn test_untouched_and_unknown_classes() {
        let html = r#"<div class="card"><div class="tags"><p>fallback</p></div></div>"#;
        let (out, report) = decorate(html, &SiteContext::new());
        assert_eq!(report.untouched, 1);
        assert!(report.is_clean());
        assert_eq!(out, html);
    }

    #[test]
    fn test_fragment_subtree_not_searched() {
        // The nested about block is authored content of the licenses block.
        let html = r#"<div class="licenses-certifications"><div class="about"><div>x</div></div></div>"#;
        let (out, report) = decorate(html, &SiteContext::new());
        assert_eq!(report.fragments(), 1);
        assert!(out.contains("<li><h3>x</h3></li>"));
    }
}
