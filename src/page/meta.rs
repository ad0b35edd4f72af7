//! Page metadata from `<meta>` tags.

use crate::block::SiteContext;
use crate::dom::Node;

/// Collect `<meta name|property=… content=…>` pairs, in document order.
/// Later tags win.
pub fn collect(nodes: &[Node]) -> SiteContext {
    let mut ctx = SiteContext::new();
    visit(nodes, &mut ctx);
    ctx
}

fn visit(nodes: &[Node], ctx: &mut SiteContext) {
    for elem in nodes.iter().filter_map(Node::as_element) {
        if elem.tag == "meta" {
            let key = elem.attrs.get("name").or_else(|| elem.attrs.get("property"));
            if let (Some(key), Some(content)) = (key, elem.attrs.get("content")) {
                ctx.insert(key, content);
            }
            continue;
        }
        visit(&elem.children, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    #[test]
    fn test_collect_meta() {
        let nodes = parse_fragment(concat!(
            r#"<head><meta charset="utf-8"><meta name="Content Technology" content="Rust">"#,
            r#"<meta property="og:title" content="Home"><meta name="category"></head>"#,
        ))
        .unwrap();
        let ctx = collect(&nodes);
        assert_eq!(ctx.get("content-technology"), Some("Rust"));
        assert_eq!(ctx.get("og:title"), Some("Home"));
        assert_eq!(ctx.get("category"), None);
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_later_tag_wins() {
        let nodes = parse_fragment(
            r#"<meta name="category" content="A"><div><meta name="category" content="B"></div>"#,
        )
        .unwrap();
        assert_eq!(collect(&nodes).get("category"), Some("B"));
    }
}
