//! Licenses & certifications list. Never fails: unnamed rows get a label.

use super::descriptor::{Descriptor, EmptyOutput};
use super::schema::{Field, Presence, Source};
use super::template::Template;

pub static LICENSES: Descriptor = Descriptor {
    name: "licenses-certifications",
    aliases: &["import-licenses-certifications", "import-certifications"],
    summary: "One list item per row, with an optional issuer line",
    fields: &[Field::Rows {
        name: "certifications",
        fields: &[
            Field::Text {
                name: "name",
                source: Source::Child(&[0]),
                presence: Presence::Fallback("Certification"),
            },
            Field::Text {
                name: "issuer",
                source: Source::Child(&[1]),
                presence: Presence::Omit,
            },
        ],
    }],
    body: &[Template::Group {
        tag: "div",
        class: Some("section-card licenses-certifications-section"),
        children: &[
            Template::Literal {
                tag: "h2",
                class: None,
                text: "Licenses & Certifications",
            },
            Template::Each {
                tag: "ul",
                class: Some("cert-list"),
                rows: "certifications",
                item: &Template::Group {
                    tag: "li",
                    class: None,
                    children: &[
                        Template::Slot {
                            tag: "h3",
                            class: None,
                            field: "name",
                        },
                        Template::Slot {
                            tag: "p",
                            class: None,
                            field: "issuer",
                        },
                    ],
                },
            },
        ],
    }],
    on_empty: EmptyOutput::Clear,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Decorate, SiteContext};
    use crate::dom::{Element, parse_fragment, render_element};

    fn fragment(html: &str) -> Element {
        parse_fragment(html).unwrap()[0].as_element().unwrap().clone()
    }

    fn item_names(block: &Element) -> Vec<String> {
        let list = block.descendant(&[0, 1]).unwrap();
        list.element_children()
            .map(|li| li.child(0).unwrap().text_content())
            .collect()
    }

    #[test]
    fn test_fallback_label_for_unnamed_row() {
        let mut block = fragment(
            r#"<div class="licenses-certifications"><div><div>AWS Certified</div></div><div></div></div>"#,
        );
        LICENSES.decorate(&mut block, &SiteContext::new()).unwrap();
        assert_eq!(block.children.len(), 1);
        assert_eq!(item_names(&block), ["AWS Certified", "Certification"]);
    }

    #[test]
    fn test_issuer_only_when_present() {
        let mut block = fragment(
            r#"<div class="licenses-certifications"><div><div>CKA</div><div>CNCF</div></div><div><div>PMP</div></div></div>"#,
        );
        LICENSES.decorate(&mut block, &SiteContext::new()).unwrap();
        assert_eq!(
            render_element(block.child(0).unwrap()),
            concat!(
                r#"<div class="section-card licenses-certifications-section">"#,
                "<h2>Licenses &amp; Certifications</h2>",
                r#"<ul class="cert-list"><li><h3>CKA</h3><p>CNCF</p></li>"#,
                "<li><h3>PMP</h3></li></ul></div>",
            )
        );
    }

    #[test]
    fn test_empty_fragment_renders_empty_list() {
        let mut block = fragment(r#"<div class="licenses-certifications"></div>"#);
        LICENSES.decorate(&mut block, &SiteContext::new()).unwrap();
        assert!(item_names(&block).is_empty());
    }
}
