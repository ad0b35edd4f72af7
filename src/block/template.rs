//! Output templates.
//!
//! A template is a static tree of element shapes; rendering binds its field
//! slots to a [`Record`]. Slots whose field is absent render nothing, which
//! is how omitted labels disappear from the output.

use serde::Serialize;

use super::schema::Record;
use crate::dom::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Template {
    /// `<tag class>text</tag>` with fixed text.
    Literal {
        tag: &'static str,
        class: Option<&'static str>,
        text: &'static str,
    },
    /// `<tag class>{field}</tag>`; nothing when the field is absent.
    Slot {
        tag: &'static str,
        class: Option<&'static str>,
        field: &'static str,
    },
    /// `<tag class>...children</tag>`.
    Group {
        tag: &'static str,
        class: Option<&'static str>,
        children: &'static [Template],
    },
    /// `<tag class>` wrapping `item` once per row of a rows field.
    Each {
        tag: &'static str,
        class: Option<&'static str>,
        rows: &'static str,
        item: &'static Template,
    },
}

impl Template {
    /// Render against `record`. `None` when a slot's field is absent.
    pub fn render(&self, record: &Record) -> Option<Element> {
        match *self {
            Self::Literal { tag, class, text } => {
                let mut elem = Element::with_class(tag, class);
                elem.push_text(text);
                Some(elem)
            }
            Self::Slot { tag, class, field } => {
                let text = record.text(field)?;
                let mut elem = Element::with_class(tag, class);
                elem.push_text(text);
                Some(elem)
            }
            Self::Group {
                tag,
                class,
                children,
            } => {
                let mut elem = Element::with_class(tag, class);
                for child in render_all(children, record) {
                    elem.push(child);
                }
                Some(elem)
            }
            Self::Each {
                tag,
                class,
                rows,
                item,
            } => {
                let mut elem = Element::with_class(tag, class);
                for row in record.rows(rows) {
                    if let Some(child) = item.render(row) {
                        elem.push(child);
                    }
                }
                Some(elem)
            }
        }
    }
}

/// Render a template list, dropping slots with absent fields.
pub fn render_all(templates: &[Template], record: &Record) -> Vec<Element> {
    templates.iter().filter_map(|t| t.render(record)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::schema::Value;
    use crate::dom::render_element;

    fn record(pairs: &[(&'static str, &str)]) -> Record {
        let mut record = Record::default();
        for &(name, value) in pairs {
            record.insert(name, Value::Text(value.to_string()));
        }
        record
    }

    #[test]
    fn test_slot_renders_field() {
        let slot = Template::Slot {
            tag: "p",
            class: Some("followers"),
            field: "followers",
        };
        let elem = slot.render(&record(&[("followers", "120 followers")])).unwrap();
        assert_eq!(render_element(&elem), r#"<p class="followers">120 followers</p>"#);
    }

    #[test]
    fn test_slot_absent_renders_nothing() {
        let slot = Template::Slot {
            tag: "span",
            class: None,
            field: "category",
        };
        assert!(slot.render(&Record::default()).is_none());
    }

    #[test]
    fn test_group_drops_absent_slots() {
        const CARD: Template = Template::Group {
            tag: "div",
            class: Some("card"),
            children: &[
                Template::Literal {
                    tag: "h2",
                    class: None,
                    text: "Card",
                },
                Template::Slot {
                    tag: "p",
                    class: None,
                    field: "missing",
                },
            ],
        };
        let elem = CARD.render(&Record::default()).unwrap();
        assert_eq!(render_element(&elem), r#"<div class="card"><h2>Card</h2></div>"#);
    }

    #[test]
    fn test_each_renders_rows() {
        const LIST: Template = Template::Each {
            tag: "ul",
            class: None,
            rows: "items",
            item: &Template::Slot {
                tag: "li",
                class: None,
                field: "name",
            },
        };
        let mut root = Record::default();
        root.insert(
            "items",
            Value::Rows(vec![record(&[("name", "a")]), record(&[]), record(&[("name", "b")])]),
        );
        let elem = LIST.render(&root).unwrap();
        assert_eq!(render_element(&elem), "<ul><li>a</li><li>b</li></ul>");
    }
}
