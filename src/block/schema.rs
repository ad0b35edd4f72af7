//! Named-field input schemas.
//!
//! A schema says where each named value of a block comes from and what
//! happens when it is absent. [`extract`] reads every field once, before the
//! fragment is touched, so a block either gets a complete [`Record`] or fails
//! with every missing field listed.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::context::SiteContext;
use super::error::{BlockError, MissingField, MissingFields};
use crate::dom::Element;

// ============================================================================
// Schema
// ============================================================================

/// Where a text field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Element-child index path from the current scope (fragment or row).
    Child(&'static [usize]),
    /// Site context key.
    Meta(&'static str),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Child([]) => f.write_str("fragment"),
            Self::Child(path) => {
                f.write_str("child ")?;
                for (i, index) in path.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" > ")?;
                    }
                    write!(f, "{index}")?;
                }
                Ok(())
            }
            Self::Meta(key) => write!(f, "metadata `{key}`"),
        }
    }
}

/// What an absent field means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Structurally absent fails the block. Empty text still counts as present.
    Required,
    /// Absent or blank uses the label.
    Fallback(&'static str),
    /// Absent or blank leaves the field out; template slots bound to it emit nothing.
    Omit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Field {
    /// Trimmed text content of one source.
    Text {
        name: &'static str,
        source: Source,
        presence: Presence,
    },
    /// One record per element child of the current scope.
    Rows {
        name: &'static str,
        fields: &'static [Field],
    },
}

impl Field {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text { name, .. } | Self::Rows { name, .. } => *name,
        }
    }
}

// ============================================================================
// Record
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Rows(Vec<Record>),
}

/// Values extracted from one fragment (or one row of it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: FxHashMap<&'static str, Value>,
}

impl Record {
    pub fn insert(&mut self, name: &'static str, value: Value) {
        self.values.insert(name, value);
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            Value::Text(text) => Some(text.as_str()),
            Value::Rows(_) => None,
        }
    }

    pub fn rows(&self, name: &str) -> &[Record] {
        match self.values.get(name) {
            Some(Value::Rows(rows)) => rows.as_slice(),
            _ => &[],
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Read every field of `fields` from `fragment` and `ctx`.
pub fn extract(
    block: &'static str,
    fields: &'static [Field],
    fragment: &Element,
    ctx: &SiteContext,
) -> Result<Record, BlockError> {
    let mut missing = Vec::new();
    let record = extract_scope(fields, fragment, ctx, None, &mut missing);

    if missing.is_empty() {
        Ok(record)
    } else {
        Err(BlockError::MissingFields {
            block,
            missing: MissingFields(missing),
        })
    }
}

fn extract_scope(
    fields: &'static [Field],
    scope: &Element,
    ctx: &SiteContext,
    row: Option<usize>,
    missing: &mut Vec<MissingField>,
) -> Record {
    let mut record = Record::default();

    for field in fields {
        match *field {
            Field::Text {
                name,
                source,
                presence,
            } => {
                let found = read(source, scope, ctx);
                match resolve(found, presence) {
                    Ok(Some(text)) => record.insert(name, Value::Text(text)),
                    Ok(None) => {}
                    Err(()) => missing.push(MissingField {
                        field: name,
                        source,
                        row,
                    }),
                }
            }
            Field::Rows { name, fields } => {
                let rows = scope
                    .element_children()
                    .enumerate()
                    .map(|(i, child)| extract_scope(fields, child, ctx, Some(i), missing))
                    .collect();
                record.insert(name, Value::Rows(rows));
            }
        }
    }

    record
}

fn read(source: Source, scope: &Element, ctx: &SiteContext) -> Option<String> {
    match source {
        Source::Child(path) => scope
            .descendant(path)
            .map(|elem| elem.text_content().trim().to_string()),
        Source::Meta(key) => ctx.get(key).map(str::to_string),
    }
}

/// `Ok(None)` omits the field, `Err(())` reports it missing.
fn resolve(found: Option<String>, presence: Presence) -> Result<Option<String>, ()> {
    match (found, presence) {
        (Some(text), Presence::Required) => Ok(Some(text)),
        (None, Presence::Required) => Err(()),
        (Some(text), _) if !text.is_empty() => Ok(Some(text)),
        (_, Presence::Fallback(label)) => Ok(Some(label.to_string())),
        (_, Presence::Omit) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    fn fragment(html: &str) -> Element {
        let nodes = parse_fragment(html).unwrap();
        nodes[0].as_element().unwrap().clone()
    }

    const PAIR: &[Field] = &[
        Field::Text {
            name: "title",
            source: Source::Child(&[0, 0]),
            presence: Presence::Required,
        },
        Field::Text {
            name: "body",
            source: Source::Child(&[1]),
            presence: Presence::Required,
        },
    ];

    #[test]
    fn test_extract_nested_paths() {
        let block = fragment("<div><div><div>Title</div></div><div> Body text </div></div>");
        let record = extract("pair", PAIR, &block, &SiteContext::new()).unwrap();
        assert_eq!(record.text("title"), Some("Title"));
        assert_eq!(record.text("body"), Some("Body text"));
    }

    #[test]
    fn test_extract_reports_every_missing_field() {
        let block = fragment("<div></div>");
        let err = extract("pair", PAIR, &block, &SiteContext::new()).unwrap_err();
        let BlockError::MissingFields { block, missing } = err else {
            panic!("expected MissingFields");
        };
        assert_eq!(block, "pair");
        assert_eq!(missing.fields().collect::<Vec<_>>(), ["title", "body"]);
    }

    #[test]
    fn test_required_accepts_empty_text() {
        let block = fragment("<div><div><div></div></div><div></div></div>");
        let record = extract("pair", PAIR, &block, &SiteContext::new()).unwrap();
        assert_eq!(record.text("title"), Some(""));
    }

    #[test]
    fn test_rows_with_fallback_and_omit() {
        const ROWS: &[Field] = &[Field::Rows {
            name: "items",
            fields: &[
                Field::Text {
                    name: "name",
                    source: Source::Child(&[0]),
                    presence: Presence::Fallback("Unnamed"),
                },
                Field::Text {
                    name: "note",
                    source: Source::Child(&[1]),
                    presence: Presence::Omit,
                },
            ],
        }];

        let block = fragment("<div><div><div>First</div><div>extra</div></div><div></div><div><div> </div></div></div>");
        let record = extract("rows", ROWS, &block, &SiteContext::new()).unwrap();
        let rows = record.rows("items");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].text("name"), Some("First"));
        assert_eq!(rows[0].text("note"), Some("extra"));
        assert_eq!(rows[1].text("name"), Some("Unnamed"));
        assert!(!rows[1].contains("note"));
        assert_eq!(rows[2].text("name"), Some("Unnamed"));
    }

    #[test]
    fn test_meta_source() {
        const META: &[Field] = &[Field::Text {
            name: "category",
            source: Source::Meta("category"),
            presence: Presence::Omit,
        }];
        let block = fragment("<div></div>");

        let ctx = SiteContext::new().with("Category", "Talks");
        let record = extract("meta", META, &block, &ctx).unwrap();
        assert_eq!(record.text("category"), Some("Talks"));

        let record = extract("meta", META, &block, &SiteContext::new()).unwrap();
        assert!(!record.contains("category"));
    }

    #[test]
    fn test_source_display() {
        assert_eq!(Source::Child(&[]).to_string(), "fragment");
        assert_eq!(Source::Child(&[2]).to_string(), "child 2");
        assert_eq!(Source::Meta("category").to_string(), "metadata `category`");
    }

    #[test]
    fn test_rows_accessor_on_text_is_empty() {
        let mut record = Record::default();
        record.insert("name", Value::Text("x".into()));
        assert!(record.rows("name").is_empty());
        assert_eq!(record.text("missing"), None);
    }
}
