//! Content blocks.
//!
//! A block rewrites one authored fragment (a container whose children hold
//! raw text) into styled markup. All built-in blocks share one renderer,
//! configured by a [`Descriptor`] per block:
//!
//! | Block                     | Reads                        | Emits                                 |
//! |---------------------------|------------------------------|---------------------------------------|
//! | `activity`                | 3 rows                       | `section-card activity-section`       |
//! | `featured`                | row 0 (2 cells), row 1       | `section-card featured-section`       |
//! | `licenses-certifications` | any number of rows           | `section-card licenses-certifications-section` |
//! | `about`                   | row 0                        | `about-section`                       |
//! | `tags`                    | site context only            | `card-tag`, `card-tag alt` labels     |
//!
//! Blocks are pure with respect to their inputs: the fragment is read once
//! through the block's schema and only then replaced. Decorating a fragment
//! that already holds rendered output is rejected.

mod about;
mod activity;
pub mod context;
mod descriptor;
pub mod error;
mod featured;
mod licenses;
pub mod schema;
mod tags;
pub mod template;

pub use context::SiteContext;
pub use descriptor::Descriptor;
pub use error::BlockError;
pub use tags::RECOGNIZED_KEYS;

use crate::dom::Element;

/// Attribute set on a fragment once it holds rendered output.
pub const STATUS_ATTR: &str = "data-block-status";
/// Attribute recording which block rendered the fragment.
pub const NAME_ATTR: &str = "data-block-name";
const STATUS_DECORATED: &str = "decorated";

/// Result of a successful decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Fragment content replaced with `nodes` rendered nodes.
    Decorated { nodes: usize },
    /// Nothing applied; the fragment was not modified.
    Untouched,
}

/// A fragment transform.
pub trait Decorate: Sync {
    fn name(&self) -> &'static str;

    /// Alternative class names selecting this block.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Static description, for blocks built on the generic renderer.
    fn descriptor(&self) -> Option<&Descriptor> {
        None
    }

    /// Rewrite `fragment` in place. On error the fragment is unchanged.
    fn decorate(&self, fragment: &mut Element, ctx: &SiteContext) -> Result<Outcome, BlockError>;

    fn answers_to(&self, class: &str) -> bool {
        self.name().eq_ignore_ascii_case(class)
            || self.aliases().iter().any(|a| a.eq_ignore_ascii_case(class))
    }
}

/// Whether `fragment` already holds rendered output.
pub fn is_decorated(fragment: &Element) -> bool {
    fragment.attrs.get(STATUS_ATTR) == Some(STATUS_DECORATED)
}

fn mark_decorated(fragment: &mut Element, block: &str) {
    fragment.attrs.set(NAME_ATTR, block);
    fragment.attrs.set(STATUS_ATTR, STATUS_DECORATED);
}

// ============================================================================
// Registry
// ============================================================================

/// Blocks available to a host, looked up by name or alias.
pub struct Registry {
    blocks: Vec<&'static dyn Decorate>,
}

impl Registry {
    pub fn empty() -> Self {
        Self { blocks: Vec::new() }
    }

    /// The five built-in blocks.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(&activity::ACTIVITY);
        registry.register(&featured::FEATURED);
        registry.register(&licenses::LICENSES);
        registry.register(&about::ABOUT);
        registry.register(&tags::TAGS);
        registry
    }

    pub fn register(&mut self, block: &'static dyn Decorate) {
        self.blocks.push(block);
    }

    /// Find the block answering to `name` (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&'static dyn Decorate> {
        self.blocks.iter().copied().find(|b| b.answers_to(name))
    }

    /// Like [`find`](Self::find), as an error for unknown names.
    pub fn get(&self, name: &str) -> Result<&'static dyn Decorate, BlockError> {
        self.find(name)
            .ok_or_else(|| BlockError::Unknown(name.to_string()))
    }

    /// The block selected by a fragment's first class name.
    pub fn for_fragment(&self, fragment: &Element) -> Option<&'static dyn Decorate> {
        fragment.first_class().and_then(|class| self.find(class))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static dyn Decorate> + '_ {
        self.blocks.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    #[test]
    fn test_builtin_registry() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), 5);
        let names: Vec<_> = registry.iter().map(|b| b.name()).collect();
        assert_eq!(
            names,
            ["activity", "featured", "licenses-certifications", "about", "tags"]
        );
    }

    #[test]
    fn test_find_by_alias_case_insensitive() {
        let registry = Registry::builtin();
        assert_eq!(registry.find("import-activity").map(|b| b.name()), Some("activity"));
        assert_eq!(registry.find("About").map(|b| b.name()), Some("about"));
        assert_eq!(
            registry.find("import-linkedin-about").map(|b| b.name()),
            Some("about")
        );
        assert!(registry.find("carousel").is_none());
    }

    #[test]
    fn test_get_unknown() {
        let err = Registry::builtin().get("carousel").err().unwrap();
        assert_eq!(err, BlockError::Unknown("carousel".into()));
    }

    #[test]
    fn test_for_fragment_uses_first_class() {
        let registry = Registry::builtin();
        let nodes = parse_fragment(r#"<div class="tags block"></div><div class="block tags"></div>"#).unwrap();
        let first = nodes[0].as_element().unwrap();
        let second = nodes[1].as_element().unwrap();
        assert_eq!(registry.for_fragment(first).map(|b| b.name()), Some("tags"));
        assert!(registry.for_fragment(second).is_none());
    }

    #[test]
    fn test_every_builtin_has_descriptor() {
        for block in Registry::builtin().iter() {
            let descriptor = block.descriptor().unwrap();
            assert_eq!(descriptor.name, block.name());
            assert!(!descriptor.body.is_empty());
        }
    }
}
