//! Tag labels from the site context.
//!
//! The fragment's own content is ignored. With neither key set the fragment
//! stays exactly as authored.

use super::descriptor::{Descriptor, EmptyOutput};
use super::schema::{Field, Presence, Source};
use super::template::Template;

pub const CONTENT_TECHNOLOGY: &str = "content-technology";
pub const CATEGORY: &str = "category";

/// Context keys read by the built-in blocks.
pub const RECOGNIZED_KEYS: &[&str] = &[CONTENT_TECHNOLOGY, CATEGORY];

pub static TAGS: Descriptor = Descriptor {
    name: "tags",
    aliases: &[],
    summary: "Technology and category labels from page metadata",
    fields: &[
        Field::Text {
            name: "technology",
            source: Source::Meta(CONTENT_TECHNOLOGY),
            presence: Presence::Omit,
        },
        Field::Text {
            name: "category",
            source: Source::Meta(CATEGORY),
            presence: Presence::Omit,
        },
    ],
    body: &[
        Template::Slot {
            tag: "span",
            class: Some("card-tag"),
            field: "technology",
        },
        Template::Slot {
            tag: "span",
            class: Some("card-tag alt"),
            field: "category",
        },
    ],
    on_empty: EmptyOutput::LeaveUntouched,
};
