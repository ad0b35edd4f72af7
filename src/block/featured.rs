//! Featured item: title and summary from the first row, description from the second.

use super::descriptor::{Descriptor, EmptyOutput};
use super::schema::{Field, Presence, Source};
use super::template::Template;

pub static FEATURED: Descriptor = Descriptor {
    name: "featured",
    aliases: &["import-featured"],
    summary: "One highlighted item with title, summary and description",
    fields: &[
        Field::Text {
            name: "title",
            source: Source::Child(&[0, 0]),
            presence: Presence::Required,
        },
        Field::Text {
            name: "summary",
            source: Source::Child(&[0, 1]),
            presence: Presence::Required,
        },
        Field::Text {
            name: "description",
            source: Source::Child(&[1]),
            presence: Presence::Required,
        },
    ],
    body: &[Template::Group {
        tag: "div",
        class: Some("section-card featured-section"),
        children: &[
            Template::Literal {
                tag: "h2",
                class: None,
                text: "Featured",
            },
            Template::Group {
                tag: "div",
                class: Some("featured-item"),
                children: &[
                    Template::Slot {
                        tag: "h3",
                        class: None,
                        field: "title",
                    },
                    Template::Slot {
                        tag: "p",
                        class: None,
                        field: "summary",
                    },
                    Template::Slot {
                        tag: "p",
                        class: None,
                        field: "description",
                    },
                ],
            },
        ],
    }],
    on_empty: EmptyOutput::Clear,
};
