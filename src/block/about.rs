//! About section.

use super::descriptor::{Descriptor, EmptyOutput};
use super::schema::{Field, Presence, Source};
use super::template::Template;

pub static ABOUT: Descriptor = Descriptor {
    name: "about",
    aliases: &["import-about", "import-linkedin-about"],
    summary: "Heading and the summary paragraph from the first row",
    fields: &[Field::Text {
        name: "summary",
        source: Source::Child(&[0]),
        presence: Presence::Required,
    }],
    body: &[Template::Group {
        tag: "section",
        class: Some("about-section"),
        children: &[
            Template::Literal {
                tag: "h2",
                class: None,
                text: "About",
            },
            Template::Slot {
                tag: "p",
                class: None,
                field: "summary",
            },
        ],
    }],
    on_empty: EmptyOutput::Clear,
};
