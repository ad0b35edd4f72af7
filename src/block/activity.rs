//! Activity card: follower count and the latest post.

use super::descriptor::{Descriptor, EmptyOutput};
use super::schema::{Field, Presence, Source};
use super::template::Template;

pub static ACTIVITY: Descriptor = Descriptor {
    name: "activity",
    aliases: &["import-activity"],
    summary: "Follower count with the latest post's meta line and content",
    fields: &[
        Field::Text {
            name: "followers",
            source: Source::Child(&[0]),
            presence: Presence::Required,
        },
        Field::Text {
            name: "meta",
            source: Source::Child(&[1]),
            presence: Presence::Required,
        },
        Field::Text {
            name: "content",
            source: Source::Child(&[2]),
            presence: Presence::Required,
        },
    ],
    body: &[Template::Group {
        tag: "div",
        class: Some("section-card activity-section"),
        children: &[
            Template::Literal {
                tag: "h2",
                class: None,
                text: "Activity",
            },
            Template::Slot {
                tag: "p",
                class: Some("followers"),
                field: "followers",
            },
            Template::Group {
                tag: "div",
                class: Some("activity-post"),
                children: &[
                    Template::Slot {
                        tag: "p",
                        class: Some("post-meta"),
                        field: "meta",
                    },
                    Template::Slot {
                        tag: "p",
                        class: Some("post-content"),
                        field: "content",
                    },
                ],
            },
        ],
    }],
    on_empty: EmptyOutput::Clear,
};
