//! `cardwright blocks`: list registered blocks and what they read.

use std::fmt::Write as _;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::block::{
    Descriptor, Registry,
    schema::{Field, Presence},
};

pub fn list_blocks(json: bool) -> Result<()> {
    let registry = Registry::builtin();
    let descriptors: Vec<&Descriptor> = registry.iter().filter_map(|b| b.descriptor()).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
        return Ok(());
    }

    for descriptor in descriptors {
        let mut header = descriptor.name.bold().to_string();
        if !descriptor.aliases.is_empty() {
            write!(header, " {}", format!("({})", descriptor.aliases.join(", ")).dimmed())?;
        }
        println!("{header}");
        println!("  {}", descriptor.summary);
        println!("  reads: {}", describe_fields(descriptor.fields));
    }
    Ok(())
}

/// One-line description of a schema.
fn describe_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| match field {
            Field::Text {
                name,
                source,
                presence,
            } => format!("{name} ({source}, {})", describe_presence(presence)),
            Field::Rows { name, fields } => {
                format!("{name}: one per child [{}]", describe_fields(fields))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_presence(presence: &Presence) -> String {
    match presence {
        Presence::Required => "required".to_string(),
        Presence::Fallback(label) => format!("default \"{label}\""),
        Presence::Omit => "optional".to_string(),
    }
}
