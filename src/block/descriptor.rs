//! The generic block renderer.
//!
//! Every built-in block is a [`Descriptor`]: a schema, a template and an
//! empty-output policy. Decoration is the same for all of them: reject
//! rendered fragments, extract the record, render, install.

use serde::Serialize;

use super::context::SiteContext;
use super::error::BlockError;
use super::schema::{self, Field};
use super::template::{self, Template};
use super::{Decorate, Outcome, is_decorated, mark_decorated};
use crate::dom::{Element, Node};

/// What to do when the template renders nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyOutput {
    /// Clear the fragment anyway.
    Clear,
    /// Leave the fragment exactly as authored.
    LeaveUntouched,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Descriptor {
    pub name: &'static str,
    /// Class names that also select this block (`import-activity`, ...).
    pub aliases: &'static [&'static str],
    pub summary: &'static str,
    pub fields: &'static [Field],
    pub body: &'static [Template],
    pub on_empty: EmptyOutput,
}

impl Decorate for Descriptor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    fn descriptor(&self) -> Option<&Descriptor> {
        Some(self)
    }

    fn decorate(&self, fragment: &mut Element, ctx: &SiteContext) -> Result<Outcome, BlockError> {
        if is_decorated(fragment) {
            return Err(BlockError::AlreadyDecorated { block: self.name });
        }

        let record = schema::extract(self.name, self.fields, fragment, ctx)?;
        let rendered = template::render_all(self.body, &record);

        if rendered.is_empty() && self.on_empty == EmptyOutput::LeaveUntouched {
            // TODO: decide whether an empty render should clear authored
            // fallback markup like every other block does.
            return Ok(Outcome::Untouched);
        }

        let nodes = rendered.len();
        fragment.replace_children(rendered.into_iter().map(Node::from));
        mark_decorated(fragment, self.name);

        Ok(Outcome::Decorated { nodes })
    }
}
