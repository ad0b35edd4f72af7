//! Block transform errors.

use std::fmt;
use thiserror::Error;

use super::schema::Source;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// Required content absent; the fragment was left untouched.
    #[error("block `{block}` is missing required content: {missing}")]
    MissingFields {
        block: &'static str,
        missing: MissingFields,
    },

    /// The fragment already holds rendered output.
    #[error("block `{block}` is already decorated, pass the authored fragment instead")]
    AlreadyDecorated { block: &'static str },

    #[error("unknown block `{0}`")]
    Unknown(String),
}

/// One required field the fragment did not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField {
    pub field: &'static str,
    pub source: Source,
    /// Row index for fields read inside a row list.
    pub row: Option<usize>,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(row) = self.row {
            write!(f, "row {row} ")?;
        }
        write!(f, "`{}` ({})", self.field, self.source)
    }
}

/// Every missing field of one extraction, reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingFields(pub Vec<MissingField>);

impl MissingFields {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> {
        self.0.iter().map(|m| m.field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, missing) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{missing}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_display() {
        let err = BlockError::MissingFields {
            block: "activity",
            missing: MissingFields(vec![
                MissingField {
                    field: "meta",
                    source: Source::Child(&[1]),
                    row: None,
                },
                MissingField {
                    field: "content",
                    source: Source::Child(&[2]),
                    row: None,
                },
            ]),
        };
        assert_eq!(
            err.to_string(),
            "block `activity` is missing required content: `meta` (child 1), `content` (child 2)"
        );
    }

    #[test]
    fn test_missing_field_in_row() {
        let missing = MissingField {
            field: "title",
            source: Source::Child(&[0, 1]),
            row: Some(3),
        };
        assert_eq!(missing.to_string(), "row 3 `title` (child 0 > 1)");
    }
}
