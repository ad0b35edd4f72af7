//! `[build]` section configuration.
//!
//! ```toml
//! [build]
//! content = "content"   # Directory scanned for *.html pages (relative to site root)
//! output = "public"     # Decorated pages are written here, mirroring paths
//! strict = false        # Fail the build when any block fails
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Source pages directory.
    pub content: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Exit with an error when any block fragment fails.
    pub strict: bool,
}

pub struct BuildConfigFields {
    pub content: FieldPath,
    pub output: FieldPath,
    pub strict: FieldPath,
}

impl BuildConfig {
    pub const FIELDS: BuildConfigFields = BuildConfigFields {
        content: FieldPath::new("build.content"),
        output: FieldPath::new("build.output"),
        strict: FieldPath::new("build.strict"),
    };
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "public".into(),
            strict: false,
        }
    }
}

impl BuildConfig {
    /// Validate directories. Paths must already be normalized.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.error_with_hint(
                Self::FIELDS.content,
                format!("content directory not found: {}", self.content.display()),
                "create it or point `build.content` at your pages",
            );
        }

        if self.output == self.content {
            diag.error(
                Self::FIELDS.output,
                "output directory must differ from the content directory",
            );
        } else if self.content.starts_with(&self.output) {
            diag.error(
                Self::FIELDS.output,
                "output directory must not contain the content directory",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_build_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(!config.build.strict);
    }

    #[test]
    fn test_build_parse() {
        let config = test_parse_config("[build]\ncontent = \"pages\"\nstrict = true");
        assert_eq!(config.build.content, PathBuf::from("pages"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(config.build.strict);
    }

    #[test]
    fn test_validate_missing_content() {
        let dir = tempfile::tempdir().unwrap();
        let build = BuildConfig {
            content: dir.path().join("missing"),
            output: dir.path().join("public"),
            strict: false,
        };
        let mut diag = ConfigDiagnostics::new();
        build.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, BuildConfig::FIELDS.content);
    }

    #[test]
    fn test_validate_output_overlaps_content() {
        let dir = tempfile::tempdir().unwrap();
        let build = BuildConfig {
            content: dir.path().to_path_buf(),
            output: dir.path().to_path_buf(),
            strict: false,
        };
        let mut diag = ConfigDiagnostics::new();
        build.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, BuildConfig::FIELDS.output);

        let nested = BuildConfig {
            content: dir.path().join("site"),
            output: dir.path().to_path_buf(),
            strict: false,
        };
        std::fs::create_dir(&nested.content).unwrap();
        let mut diag = ConfigDiagnostics::new();
        nested.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
