//! `[metadata]` section: site-wide defaults for the site context.
//!
//! ```toml
//! [metadata]
//! content-technology = "Rust"
//! category = "Engineering"
//! ```
//!
//! Page `<meta>` tags override these per page.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::block::{RECOGNIZED_KEYS, SiteContext, context::normalize_key};
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataConfig(pub FxHashMap<String, String>);

impl MetadataConfig {
    pub const FIELD: FieldPath = FieldPath::new("metadata");

    pub fn context(&self) -> SiteContext {
        self.0.iter().collect()
    }

    /// Warn about keys no block reads, in key order.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let mut unused: Vec<_> = self
            .0
            .keys()
            .filter(|key| !RECOGNIZED_KEYS.contains(&normalize_key(key).as_str()))
            .collect();
        unused.sort();

        for key in unused {
            diag.warn(
                Self::FIELD,
                format!("key `{key}` is not read by any block"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_metadata_context_normalizes_keys() {
        let config = test_parse_config(
            "[metadata]\n\"Content Technology\" = \"Rust\"\ncategory = \"Engineering\"",
        );
        let ctx = config.metadata.context();
        assert_eq!(ctx.get("content-technology"), Some("Rust"));
        assert_eq!(ctx.get("category"), Some("Engineering"));
    }

    #[test]
    fn test_unread_keys_warn() {
        let config = test_parse_config(
            "[metadata]\ncontent_technology = \"Rust\"\nauthor = \"Ada\"\nbadge = \"new\"",
        );
        let mut diag = ConfigDiagnostics::new();
        config.metadata.validate(&mut diag);

        assert!(!diag.has_errors());
        let messages: Vec<_> = diag.warnings().iter().map(|w| w.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "key `author` is not read by any block",
                "key `badge` is not read by any block",
            ]
        );
    }
}
