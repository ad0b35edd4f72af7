//! Configuration section definitions.
//!
//! | Module     | TOML Section  | Purpose                             |
//! |------------|---------------|-------------------------------------|
//! | `build`    | `[build]`     | Content and output directories      |
//! | `metadata` | `[metadata]`  | Site-wide defaults for block labels |

mod build;
mod metadata;

pub use build::BuildConfig;
pub use metadata::MetadataConfig;
