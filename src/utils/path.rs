//! Filesystem path helpers.

use std::path::{Path, PathBuf};

/// Normalize a path to absolute form.
///
/// Tries `canonicalize()` first, then joins relative paths onto the
/// current directory so paths that do not exist yet still resolve.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Whether a file is an HTML page the build should decorate.
#[inline]
pub fn is_html_page(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}
