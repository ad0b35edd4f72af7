//! Shared helpers with no knowledge of blocks or pages.

pub mod html;
pub mod path;

/// Format count with noun, handling pluralization
///
/// - `plural_count(0, "block")` -> `"0 blocks"`
/// - `plural_count(1, "block")` -> `"1 block"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "page"), "0 pages");
        assert_eq!(plural_count(1, "page"), "1 page");
        assert_eq!(plural_count(7, "block"), "7 blocks");
    }
}
