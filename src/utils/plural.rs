//! Pluralization for log and report lines.

/// `"s"` unless `n` is exactly one.
///
/// - `plural_s(0)` -> `"s"` (0 images)
/// - `plural_s(1)` -> `""` (1 image)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `"3 projects"`, `"1 project"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "post"), "0 posts");
        assert_eq!(plural_count(1, "asset folder"), "1 asset folder");
        assert_eq!(plural_count(7, "image"), "7 images");
    }
}
