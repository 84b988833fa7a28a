//! Plural suffix helpers for log and report lines.

/// "s" suffix for a count, empty for exactly one.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format a count with its noun: `plural_count(3, "asset")` -> `"3 assets"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
