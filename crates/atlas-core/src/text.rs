// crates/atlas-core/src/text.rs

//! Text normalization shared by the filter stages and the file source.

/// Normalizes a user query for matching: trims and lowercases.
///
/// Returns `None` when nothing is left after trimming, which the filter
/// treats as "no search text".
///
/// # Examples
///
/// ```rust
/// use atlas_core::text::normalize_query;
///
/// assert_eq!(normalize_query("  SPAN "), Some("span".to_string()));
/// assert_eq!(normalize_query("   "), None);
/// ```
pub fn normalize_query(q: &str) -> Option<String> {
    let q = q.trim();
    if q.is_empty() {
        None
    } else {
        Some(q.to_lowercase())
    }
}

/// Case-insensitive substring test. `needle` must already be lowercased.
#[inline]
pub fn contains_lowered(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Treats empty and whitespace-only selections as "not selected".
pub fn non_blank(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_case_insensitive_on_haystack() {
        assert!(contains_lowered("Kingdom of Spain", "spain"));
        assert!(!contains_lowered("France", "spain"));
    }

    #[test]
    fn blank_selection_is_none() {
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some("Europe")), Some("Europe"));
        assert_eq!(non_blank(None), None);
    }
}
