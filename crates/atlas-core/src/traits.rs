// crates/atlas-core/src/traits.rs
use crate::facets::LanguageFacet;
use crate::model::Country;
use crate::text::contains_lowered;

/// Name-based matching helpers for types that expose a canonical display name.
///
/// Implementors provide a `&str` view of their canonical name via
/// [`NameMatch::name_str`], and get [`NameMatch::name_contains`], a
/// case-insensitive substring match.
///
/// # Examples
/// ```rust
/// use atlas_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Spanish").name_contains("span"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Case-insensitive substring match. An empty name never matches.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        let name = self.name_str();
        !name.is_empty() && contains_lowered(name, &q.to_lowercase())
    }
}

impl NameMatch for LanguageFacet {
    fn name_str(&self) -> &str {
        &self.name
    }
}

impl NameMatch for Country {
    fn name_str(&self) -> &str {
        self.name()
    }
}
