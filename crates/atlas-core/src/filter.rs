// crates/atlas-core/src/filter.rs

//! # Filter Stages
//!
//! Pure, total predicates applied by the orchestrator in a fixed order:
//! region, then language, then free text. Each stage works on the output of
//! the previous one (the *working set*). A record that lacks the field a
//! stage inspects is simply excluded by that stage.

use crate::facets::LanguageFacet;
use crate::model::Country;
use crate::text::{contains_lowered, non_blank, normalize_query};
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};

/// The three user-controlled filter fields.
///
/// Empty or whitespace-only values mean "not selected".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_query: String,
    pub region: Option<String>,
    pub language: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        self.search_query = q.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }

    /// The raw search text, if it has any non-whitespace content.
    pub fn search(&self) -> Option<&str> {
        non_blank(Some(self.search_query.as_str()))
    }

    pub fn region(&self) -> Option<&str> {
        non_blank(self.region.as_deref())
    }

    pub fn language(&self) -> Option<&str> {
        non_blank(self.language.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of criteria currently set.
    pub fn active_count(&self) -> usize {
        [
            self.search().is_some(),
            self.region().is_some(),
            self.language().is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// The remote fallback only fires for search text or a language, never
    /// for a region alone.
    pub fn allows_remote_fallback(&self) -> bool {
        self.search().is_some() || self.language().is_some()
    }
}

/// How a free-text query is interpreted against the dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextQuery<'a> {
    /// The query is part of a known language's display name.
    Language(&'a LanguageFacet),
    /// Plain substring search over name, official name, capitals and code.
    Fields(String),
}

/// Decide how a normalized (trimmed, lowercased) query is applied.
///
/// A match against a language display name wins over field search; the
/// first facet in facet order is used.
pub fn resolve_text_query<'a>(lowered: &str, languages: &'a [LanguageFacet]) -> TextQuery<'a> {
    match languages.iter().find(|lang| lang.name_contains(lowered)) {
        Some(lang) => TextQuery::Language(lang),
        None => TextQuery::Fields(lowered.to_owned()),
    }
}

/// Region stage: exact, case-sensitive equality.
pub fn in_region(country: &Country, region: &str) -> bool {
    country.region.as_deref() == Some(region)
}

/// Language stage: the code must be a key of the language mapping.
pub fn speaks(country: &Country, code: &str) -> bool {
    country.has_language(code)
}

/// Field search: any of common name, official name, a capital, or cca3
/// containing the lowered query.
pub fn matches_text(country: &Country, lowered: &str) -> bool {
    let name = country.name.as_ref();
    let common = name.and_then(|n| n.common.as_deref());
    let official = name.and_then(|n| n.official.as_deref());

    common.is_some_and(|s| contains_lowered(s, lowered))
        || official.is_some_and(|s| contains_lowered(s, lowered))
        || country
            .capitals()
            .iter()
            .any(|cap| contains_lowered(cap, lowered))
        || country
            .cca3
            .as_deref()
            .is_some_and(|s| contains_lowered(s, lowered))
}

pub fn retain_region(working: &mut Vec<Country>, region: &str) {
    working.retain(|c| in_region(c, region));
}

pub fn retain_language(working: &mut Vec<Country>, code: &str) {
    working.retain(|c| speaks(c, code));
}

/// Text stage. `languages` is the precomputed language facet.
pub fn retain_text(working: &mut Vec<Country>, query: &str, languages: &[LanguageFacet]) {
    let Some(lowered) = normalize_query(query) else {
        return;
    };
    match resolve_text_query(&lowered, languages) {
        TextQuery::Language(lang) => working.retain(|c| speaks(c, &lang.code)),
        TextQuery::Fields(q) => working.retain(|c| matches_text(c, &q)),
    }
}

/// Runs the region, language and text stages over the full dataset.
///
/// The language and text stages are skipped once the working set is empty.
pub fn filter_local(
    countries: &[Country],
    languages: &[LanguageFacet],
    criteria: &FilterCriteria,
) -> Vec<Country> {
    let mut working = countries.to_vec();

    if let Some(region) = criteria.region() {
        retain_region(&mut working, region);
    }
    if let Some(code) = criteria.language() {
        if !working.is_empty() {
            retain_language(&mut working, code);
        }
    }
    if let Some(query) = criteria.search() {
        if !working.is_empty() {
            retain_text(&mut working, query, languages);
        }
    }
    working
}

/// Narrows records returned by a remote fallback query.
///
/// The region predicate is always re-applied. When the fallback went to the
/// language endpoint, a search text additionally narrows by common or
/// official name.
pub fn narrow_fallback(mut results: Vec<Country>, criteria: &FilterCriteria) -> Vec<Country> {
    if let Some(region) = criteria.region() {
        retain_region(&mut results, region);
    }
    if criteria.language().is_some() {
        if let Some(lowered) = criteria.search().and_then(normalize_query) {
            results.retain(|c| {
                c.name_contains(&lowered) || contains_lowered(c.official_name(), &lowered)
            });
        }
    }
    results
}
