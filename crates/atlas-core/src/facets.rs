// crates/atlas-core/src/facets.rs

//! Derived indexes over the full dataset, used to populate the region and
//! language selectors. Both are rebuilt together on every successful
//! dataset load and never patched in place.

use crate::model::Country;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// One selectable language: its code (e.g. `spa`) and display name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageFacet {
    pub code: String,
    pub name: String,
}

/// Region and language facets of one dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub regions: Vec<String>,
    pub languages: Vec<LanguageFacet>,
}

impl Facets {
    pub fn from_countries(countries: &[Country]) -> Self {
        Self {
            regions: derive_regions(countries),
            languages: derive_languages(countries),
        }
    }
}

/// Distinct non-empty regions, sorted lexicographically.
pub fn derive_regions(countries: &[Country]) -> Vec<String> {
    countries
        .iter()
        .map(Country::region)
        .filter(|r| !r.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Every language code seen in the dataset, keeping the first-seen display
/// name per code, sorted by display name (case-insensitive, then code).
pub fn derive_languages(countries: &[Country]) -> Vec<LanguageFacet> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for country in countries {
        for (code, name) in country.languages() {
            seen.entry(code).or_insert(name);
        }
    }

    let mut out: Vec<LanguageFacet> = seen
        .into_iter()
        .map(|(code, name)| LanguageFacet {
            code: code.to_owned(),
            name: name.to_owned(),
        })
        .collect();
    out.sort_by(compare_language);
    out
}

fn compare_language(a: &LanguageFacet, b: &LanguageFacet) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.code.cmp(&b.code))
}
