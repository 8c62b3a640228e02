// crates/atlas-core/src/model.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Placeholder shown by the detail helpers when a mapping is absent.
pub const NOT_AVAILABLE: &str = "Not available";

/// Native spelling of a country name in one language.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common: Option<String>,
}

/// The `name` block of a country record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official: Option<String>,
    #[serde(rename = "nativeName", skip_serializing_if = "Option::is_none")]
    pub native_name: Option<BTreeMap<String, NativeName>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currency {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Maps {
    #[serde(rename = "googleMaps", skip_serializing_if = "Option::is_none")]
    pub google_maps: Option<String>,
    #[serde(rename = "openStreetMaps", skip_serializing_if = "Option::is_none")]
    pub open_street_maps: Option<String>,
}

/// A country record as served by the remote source.
///
/// The record is read-only to the store. Every field may be absent, so
/// callers go through the accessors below, which return `""`, `None` or an
/// empty slice instead of assuming presence. Fields the model does not name
/// are kept in `extra` and serialized back unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<CountryName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cca2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cca3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccn3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// Language code (e.g. `spa`) to display name (e.g. `Spanish`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currencies: Option<BTreeMap<String, Currency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps: Option<Maps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezones: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Country {
    /// Common name, or `""` when the record has none.
    pub fn name(&self) -> &str {
        self.name
            .as_ref()
            .and_then(|n| n.common.as_deref())
            .unwrap_or("")
    }

    pub fn official_name(&self) -> &str {
        self.name
            .as_ref()
            .and_then(|n| n.official.as_deref())
            .unwrap_or("")
    }

    /// The unique 3-letter code (`cca3`).
    pub fn code(&self) -> &str {
        self.cca3.as_deref().unwrap_or("")
    }

    pub fn iso2(&self) -> &str {
        self.cca2.as_deref().unwrap_or("")
    }

    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or("")
    }

    pub fn subregion(&self) -> &str {
        self.subregion.as_deref().unwrap_or("")
    }

    /// All capital cities; some countries list more than one.
    pub fn capitals(&self) -> &[String] {
        self.capital.as_deref().unwrap_or(&[])
    }

    /// First listed capital.
    pub fn capital(&self) -> Option<&str> {
        self.capitals().first().map(String::as_str)
    }

    pub fn population(&self) -> Option<u64> {
        self.population
    }

    pub fn area(&self) -> Option<f64> {
        self.area
    }

    pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.languages
            .iter()
            .flatten()
            .map(|(code, name)| (code.as_str(), name.as_str()))
    }

    /// Key membership test on the language mapping.
    pub fn has_language(&self, code: &str) -> bool {
        self.languages
            .as_ref()
            .is_some_and(|langs| langs.contains_key(code))
    }

    pub fn currencies(&self) -> impl Iterator<Item = (&str, &Currency)> {
        self.currencies
            .iter()
            .flatten()
            .map(|(code, cur)| (code.as_str(), cur))
    }

    pub fn has_currency(&self, code: &str) -> bool {
        self.currencies
            .as_ref()
            .is_some_and(|c| c.keys().any(|k| k.eq_ignore_ascii_case(code)))
    }

    pub fn borders(&self) -> &[String] {
        self.borders.as_deref().unwrap_or(&[])
    }

    pub fn timezones(&self) -> &[String] {
        self.timezones.as_deref().unwrap_or(&[])
    }

    pub fn flag_png(&self) -> Option<&str> {
        self.flags.as_ref().and_then(|f| f.png.as_deref())
    }

    /// Language names joined by `", "`, or [`NOT_AVAILABLE`].
    pub fn languages_display(&self) -> String {
        match &self.languages {
            Some(langs) => langs.values().cloned().collect::<Vec<_>>().join(", "),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// `"Euro (€)"` style list, `N/A` standing in for a missing symbol.
    pub fn currencies_display(&self) -> String {
        match &self.currencies {
            Some(curs) => curs
                .values()
                .map(|c| {
                    format!(
                        "{} ({})",
                        c.name.as_deref().unwrap_or(""),
                        c.symbol.as_deref().unwrap_or("N/A")
                    )
                })
                .collect::<Vec<_>>()
                .join(", "),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Population with `,` thousands separators, or `N/A`.
    pub fn population_display(&self) -> String {
        match self.population {
            Some(p) => group_thousands(p),
            None => "N/A".to_string(),
        }
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Find a country by `cca2` or `cca3`, case-insensitive (e.g. "de", "DEU").
pub fn find_country_by_code<'a>(countries: &'a [Country], code: &str) -> Option<&'a Country> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    countries
        .iter()
        .find(|c| c.iso2().eq_ignore_ascii_case(code))
        .or_else(|| {
            countries
                .iter()
                .find(|c| c.code().eq_ignore_ascii_case(code))
        })
}
