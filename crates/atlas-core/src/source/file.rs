// crates/atlas-core/src/source/file.rs
#![cfg(feature = "json")]

use super::common_io;
use super::{countries_from_value, CountrySource};
use crate::error::{AtlasError, Result};
use crate::model::Country;
use crate::text::{contains_lowered, normalize_query};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Serves a dataset dump (`.json`, or `.json.gz` with `compact`) and answers
/// every by-field query locally.
///
/// Empty by-field results are reported as [`AtlasError::NotFound`], matching
/// the 404 the REST API returns for queries without matches.
#[derive(Debug, Clone)]
pub struct FileSource {
    origin: Option<PathBuf>,
    countries: Vec<Country>,
}

impl FileSource {
    /// Reads and decodes the dump at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path)?;
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        let countries = countries_from_value(value)?;
        info!(path = %path.display(), countries = countries.len(), "loaded dataset dump");
        Ok(Self {
            origin: Some(path.to_path_buf()),
            countries,
        })
    }

    /// An in-memory source over an already decoded collection.
    pub fn from_countries(countries: Vec<Country>) -> Self {
        Self {
            origin: None,
            countries,
        }
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Writes `countries` as a dump readable by [`FileSource::open`].
    pub fn save_as(path: impl AsRef<Path>, countries: &[Country]) -> Result<()> {
        common_io::write_dump(path.as_ref(), countries)
    }

    fn select(&self, what: &str, keep: impl Fn(&Country) -> bool) -> Result<Vec<Country>> {
        let out: Vec<Country> = self.countries.iter().filter(|c| keep(*c)).cloned().collect();
        if out.is_empty() {
            return Err(AtlasError::NotFound(what.to_string()));
        }
        Ok(out)
    }
}

fn native_names_contain(c: &Country, lowered: &str) -> bool {
    c.name
        .as_ref()
        .and_then(|n| n.native_name.as_ref())
        .is_some_and(|natives| {
            natives.values().any(|n| {
                n.common.as_deref().is_some_and(|s| contains_lowered(s, lowered))
                    || n.official.as_deref().is_some_and(|s| contains_lowered(s, lowered))
            })
        })
}

#[async_trait]
impl CountrySource for FileSource {
    async fn fetch_all(&self) -> Result<Vec<Country>> {
        Ok(self.countries.clone())
    }

    async fn fetch_by_language(&self, code: &str) -> Result<Vec<Country>> {
        let code = code.trim();
        self.select(&format!("language {code}"), |c| {
            c.languages()
                .any(|(k, name)| k.eq_ignore_ascii_case(code) || name.eq_ignore_ascii_case(code))
        })
    }

    async fn fetch_by_name(&self, query: &str) -> Result<Vec<Country>> {
        let Some(q) = normalize_query(query) else {
            return Err(AtlasError::InvalidInput("empty name query".into()));
        };
        self.select(&format!("name {query}"), |c| {
            contains_lowered(c.name(), &q)
                || contains_lowered(c.official_name(), &q)
                || native_names_contain(c, &q)
        })
    }

    async fn fetch_by_capital(&self, query: &str) -> Result<Vec<Country>> {
        let Some(q) = normalize_query(query) else {
            return Err(AtlasError::InvalidInput("empty capital query".into()));
        };
        self.select(&format!("capital {query}"), |c| {
            c.capitals().iter().any(|cap| contains_lowered(cap, &q))
        })
    }

    async fn fetch_by_currency(&self, code: &str) -> Result<Vec<Country>> {
        let code = code.trim();
        self.select(&format!("currency {code}"), |c| {
            c.has_currency(code)
                || c.currencies().any(|(_, cur)| {
                    cur.name
                        .as_deref()
                        .is_some_and(|n| n.eq_ignore_ascii_case(code))
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<Country> {
        serde_json::from_value(json!([
            { "cca3": "ESP", "name": { "common": "Spain", "official": "Kingdom of Spain",
                "nativeName": { "spa": { "common": "España", "official": "Reino de España" } } },
              "capital": ["Madrid"], "languages": { "spa": "Spanish" },
              "currencies": { "EUR": { "name": "Euro", "symbol": "€" } } },
            { "cca3": "FRA", "name": { "common": "France" }, "capital": ["Paris"],
              "languages": { "fra": "French" },
              "currencies": { "EUR": { "name": "Euro", "symbol": "€" } } }
        ]))
        .unwrap()
    }

    #[tokio::test]
    async fn by_field_queries_match_locally() {
        let src = FileSource::from_countries(sample());
        assert_eq!(src.fetch_all().await.unwrap().len(), 2);
        assert_eq!(src.fetch_by_language("SPA").await.unwrap()[0].code(), "ESP");
        assert_eq!(src.fetch_by_language("french").await.unwrap()[0].code(), "FRA");
        assert_eq!(src.fetch_by_name("espa").await.unwrap()[0].code(), "ESP");
        assert_eq!(src.fetch_by_capital("par").await.unwrap()[0].code(), "FRA");
        assert_eq!(src.fetch_by_currency("eur").await.unwrap().len(), 2);
        assert_eq!(src.fetch_by_currency("Euro").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn no_match_is_not_found() {
        let src = FileSource::from_countries(sample());
        let err = src.fetch_by_name("Wakanda").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(
            src.fetch_by_capital("  ").await,
            Err(AtlasError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn dump_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["countries.json", "countries.json.gz"] {
            let path = dir.path().join(name);
            FileSource::save_as(&path, &sample()).unwrap();
            let src = FileSource::open(&path).unwrap();
            assert_eq!(src.origin(), Some(path.as_path()));
            assert_eq!(src.countries(), sample().as_slice());
        }
    }

    #[test]
    fn missing_dump_is_not_found() {
        let err = FileSource::open("/definitely/not/here.json").unwrap_err();
        assert!(err.is_not_found());
    }
}
