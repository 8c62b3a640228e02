// crates/atlas-core/src/source/mod.rs

//! # Country Sources
//!
//! The read-only providers the orchestrator pulls records from. A source is
//! never mutated; it answers fetch-all and fetch-by-field queries.
//!
//! - [`RestCountriesClient`] (feature `http`): the live REST API.
//! - [`FileSource`] (feature `json`): a dataset dump on disk, answering the
//!   by-field queries locally.

use crate::error::{AtlasError, Result};
use crate::model::Country;
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

#[cfg(feature = "json")]
mod common_io;
#[cfg(feature = "json")]
mod file;
#[cfg(feature = "http")]
mod http;

#[cfg(feature = "json")]
pub use file::FileSource;
#[cfg(feature = "http")]
pub use http::RestCountriesClient;

/// Read-only provider of country collections.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// `GET /all`
    async fn fetch_all(&self) -> Result<Vec<Country>>;

    /// `GET /lang/{code}`: countries whose languages include `code`.
    async fn fetch_by_language(&self, code: &str) -> Result<Vec<Country>>;

    /// `GET /name/{query}`: countries whose name matches `query`.
    async fn fetch_by_name(&self, query: &str) -> Result<Vec<Country>>;

    /// `GET /capital/{query}`
    async fn fetch_by_capital(&self, query: &str) -> Result<Vec<Country>>;

    /// `GET /currency/{code}`
    async fn fetch_by_currency(&self, code: &str) -> Result<Vec<Country>>;
}

#[async_trait]
impl<S: CountrySource + ?Sized> CountrySource for std::sync::Arc<S> {
    async fn fetch_all(&self) -> Result<Vec<Country>> {
        (**self).fetch_all().await
    }

    async fn fetch_by_language(&self, code: &str) -> Result<Vec<Country>> {
        (**self).fetch_by_language(code).await
    }

    async fn fetch_by_name(&self, query: &str) -> Result<Vec<Country>> {
        (**self).fetch_by_name(query).await
    }

    async fn fetch_by_capital(&self, query: &str) -> Result<Vec<Country>> {
        (**self).fetch_by_capital(query).await
    }

    async fn fetch_by_currency(&self, code: &str) -> Result<Vec<Country>> {
        (**self).fetch_by_currency(code).await
    }
}

/// Decodes a country collection leniently.
///
/// `null` is an empty collection, anything other than an array is
/// [`AtlasError::InvalidData`], and array elements that do not decode as a
/// country are skipped.
pub fn decode_countries(bytes: &[u8]) -> Result<Vec<Country>> {
    let value: Value = serde_json::from_slice(bytes)?;
    countries_from_value(value)
}

pub(crate) fn countries_from_value(value: Value) -> Result<Vec<Country>> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => {
            return Err(AtlasError::InvalidData(format!(
                "expected an array of countries, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = items.len();
    let countries: Vec<Country> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<Country>(item) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!(index = i, error = %e, "skipping malformed country record");
                None
            }
        })
        .collect();

    if countries.len() < total {
        warn!(
            kept = countries.len(),
            skipped = total - countries.len(),
            "dataset contained malformed records"
        );
    }
    Ok(countries)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_empty() {
        assert!(decode_countries(b"null").unwrap().is_empty());
    }

    #[test]
    fn object_is_invalid() {
        let err = decode_countries(br#"{"status":404,"message":"Not Found"}"#).unwrap_err();
        assert!(matches!(err, AtlasError::InvalidData(_)));
    }

    #[test]
    fn malformed_records_are_skipped() {
        let body = br#"[
            {"cca3":"ESP","name":{"common":"Spain"}},
            {"cca3":"BAD","name":42},
            "not a country",
            {"cca3":"FRA"}
        ]"#;
        let out = decode_countries(body).unwrap();
        let codes: Vec<&str> = out.iter().map(Country::code).collect();
        assert_eq!(codes, vec!["ESP", "FRA"]);
    }

    #[test]
    fn broken_json_is_an_error() {
        assert!(matches!(
            decode_countries(b"[{"),
            Err(AtlasError::Json(_))
        ));
    }
}
