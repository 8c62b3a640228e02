// crates/atlas-core/src/source/http.rs
#![cfg(feature = "http")]

use super::{decode_countries, CountrySource};
use crate::config::SourceConfig;
use crate::error::{AtlasError, Result};
use crate::model::Country;
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

/// Async client for a restcountries v3.1 compatible API.
///
/// Every non-success status is a hard failure ([`AtlasError::Status`]).
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    client: Client,
    base: Url,
    config: SourceConfig,
}

impl RestCountriesClient {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            AtlasError::InvalidInput(format!("invalid base URL {}: {e}", config.base_url))
        })?;
        if base.cannot_be_a_base() {
            return Err(AtlasError::InvalidInput(format!(
                "base URL {} cannot carry a path",
                config.base_url
            )));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base,
            config,
        })
    }

    /// Client for the public endpoint with default settings.
    pub fn public() -> Result<Self> {
        Self::new(SourceConfig::default())
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Joins percent-encoded `segments` onto the base path.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_countries(&self, segments: &[&str]) -> Result<Vec<Country>> {
        let url = self.endpoint(segments);
        debug!(%url, "fetching countries");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AtlasError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let countries = decode_countries(&body)?;
        debug!(%url, count = countries.len(), "fetched countries");
        Ok(countries)
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn fetch_all(&self) -> Result<Vec<Country>> {
        self.get_countries(&["all"]).await
    }

    async fn fetch_by_language(&self, code: &str) -> Result<Vec<Country>> {
        self.get_countries(&["lang", code]).await
    }

    async fn fetch_by_name(&self, query: &str) -> Result<Vec<Country>> {
        self.get_countries(&["name", query]).await
    }

    async fn fetch_by_capital(&self, query: &str) -> Result<Vec<Country>> {
        self.get_countries(&["capital", query]).await
    }

    async fn fetch_by_currency(&self, code: &str) -> Result<Vec<Country>> {
        self.get_countries(&["currency", code]).await
    }
}
