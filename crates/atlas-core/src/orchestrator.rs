// crates/atlas-core/src/orchestrator.rs

//! # Filter Orchestrator
//!
//! Drives a [`CountryStore`] against a [`CountrySource`]: loads the dataset,
//! runs the filter stages, double-checks empty results against the remote
//! source, and commits the outcome.
//!
//! The only suspension points are the source calls. Every run ends with
//! `loading == false`, whichever path it takes.

use crate::error::{AtlasError, Result};
use crate::filter::{filter_local, narrow_fallback, FilterCriteria};
use crate::model::{find_country_by_code, Country};
use crate::source::CountrySource;
use crate::store::{CountryAction, CountryStore, FilterTicket};
use tracing::{debug, error, info, warn};

/// Where a committed filter result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrigin {
    /// Local stages over the cached dataset.
    Local,
    /// The remote fallback query.
    Remote,
    /// The fallback query failed; the (empty) local result was kept.
    RemoteFailed,
    /// No dataset could be loaded.
    NoDataset,
}

/// What one orchestrator run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterReport {
    pub ticket: FilterTicket,
    pub origin: ResultOrigin,
    pub matched: usize,
    /// `false` when a newer run (or a reset) superseded this one and its
    /// result was dropped.
    pub committed: bool,
}

/// The store plus the source it is filled from.
pub struct Explorer<S> {
    store: CountryStore,
    source: S,
}

impl<S: CountrySource> Explorer<S> {
    pub fn new(store: CountryStore, source: S) -> Self {
        Self { store, source }
    }

    pub fn store(&self) -> &CountryStore {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads the full dataset into the store.
    ///
    /// Returns the records on success. On failure the message lands in the
    /// store's `error` and the previous dataset stays in place.
    pub async fn fetch_all_countries(&self) -> Option<Vec<Country>> {
        self.store.dispatch(CountryAction::LoadStarted).await;
        match self.source.fetch_all().await {
            Ok(countries) => {
                info!(count = countries.len(), "dataset loaded");
                self.store
                    .dispatch(CountryAction::DatasetLoaded(countries.clone()))
                    .await;
                Some(countries)
            }
            Err(e) => {
                error!(error = %e, "failed to fetch countries");
                self.store
                    .dispatch(CountryAction::LoadFailed(load_error_message(&e)))
                    .await;
                None
            }
        }
    }

    /// Runs the filter with the criteria currently held in the store.
    pub async fn refilter(&self) -> FilterReport {
        let criteria = self.store.criteria().await;
        self.apply_filters(criteria).await
    }

    /// Filters the dataset by `criteria` and commits the result.
    pub async fn apply_filters(&self, criteria: FilterCriteria) -> FilterReport {
        let ticket = self.store.begin_filter().await;

        if !self.store.read(|s| s.has_dataset()).await {
            self.load_for_run(ticket).await;
            if !self.store.read(|s| s.has_dataset()).await {
                let committed = self.store.commit_filtered(ticket, Vec::new()).await;
                return FilterReport {
                    ticket,
                    origin: ResultOrigin::NoDataset,
                    matched: 0,
                    committed,
                };
            }
        }

        let mut working = self
            .store
            .read(|s| filter_local(&s.countries, &s.languages, &criteria))
            .await;
        debug!(
            ticket = ticket.sequence(),
            matched = working.len(),
            "local filter stages done"
        );

        let mut origin = ResultOrigin::Local;
        if working.is_empty() && criteria.allows_remote_fallback() {
            match self.remote_fallback(&criteria).await {
                Ok(results) => {
                    origin = ResultOrigin::Remote;
                    working = results;
                }
                Err(e) => {
                    warn!(error = %e, "remote fallback failed, keeping empty result");
                    origin = ResultOrigin::RemoteFailed;
                }
            }
        }

        let matched = working.len();
        let committed = self.store.commit_filtered(ticket, working).await;
        FilterReport {
            ticket,
            origin,
            matched,
            committed,
        }
    }

    /// Dataset load nested in a filter run. Unlike
    /// [`fetch_all_countries`](Self::fetch_all_countries) it keeps `loading`
    /// set and only resets the filtered view while `ticket` is the latest.
    async fn load_for_run(&self, ticket: FilterTicket) {
        match self.source.fetch_all().await {
            Ok(countries) => {
                info!(count = countries.len(), ticket = ticket.sequence(), "dataset loaded");
                self.store.commit_dataset(ticket, countries).await;
            }
            Err(e) => {
                error!(error = %e, "failed to fetch countries");
                self.store.record_load_error(load_error_message(&e)).await;
            }
        }
    }

    async fn remote_fallback(&self, criteria: &FilterCriteria) -> Result<Vec<Country>> {
        let results = match (criteria.language(), criteria.search()) {
            (Some(code), _) => {
                debug!(language = code, "local miss, asking the language endpoint");
                self.source.fetch_by_language(code).await?
            }
            (None, Some(query)) => {
                debug!(query, "local miss, asking the name endpoint");
                self.source.fetch_by_name(query).await?
            }
            (None, None) => return Ok(Vec::new()),
        };
        Ok(narrow_fallback(results, criteria))
    }

    /// Clears all criteria and restores the full dataset. No network call.
    pub async fn reset_criteria(&self) {
        self.store.reset_criteria().await;
    }

    /// Countries whose capital matches `query`.
    ///
    /// Pass-through lookup; it does not touch the store.
    pub async fn find_by_capital(&self, query: &str) -> Result<Vec<Country>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AtlasError::InvalidInput(
                "Please enter a capital city".into(),
            ));
        }
        self.source
            .fetch_by_capital(query)
            .await
            .map_err(|e| not_found_as(e, "No country found with that capital city"))
    }

    /// Countries using currency `code`, sorted by common name.
    pub async fn find_by_currency(&self, code: &str) -> Result<Vec<Country>> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(AtlasError::InvalidInput("Please enter a currency code".into()));
        }
        let mut countries = self
            .source
            .fetch_by_currency(&code)
            .await
            .map_err(|e| not_found_as(e, &format!("No countries found with currency: {code}")))?;
        countries.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(countries)
    }

    /// Looks `code` (cca2 or cca3) up in the loaded dataset.
    pub async fn find_country(&self, code: &str) -> Option<Country> {
        self.store
            .read(|s| find_country_by_code(&s.countries, code).cloned())
            .await
    }
}

fn load_error_message(e: &AtlasError) -> String {
    format!("Failed to fetch countries: {e}")
}

fn not_found_as(e: AtlasError, message: &str) -> AtlasError {
    if e.is_not_found() {
        AtlasError::NotFound(message.to_string())
    } else {
        e
    }
}
