// crates/atlas-core/src/store.rs

//! # Country Store
//!
//! The single piece of shared mutable state: the full dataset, its facets,
//! the current filter criteria, the filtered result and the loading/error
//! status.
//!
//! [`CountryState::apply`] is a total reducer over [`CountryAction`]; it never
//! fails and treats absent collections as empty. [`CountryStore`] is the
//! cloneable handle the application root creates once and injects into the
//! orchestrator and the presentation layer.

use crate::facets::{Facets, LanguageFacet};
use crate::filter::FilterCriteria;
use crate::model::Country;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Coarse lifecycle of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Everything the presentation layer reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CountryState {
    pub countries: Vec<Country>,
    pub filtered_countries: Vec<Country>,
    pub regions: Vec<String>,
    pub languages: Vec<LanguageFacet>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected_country: Option<Country>,
    pub search_query: String,
    pub selected_region: Option<String>,
    pub selected_language: Option<String>,
    /// Bumped on every successful full dataset load.
    pub dataset_version: u64,
}

/// Mutations accepted by [`CountryState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum CountryAction {
    /// A fetch or filter pass is starting.
    LoadStarted,
    /// A full dataset fetch succeeded.
    DatasetLoaded(Vec<Country>),
    /// A full dataset fetch failed with the given message.
    LoadFailed(String),
    /// A filter pass finished with this result.
    FilteredCommitted(Vec<Country>),
    SearchQuerySet(String),
    RegionSelected(Option<String>),
    LanguageSelected(Option<String>),
    CriteriaReset,
    CountrySelected(Option<Country>),
}

impl CountryAction {
    /// `DatasetLoaded` from a possibly absent payload.
    pub fn dataset_loaded(records: Option<Vec<Country>>) -> Self {
        CountryAction::DatasetLoaded(records.unwrap_or_default())
    }

    /// `FilteredCommitted` from a possibly absent payload.
    pub fn filtered_committed(records: Option<Vec<Country>>) -> Self {
        CountryAction::FilteredCommitted(records.unwrap_or_default())
    }
}

impl CountryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action. Total: every action is accepted in every state.
    pub fn apply(&mut self, action: CountryAction) {
        match action {
            CountryAction::LoadStarted => {
                self.loading = true;
                self.error = None;
            }
            CountryAction::DatasetLoaded(records) => {
                self.loading = false;
                self.filtered_countries = records.clone();
                self.install_dataset(records);
            }
            CountryAction::LoadFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            CountryAction::FilteredCommitted(records) => {
                self.filtered_countries = records;
                self.loading = false;
            }
            CountryAction::SearchQuerySet(q) => self.search_query = q,
            CountryAction::RegionSelected(region) => self.selected_region = region,
            CountryAction::LanguageSelected(code) => self.selected_language = code,
            CountryAction::CriteriaReset => {
                self.search_query.clear();
                self.selected_region = None;
                self.selected_language = None;
                self.selected_country = None;
                self.filtered_countries = self.countries.clone();
                self.loading = false;
                self.error = None;
            }
            CountryAction::CountrySelected(country) => self.selected_country = country,
        }
    }

    /// Replaces the dataset and rebuilds both facets together.
    fn install_dataset(&mut self, records: Vec<Country>) {
        let facets = Facets::from_countries(&records);
        self.countries = records;
        self.regions = facets.regions;
        self.languages = facets.languages;
        self.dataset_version += 1;
    }

    /// The criteria currently held by the store.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_query: self.search_query.clone(),
            region: self.selected_region.clone(),
            language: self.selected_language.clone(),
        }
    }

    pub fn active_filter_count(&self) -> usize {
        self.criteria().active_count()
    }

    pub fn status(&self) -> LoadStatus {
        if self.loading {
            LoadStatus::Loading
        } else if self.error.is_some() {
            LoadStatus::Error
        } else if self.dataset_version > 0 {
            LoadStatus::Ready
        } else {
            LoadStatus::Idle
        }
    }

    pub fn has_dataset(&self) -> bool {
        !self.countries.is_empty()
    }
}

/// Issued to each filter run; only the latest ticket may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FilterTicket(u64);

impl FilterTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Default)]
struct Inner {
    state: RwLock<CountryState>,
    generation: AtomicU64,
}

/// Cloneable handle to one [`CountryState`].
///
/// Each reducer application happens under the write lock and no lock is held
/// across an `.await`, so readers never observe a half-applied action.
#[derive(Clone, Default)]
pub struct CountryStore {
    inner: Arc<Inner>,
}

impl CountryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: CountryState) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(state),
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub async fn dispatch(&self, action: CountryAction) {
        self.inner.state.write().await.apply(action);
    }

    /// A full copy of the current state.
    pub async fn snapshot(&self) -> CountryState {
        self.inner.state.read().await.clone()
    }

    /// Runs `f` against the current state under the read lock.
    pub async fn read<R>(&self, f: impl FnOnce(&CountryState) -> R) -> R {
        let guard = self.inner.state.read().await;
        f(&*guard)
    }

    pub async fn criteria(&self) -> FilterCriteria {
        self.read(CountryState::criteria).await
    }

    pub async fn set_search_query(&self, q: impl Into<String>) {
        self.dispatch(CountryAction::SearchQuerySet(q.into())).await;
    }

    pub async fn select_region(&self, region: Option<String>) {
        self.dispatch(CountryAction::RegionSelected(region)).await;
    }

    pub async fn select_language(&self, code: Option<String>) {
        self.dispatch(CountryAction::LanguageSelected(code)).await;
    }

    pub async fn select_country(&self, country: Option<Country>) {
        self.dispatch(CountryAction::CountrySelected(country)).await;
    }

    /// Clears every criterion and restores the full dataset without any
    /// network call. Filter runs still in flight lose their right to commit.
    pub async fn reset_criteria(&self) {
        let mut state = self.inner.state.write().await;
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        state.apply(CountryAction::CriteriaReset);
    }

    /// Starts a filter run: marks the store as loading and takes the next
    /// ticket, superseding every earlier one. Both happen under one write
    /// lock so a newer run's commit can never precede an older run's start.
    pub async fn begin_filter(&self) -> FilterTicket {
        let mut state = self.inner.state.write().await;
        let ticket = self.issue_ticket();
        state.apply(CountryAction::LoadStarted);
        ticket
    }

    /// Takes the next ticket without touching the state.
    pub fn issue_ticket(&self) -> FilterTicket {
        FilterTicket(self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: FilterTicket) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Installs a dataset fetched inside the filter run holding `ticket`.
    ///
    /// The dataset and facets are always replaced. `filtered_countries` is
    /// only reset when `ticket` is still the latest, so a superseded run
    /// cannot clobber a newer result. `loading` is left alone: the run (or
    /// the newer one) clears it on commit.
    pub async fn commit_dataset(&self, ticket: FilterTicket, records: Vec<Country>) -> bool {
        let mut state = self.inner.state.write().await;
        let latest = self.is_latest(ticket);
        if latest {
            state.filtered_countries = records.clone();
        } else {
            debug!(ticket = ticket.0, "dataset loaded by a superseded run");
        }
        state.install_dataset(records);
        latest
    }

    /// Records a failed dataset load inside a filter run. `loading` stays
    /// set until the run commits.
    pub async fn record_load_error(&self, message: String) {
        self.inner.state.write().await.error = Some(message);
    }

    /// Commits a filter result if `ticket` is still the latest one issued.
    ///
    /// Returns `false` (and leaves the state untouched) for a stale ticket.
    pub async fn commit_filtered(&self, ticket: FilterTicket, records: Vec<Country>) -> bool {
        let mut state = self.inner.state.write().await;
        // Checked under the write lock so a newer commit cannot slip in between.
        if !self.is_latest(ticket) {
            debug!(
                ticket = ticket.0,
                discarded = records.len(),
                "dropping stale filter result"
            );
            return false;
        }
        state.apply(CountryAction::FilteredCommitted(records));
        true
    }
}
