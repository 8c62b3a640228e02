// crates/atlas-core/src/debounce.rs

//! Coalesces bursts of criteria changes into one filter run.
//!
//! Every [`FilterDebouncer::schedule`] call restarts the quiet window; only
//! the call that is still the latest when its window elapses runs the
//! orchestrator. Earlier timers wake up, see they were superseded, and exit.

use crate::config::DEFAULT_DEBOUNCE;
use crate::orchestrator::{Explorer, FilterReport};
use crate::source::CountrySource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

pub struct FilterDebouncer<S> {
    explorer: Arc<Explorer<S>>,
    window: Duration,
    seq: Arc<AtomicU64>,
}

impl<S> FilterDebouncer<S>
where
    S: CountrySource + 'static,
{
    pub fn new(explorer: Arc<Explorer<S>>) -> Self {
        Self::with_window(explorer, DEFAULT_DEBOUNCE)
    }

    pub fn with_window(explorer: Arc<Explorer<S>>, window: Duration) -> Self {
        Self {
            explorer,
            window,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Restarts the quiet window. The returned task resolves to `None` when
    /// a later call (or [`cancel`](Self::cancel)) superseded this one.
    pub fn schedule(&self) -> JoinHandle<Option<FilterReport>> {
        let mine = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let seq = Arc::clone(&self.seq);
        let explorer = Arc::clone(&self.explorer);
        let window = self.window;

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if seq.load(Ordering::SeqCst) != mine {
                trace!(call = mine, "debounced call superseded");
                return None;
            }
            Some(explorer.refilter().await)
        })
    }

    /// Drops any pending call without running it.
    pub fn cancel(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::model::Country;
    use crate::store::CountryStore;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingSource {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl CountrySource for CountingSource {
        async fn fetch_all(&self) -> Result<Vec<Country>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::from_str(r#"[{"cca3":"ESP","name":{"common":"Spain"}}]"#)?)
        }
        async fn fetch_by_language(&self, _: &str) -> Result<Vec<Country>> {
            Ok(Vec::new())
        }
        async fn fetch_by_name(&self, _: &str) -> Result<Vec<Country>> {
            Ok(Vec::new())
        }
        async fn fetch_by_capital(&self, _: &str) -> Result<Vec<Country>> {
            Ok(Vec::new())
        }
        async fn fetch_by_currency(&self, _: &str) -> Result<Vec<Country>> {
            Ok(Vec::new())
        }
    }

    fn explorer() -> Arc<Explorer<CountingSource>> {
        Arc::new(Explorer::new(CountryStore::new(), CountingSource::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn burst_runs_once() {
        let explorer = explorer();
        let debouncer = FilterDebouncer::new(Arc::clone(&explorer));

        let first = debouncer.schedule();
        tokio::time::advance(Duration::from_millis(100)).await;
        explorer.store().set_search_query("sp").await;
        let second = debouncer.schedule();
        tokio::time::advance(Duration::from_millis(100)).await;
        explorer.store().set_search_query("spa").await;
        let last = debouncer.schedule();

        assert!(first.await.unwrap().is_none());
        assert!(second.await.unwrap().is_none());
        let report = last.await.unwrap().unwrap();
        assert!(report.committed);

        assert_eq!(explorer.source().fetches.load(Ordering::SeqCst), 1);
        let state = explorer.store().snapshot().await;
        assert_eq!(state.search_query, "spa");
        assert_eq!(state.filtered_countries.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_call() {
        let explorer = explorer();
        let debouncer = FilterDebouncer::with_window(Arc::clone(&explorer), Duration::from_millis(50));

        let pending = debouncer.schedule();
        debouncer.cancel();
        assert!(pending.await.unwrap().is_none());
        assert_eq!(explorer.source().fetches.load(Ordering::SeqCst), 0);
    }
}
