// crates/atlas-core/src/config.rs
use std::time::Duration;

/// Public restcountries v3.1 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Quiet window the caller waits after the last criteria change before
/// re-running the filter.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Where and how the remote country source is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Base URL without a trailing slash, e.g. `https://restcountries.com/v3.1`.
    pub base_url: String,
    /// Applied to every request so a hung call surfaces as a fetch failure.
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SourceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
