// crates/atlas-core/src/lib.rs

//! # atlas-core
//!
//! Country explorer state and filtering: a reducer-style store holding the
//! country dataset and its facets, pure filter stages, and an async
//! orchestrator that loads data from a [`CountrySource`] and falls back to
//! remote by-field queries when the local filters come up empty.
//!
//! ```no_run
//! # #[cfg(feature = "http")]
//! # async fn demo() -> atlas_core::Result<()> {
//! use atlas_core::prelude::*;
//!
//! let explorer = Explorer::new(CountryStore::new(), RestCountriesClient::public()?);
//! explorer.fetch_all_countries().await;
//! let report = explorer
//!     .apply_filters(FilterCriteria::new().with_region("Europe"))
//!     .await;
//! println!("{} countries", report.matched);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod debounce;
pub mod error;
pub mod facets;
pub mod filter;
pub mod model;
pub mod orchestrator;
pub mod prelude;
pub mod source;
pub mod store;
pub mod text;
pub mod traits;

pub use crate::config::SourceConfig;
pub use crate::debounce::FilterDebouncer;
pub use crate::error::{AtlasError, Result};
pub use crate::facets::{Facets, LanguageFacet};
pub use crate::filter::FilterCriteria;
pub use crate::model::{find_country_by_code, Country, CountryName, Currency};
pub use crate::orchestrator::{Explorer, FilterReport, ResultOrigin};
pub use crate::source::CountrySource;
#[cfg(feature = "json")]
pub use crate::source::FileSource;
#[cfg(feature = "http")]
pub use crate::source::RestCountriesClient;
pub use crate::store::{CountryAction, CountryState, CountryStore, FilterTicket, LoadStatus};
