//! atlas-core prelude: the types and traits most callers need.

#![allow(unused_imports)]

pub use crate::config::SourceConfig;
pub use crate::debounce::FilterDebouncer;
pub use crate::error::{AtlasError, Result};
pub use crate::facets::{Facets, LanguageFacet};
pub use crate::filter::FilterCriteria;
pub use crate::model::{find_country_by_code, Country};
pub use crate::orchestrator::{Explorer, FilterReport, ResultOrigin};
pub use crate::source::CountrySource;
#[cfg(feature = "json")]
pub use crate::source::FileSource;
#[cfg(feature = "http")]
pub use crate::source::RestCountriesClient;
pub use crate::store::{CountryAction, CountryState, CountryStore, LoadStatus};
pub use crate::traits::NameMatch;
