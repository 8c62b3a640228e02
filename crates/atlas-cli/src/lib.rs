//! atlas-cli
//! =========
//!
//! Command-line interface for the `atlas-core` country explorer.
//!
//! This crate primarily provides a binary (`atlas`). The library target only
//! exists so docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! atlas --help
//! atlas stats
//! atlas list --region Europe --language spa
//! atlas list --search spanish
//! atlas country es
//! atlas capital lima
//! atlas currency eur
//! atlas snapshot countries.json.gz
//! atlas --input countries.json.gz languages
//! ```
//!
//! For programmatic access to the store and the filter orchestrator, use the
//! `atlas-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
