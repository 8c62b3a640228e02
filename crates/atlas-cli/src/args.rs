use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for atlas
#[derive(Debug, Parser)]
#[command(
    name = "atlas",
    version,
    about = "Browse, search and filter country records from restcountries or a local dump"
)]
pub struct CliArgs {
    /// Read countries from a dataset dump (.json or .json.gz) instead of the API
    #[arg(short = 'i', long = "input", env = "ATLAS_INPUT", global = true)]
    pub input: Option<PathBuf>,

    /// Base URL of a restcountries v3.1 compatible API
    #[arg(
        long = "base-url",
        env = "ATLAS_BASE_URL",
        default_value = atlas_core::config::DEFAULT_BASE_URL,
        global = true
    )]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = 30, global = true)]
    pub timeout: u64,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset
    Stats,

    /// List the region facet
    Regions,

    /// List the language facet (code and name)
    Languages,

    /// Filter countries by search text, region and language
    List {
        /// Free text: a language name, or part of a name, capital or code
        #[arg(short = 's', long = "search")]
        search: Option<String>,

        /// Exact region name (e.g. Europe)
        #[arg(short = 'r', long = "region")]
        region: Option<String>,

        /// Language code (e.g. spa)
        #[arg(short = 'l', long = "language")]
        language: Option<String>,
    },

    /// Show details for a country by cca2 or cca3 code
    Country {
        /// cca2 or cca3 code (e.g. ES, FRA), case-insensitive
        code: String,
    },

    /// Find countries by capital city
    Capital {
        /// Capital name or part of it
        query: String,
    },

    /// Find countries using a currency
    Currency {
        /// Currency code (e.g. EUR)
        code: String,
    },

    /// Save the full dataset as a dump usable with --input
    Snapshot {
        /// Target path; a .gz extension writes gzip
        path: PathBuf,
    },
}
