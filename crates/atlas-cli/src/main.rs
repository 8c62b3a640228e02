//! atlas: command-line interface for atlas-core
//!
//! Plays the presentation layer for the country store: it loads the dataset,
//! sets filter criteria, runs the orchestrator once and prints what the
//! store holds afterwards.
//!
//! Usage examples
//! --------------
//!
//! - Dataset summary
//!   $ atlas stats
//!
//! - Filter (a language name in --search selects that language)
//!   $ atlas list --region Europe
//!   $ atlas list --search spanish
//!   $ atlas list --language spa --search arg
//!
//! - Details for one country (cca2 or cca3, case-insensitive)
//!   $ atlas country es
//!
//! - Lookups straight against the source
//!   $ atlas capital lima
//!   $ atlas currency eur
//!
//! Data source
//! -----------
//!
//! By default the CLI talks to the public restcountries v3.1 API. Use
//! `--input <path>` (or `ATLAS_INPUT`) to serve everything from a dump
//! written by `atlas snapshot`.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use atlas_core::prelude::*;
use clap::Parser;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type SharedSource = Arc<dyn CountrySource>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let source = build_source(&args)?;
    let explorer = Explorer::new(CountryStore::new(), source);

    match args.command {
        Commands::Stats => {
            load_dataset(&explorer).await?;
            let state = explorer.store().snapshot().await;
            println!("Dataset statistics:");
            println!("  Countries: {}", state.countries.len());
            println!("  Regions: {}", state.regions.len());
            println!("  Languages: {}", state.languages.len());
        }

        Commands::Regions => {
            load_dataset(&explorer).await?;
            for region in explorer.store().read(|s| s.regions.clone()).await {
                println!("{region}");
            }
        }

        Commands::Languages => {
            load_dataset(&explorer).await?;
            for lang in explorer.store().read(|s| s.languages.clone()).await {
                println!("{:<4} {}", lang.code, lang.name);
            }
        }

        Commands::List {
            search,
            region,
            language,
        } => {
            load_dataset(&explorer).await?;
            let store = explorer.store();
            store.set_search_query(search.unwrap_or_default()).await;
            store.select_region(region).await;
            store.select_language(language).await;

            let report = explorer.refilter().await;
            let state = store.snapshot().await;
            if state.filtered_countries.is_empty() {
                println!("No countries match");
            }
            for c in &state.filtered_countries {
                println!("{:<4} {:<40} {}", c.code(), c.name(), c.region());
            }
            if report.origin == ResultOrigin::Remote {
                println!("(results from the remote fallback)");
            }
            println!(
                "{} of {} countries, {} filter(s) active",
                state.filtered_countries.len(),
                state.countries.len(),
                state.active_filter_count()
            );
        }

        Commands::Country { code } => {
            load_dataset(&explorer).await?;
            match explorer.find_country(&code).await {
                Some(c) => print_details(&c),
                None => eprintln!("No country found for: {code}"),
            }
        }

        Commands::Capital { query } => {
            let matches = explorer.find_by_capital(&query).await?;
            for c in matches {
                println!("{} ({}): {}", c.name(), c.code(), c.capitals().join(", "));
            }
        }

        Commands::Currency { code } => {
            let matches = explorer.find_by_currency(&code).await?;
            for c in matches {
                println!("{} ({}): {}", c.name(), c.code(), c.currencies_display());
            }
        }

        Commands::Snapshot { path } => {
            let countries = load_dataset(&explorer).await?;
            FileSource::save_as(&path, &countries)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Saved {} countries to {}", countries.len(), path.display());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_source(args: &CliArgs) -> anyhow::Result<SharedSource> {
    if let Some(path) = &args.input {
        let source = FileSource::open(path)
            .with_context(|| format!("loading dataset dump {}", path.display()))?;
        return Ok(Arc::new(source));
    }
    debug!(base_url = %args.base_url, timeout = args.timeout, "using the REST source");
    remote_source(args)
}

#[cfg(feature = "http")]
fn remote_source(args: &CliArgs) -> anyhow::Result<SharedSource> {
    let config = SourceConfig::new(&args.base_url)
        .with_timeout(std::time::Duration::from_secs(args.timeout));
    Ok(Arc::new(RestCountriesClient::new(config)?))
}

#[cfg(not(feature = "http"))]
fn remote_source(_args: &CliArgs) -> anyhow::Result<SharedSource> {
    bail!("built without the 'http' feature; pass --input <PATH>")
}

/// Loads the full dataset, turning a failed load into the store's message.
async fn load_dataset(explorer: &Explorer<SharedSource>) -> anyhow::Result<Vec<Country>> {
    match explorer.fetch_all_countries().await {
        Some(countries) => Ok(countries),
        None => {
            let message = explorer
                .store()
                .read(|s| s.error.clone())
                .await
                .unwrap_or_else(|| "failed to load countries".into());
            bail!(message)
        }
    }
}

fn print_details(c: &Country) {
    println!("Country: {}", c.name());
    println!("Official name: {}", c.official_name());
    println!("cca2: {}", c.iso2());
    println!("cca3: {}", c.code());
    println!("Capital: {}", c.capital().unwrap_or(atlas_core::model::NOT_AVAILABLE));
    println!("Region: {}", c.region());
    println!("Subregion: {}", c.subregion());
    println!("Population: {}", c.population_display());
    println!("Languages: {}", c.languages_display());
    println!("Currencies: {}", c.currencies_display());
    if !c.borders().is_empty() {
        println!("Borders: {}", c.borders().join(", "));
    }
    if let Some(flag) = c.flag_png() {
        println!("Flag: {flag}");
    }
}
