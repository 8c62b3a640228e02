//! Advanced filtering example for atlas-rs
//!
//! Runs fully offline against an in-memory source and walks through the
//! filter stages, the language-name precedence of the search text, the
//! remote fallback and debounced re-filtering.

use atlas_core::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn dataset() -> Result<Vec<Country>> {
    let raw = r#"[
        { "cca2": "ES", "cca3": "ESP", "name": { "common": "Spain", "official": "Kingdom of Spain" },
          "region": "Europe", "capital": ["Madrid"], "languages": { "spa": "Spanish" },
          "currencies": { "EUR": { "name": "Euro", "symbol": "€" } } },
        { "cca2": "FR", "cca3": "FRA", "name": { "common": "France", "official": "French Republic" },
          "region": "Europe", "capital": ["Paris"], "languages": { "fra": "French" },
          "currencies": { "EUR": { "name": "Euro", "symbol": "€" } } },
        { "cca2": "MX", "cca3": "MEX", "name": { "common": "Mexico" }, "region": "Americas",
          "capital": ["Mexico City"], "languages": { "spa": "Spanish" } },
        { "cca2": "CA", "cca3": "CAN", "name": { "common": "Canada" }, "region": "Americas",
          "capital": ["Ottawa"], "languages": { "eng": "English", "fra": "French" } }
    ]"#;
    Ok(serde_json::from_str(raw)?)
}

async fn show(explorer: &Explorer<FileSource>, label: &str, criteria: FilterCriteria) {
    let report = explorer.apply_filters(criteria).await;
    let state = explorer.store().snapshot().await;
    let names: Vec<&str> = state.filtered_countries.iter().map(Country::name).collect();
    println!("{label:<36} {:?} via {:?}", names, report.origin);
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== atlas-rs Advanced Filtering Example ===\n");

    let all = dataset()?;
    // The "remote" side knows every country; the store only gets the first three.
    let explorer = Explorer::new(CountryStore::new(), FileSource::from_countries(all.clone()));
    explorer
        .store()
        .dispatch(CountryAction::DatasetLoaded(all[..3].to_vec()))
        .await;

    println!("--- Stages ---");
    show(&explorer, "region=Americas", FilterCriteria::new().with_region("Americas")).await;
    show(
        &explorer,
        "region=Europe, language=spa",
        FilterCriteria::new().with_region("Europe").with_language("spa"),
    )
    .await;
    show(&explorer, "search=\"city\" (capital)", FilterCriteria::new().with_search("city")).await;

    println!("\n--- Search text naming a language ---");
    show(&explorer, "search=\"french\"", FilterCriteria::new().with_search("french")).await;

    println!("\n--- Remote fallback ---");
    show(&explorer, "search=\"canada\" (not cached)", FilterCriteria::new().with_search("canada")).await;
    show(
        &explorer,
        "region=Americas, language=eng",
        FilterCriteria::new().with_region("Americas").with_language("eng"),
    )
    .await;
    show(
        &explorer,
        "region=Antarctica (no fallback)",
        FilterCriteria::new().with_region("Antarctica"),
    )
    .await;

    println!("\n--- Debounced typing ---");
    let explorer = Arc::new(explorer);
    let debouncer = FilterDebouncer::with_window(Arc::clone(&explorer), Duration::from_millis(50));
    explorer.reset_criteria().await;
    let mut last = None;
    for typed in ["m", "me", "mex"] {
        explorer.store().set_search_query(typed).await;
        last = Some(debouncer.schedule());
    }
    if let Some(handle) = last {
        if let Ok(Some(report)) = handle.await {
            println!("one run for three keystrokes: {} match(es)", report.matched);
        }
    }

    Ok(())
}
