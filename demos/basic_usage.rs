//! Basic usage example for atlas-rs
//!
//! This example demonstrates how to:
//! - Load the country dataset from the public API
//! - Read the region and language facets
//! - Filter by region, language and free text
//! - Look a single country up by code

use atlas_core::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== atlas-rs Basic Usage Example ===\n");

    let explorer = Explorer::new(CountryStore::new(), RestCountriesClient::public()?);

    println!("Loading countries...");
    let Some(countries) = explorer.fetch_all_countries().await else {
        let state = explorer.store().snapshot().await;
        println!("✗ {}", state.error.unwrap_or_default());
        return Ok(());
    };
    println!("✓ {} countries loaded\n", countries.len());

    // Example 1: Facets
    println!("--- Example 1: Facets ---");
    let state = explorer.store().snapshot().await;
    println!("Regions: {}", state.regions.join(", "));
    println!("Languages: {} (first five below)", state.languages.len());
    for lang in state.languages.iter().take(5) {
        println!("  {} = {}", lang.code, lang.name);
    }
    println!();

    // Example 2: Region
    println!("--- Example 2: Countries in Oceania ---");
    let report = explorer
        .apply_filters(FilterCriteria::new().with_region("Oceania"))
        .await;
    println!("{} matches", report.matched);
    for c in explorer.store().snapshot().await.filtered_countries.iter().take(5) {
        println!("- {} ({})", c.name(), c.code());
    }
    println!();

    // Example 3: A language name typed into the search box
    println!("--- Example 3: Search \"portuguese\" ---");
    explorer
        .apply_filters(FilterCriteria::new().with_search("portuguese"))
        .await;
    for c in &explorer.store().snapshot().await.filtered_countries {
        println!("- {}", c.name());
    }
    println!();

    // Example 4: Lookup by code
    println!("--- Example 4: Country by code ---");
    if let Some(c) = explorer.find_country("jp").await {
        println!("{} / {}", c.name(), c.official_name());
        println!("  Capital: {}", c.capital().unwrap_or("N/A"));
        println!("  Population: {}", c.population_display());
        println!("  Languages: {}", c.languages_display());
        println!("  Currencies: {}", c.currencies_display());
    }

    // Back to the full list without another request.
    explorer.reset_criteria().await;
    let state = explorer.store().snapshot().await;
    println!("\nAfter reset: {} countries shown", state.filtered_countries.len());

    Ok(())
}
