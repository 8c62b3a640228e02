//! Error handling example for atlas-rs
//!
//! Shows how fetch failures surface: as `AtlasError` values from lookups,
//! and as the store's `error` field after a failed dataset load.

use atlas_core::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() {
    println!("=== atlas-rs Error Handling Example ===\n");

    // Example 1: Configuration errors are reported before any request.
    println!("--- Example 1: Invalid base URL ---");
    match RestCountriesClient::new(SourceConfig::new("not a url")) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(e) => println!("✗ {e}"),
    }
    println!();

    // Example 2: A failed dataset load lands in the store, not in a panic.
    println!("--- Example 2: Unreachable API ---");
    let config =
        SourceConfig::new("http://127.0.0.1:9/v3.1").with_timeout(Duration::from_secs(2));
    match RestCountriesClient::new(config) {
        Ok(client) => {
            let explorer = Explorer::new(CountryStore::new(), client);
            explorer.fetch_all_countries().await;
            let state = explorer.store().snapshot().await;
            println!("status: {:?}", state.status());
            println!("error:  {}", state.error.unwrap_or_default());
            println!("loading still set: {}", state.loading);
        }
        Err(e) => println!("✗ {e}"),
    }
    println!();

    // Example 3: Lookups report "nothing matched" as NotFound.
    println!("--- Example 3: Lookups ---");
    let explorer = Explorer::new(CountryStore::new(), FileSource::from_countries(Vec::new()));
    for query in ["", "Atlantis"] {
        match explorer.find_by_capital(query).await {
            Ok(found) => println!("{} match(es)", found.len()),
            Err(AtlasError::InvalidInput(msg)) => println!("✗ invalid input: {msg}"),
            Err(e) if e.is_not_found() => println!("✗ {e}"),
            Err(e) => println!("✗ unexpected: {e}"),
        }
    }
    println!();

    // Example 4: Missing dump file.
    println!("--- Example 4: Missing dataset dump ---");
    match FileSource::open("does-not-exist.json.gz") {
        Ok(_) => println!("unexpectedly found"),
        Err(e) => println!("✗ {e}"),
    }
}
