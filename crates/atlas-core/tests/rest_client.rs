// crates/atlas-core/tests/rest_client.rs
#![cfg(feature = "http")]

use atlas_core::prelude::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

type TestResult<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default)]
struct ApiState {
    hits: Arc<Mutex<Vec<String>>>,
    fail_all: Arc<AtomicBool>,
}

impl ApiState {
    async fn hits(&self) -> Vec<String> {
        self.hits.lock().await.clone()
    }
}

/// What `/all` returns: a deliberately partial dataset.
fn europe() -> Vec<Value> {
    vec![
        json!({ "cca3": "ESP", "name": { "common": "Spain", "official": "Kingdom of Spain" },
                "region": "Europe", "capital": ["Madrid"], "languages": { "spa": "Spanish" },
                "currencies": { "EUR": { "name": "Euro", "symbol": "€" } } }),
        json!({ "cca3": "FRA", "name": { "common": "France", "official": "French Republic" },
                "region": "Europe", "capital": ["Paris"], "languages": { "fra": "French" },
                "currencies": { "EUR": { "name": "Euro", "symbol": "€" } } }),
    ]
}

/// What the by-field endpoints search.
fn world() -> Vec<Value> {
    let mut all = europe();
    all.extend([
        json!({ "cca3": "MEX", "name": { "common": "Mexico" }, "region": "Americas",
                "capital": ["Mexico City"], "languages": { "spa": "Spanish" } }),
        json!({ "cca3": "ARG", "name": { "common": "Argentina" }, "region": "Americas",
                "capital": ["Buenos Aires"], "languages": { "grn": "Guaraní", "spa": "Spanish" } }),
        json!({ "cca3": "USA", "name": { "common": "United States" }, "region": "Americas",
                "capital": ["Washington, D.C."], "languages": { "eng": "English" } }),
    ]);
    all
}

fn found_or_404(matches: Vec<Value>) -> Response {
    if matches.is_empty() {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": 404, "message": "Not Found" })),
        )
            .into_response()
    } else {
        Json(matches).into_response()
    }
}

fn text_at<'a>(v: &'a Value, pointer: &str) -> &'a str {
    v.pointer(pointer).and_then(Value::as_str).unwrap_or_default()
}

async fn all(State(state): State<ApiState>) -> Response {
    state.hits.lock().await.push("all".into());
    if state.fail_all.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(europe()).into_response()
}

async fn by_lang(State(state): State<ApiState>, Path(code): Path<String>) -> Response {
    state.hits.lock().await.push(format!("lang/{code}"));
    if code == "slow" {
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
    let matches = world()
        .into_iter()
        .filter(|c| c.pointer(&format!("/languages/{code}")).is_some())
        .collect();
    found_or_404(matches)
}

async fn by_name(State(state): State<ApiState>, Path(q): Path<String>) -> Response {
    state.hits.lock().await.push(format!("name/{q}"));
    let q = q.to_lowercase();
    let matches = world()
        .into_iter()
        .filter(|c| text_at(c, "/name/common").to_lowercase().contains(&q))
        .collect();
    found_or_404(matches)
}

async fn by_capital(State(state): State<ApiState>, Path(q): Path<String>) -> Response {
    state.hits.lock().await.push(format!("capital/{q}"));
    let q = q.to_lowercase();
    let matches = world()
        .into_iter()
        .filter(|c| text_at(c, "/capital/0").to_lowercase().contains(&q))
        .collect();
    found_or_404(matches)
}

async fn by_currency(State(state): State<ApiState>, Path(code): Path<String>) -> Response {
    state.hits.lock().await.push(format!("currency/{code}"));
    let matches = world()
        .into_iter()
        .filter(|c| c.pointer(&format!("/currencies/{code}")).is_some())
        .collect();
    found_or_404(matches)
}

async fn spawn_api() -> TestResult<(String, ApiState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ApiState::default();
    let app = Router::new()
        .route("/v3.1/all", get(all))
        .route("/v3.1/lang/:code", get(by_lang))
        .route("/v3.1/name/:q", get(by_name))
        .route("/v3.1/capital/:q", get(by_capital))
        .route("/v3.1/currency/:code", get(by_currency))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/v3.1/"), state))
}

fn client(base: &str) -> RestCountriesClient {
    RestCountriesClient::new(SourceConfig::new(base).with_timeout(Duration::from_millis(500)))
        .expect("client")
}

fn codes(countries: &[Country]) -> Vec<&str> {
    countries.iter().map(Country::code).collect()
}

#[tokio::test]
async fn fetch_all_decodes_records() {
    let (base, api) = spawn_api().await.expect("spawn api");
    let countries = client(&base).fetch_all().await.expect("fetch all");

    assert_eq!(codes(&countries), vec!["ESP", "FRA"]);
    assert_eq!(countries[0].capital(), Some("Madrid"));
    assert_eq!(countries[0].currencies_display(), "Euro (€)");
    assert_eq!(api.hits().await, vec!["all"]);
}

#[tokio::test]
async fn query_segments_survive_encoding() {
    let (base, api) = spawn_api().await.expect("spawn api");
    let found = client(&base)
        .fetch_by_name("united states")
        .await
        .expect("fetch by name");

    assert_eq!(codes(&found), vec!["USA"]);
    assert_eq!(api.hits().await, vec!["name/united states"]);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (base, _api) = spawn_api().await.expect("spawn api");
    let err = client(&base).fetch_by_capital("Gotham").await.unwrap_err();

    assert!(matches!(err, AtlasError::Status { status: 404, .. }));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn server_error_on_load_lands_in_store() {
    let (base, api) = spawn_api().await.expect("spawn api");
    api.fail_all.store(true, Ordering::SeqCst);
    let explorer = Explorer::new(CountryStore::new(), client(&base));

    assert!(explorer.fetch_all_countries().await.is_none());
    let state = explorer.store().snapshot().await;
    assert!(state.error.as_deref().is_some_and(|e| e.contains("500")));
    assert!(state.countries.is_empty());
    assert!(!state.loading);
}

#[tokio::test]
async fn language_fallback_reapplies_region() {
    let (base, api) = spawn_api().await.expect("spawn api");
    let explorer = Explorer::new(CountryStore::new(), client(&base));

    let report = explorer
        .apply_filters(
            FilterCriteria::new()
                .with_region("Americas")
                .with_language("spa"),
        )
        .await;

    assert_eq!(report.origin, ResultOrigin::Remote);
    assert_eq!(api.hits().await, vec!["all", "lang/spa"]);
    let state = explorer.store().snapshot().await;
    assert_eq!(codes(&state.filtered_countries), vec!["MEX", "ARG"]);
}

#[tokio::test]
async fn name_fallback_reaches_beyond_the_dataset() {
    let (base, api) = spawn_api().await.expect("spawn api");
    let explorer = Explorer::new(CountryStore::new(), client(&base));

    let report = explorer
        .apply_filters(FilterCriteria::new().with_search("argen"))
        .await;

    assert_eq!(report.origin, ResultOrigin::Remote);
    assert_eq!(api.hits().await, vec!["all", "name/argen"]);
    let state = explorer.store().snapshot().await;
    assert_eq!(codes(&state.filtered_countries), vec!["ARG"]);
}

#[tokio::test]
async fn hung_fallback_times_out_to_empty() {
    let (base, _api) = spawn_api().await.expect("spawn api");
    let explorer = Explorer::new(CountryStore::new(), client(&base));

    let report = explorer
        .apply_filters(FilterCriteria::new().with_language("slow"))
        .await;

    assert_eq!(report.origin, ResultOrigin::RemoteFailed);
    assert!(report.committed);
    let state = explorer.store().snapshot().await;
    assert!(state.filtered_countries.is_empty());
    assert!(state.error.is_none());
    assert!(!state.loading);
}

#[tokio::test]
async fn lookups_map_and_sort() {
    let (base, api) = spawn_api().await.expect("spawn api");
    let explorer = Explorer::new(CountryStore::new(), client(&base));

    let euro = explorer.find_by_currency("eur").await.expect("currency");
    assert_eq!(codes(&euro), vec!["FRA", "ESP"]);

    let capital = explorer.find_by_capital("buenos").await.expect("capital");
    assert_eq!(codes(&capital), vec!["ARG"]);

    let missing = explorer.find_by_capital("Gotham").await.unwrap_err();
    assert!(matches!(missing, AtlasError::NotFound(_)));

    assert_eq!(
        api.hits().await,
        vec!["currency/EUR", "capital/buenos", "capital/Gotham"]
    );
}
