//! Remote catalog client and HTTP surface, exercised against local axum servers.

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::Duration;

use ad_selector::api::{self, AppState};
use ad_selector::catalog::{ContentSource, HttpCatalogClient, InMemoryCatalog, TargetingGroupSource};
use ad_selector::mock_catalog;
use ad_selector::selection::{SelectionEngine, ThreadRandom};
use ad_selector::targeting::{PredicateKind, PredicatePool, PredicateSpec, TargetingEvaluator, TargetingGroupRecord};
use ad_selector::{AdvertisementContent, SelectionError};

fn catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::default();
    catalog.add_content("US", AdvertisementContent::new(Some("A"), "<div>A</div>"));
    catalog.add_targeting_group(TargetingGroupRecord {
        targeting_group_id: "tg-a".to_string(),
        content_id: "A".to_string(),
        predicates: vec![PredicateSpec { kind: PredicateKind::Recognized, inverse: false }],
    });
    catalog
}

async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn spawn_mock_catalog() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let catalog = Arc::new(catalog());
    tokio::spawn(async move {
        mock_catalog::serve_mock_catalog(listener, catalog).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr) -> HttpCatalogClient {
    HttpCatalogClient::new(&format!("http://{}/", addr), Duration::from_millis(500))
}

#[tokio::test]
async fn fetches_contents_and_groups_from_remote_catalog() {
    let client = client(spawn_mock_catalog().await);

    let contents = client.get_contents("US").await.unwrap();
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0].content_id.as_deref(), Some("A"));

    let groups = client.get_targeting_groups("A").await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].targeting_group_id, "tg-a");
    assert_eq!(groups[0].predicates.len(), 1);
}

#[tokio::test]
async fn not_found_is_an_empty_result() {
    let client = client(spawn_mock_catalog().await);
    assert!(client.get_contents("JP").await.unwrap().is_empty());
    assert!(client.get_targeting_groups("missing").await.unwrap().is_empty());
}

#[tokio::test]
async fn reserved_characters_stay_part_of_the_key() {
    let client = client(spawn_mock_catalog().await);
    for key in ["US?x=1", "US#frag", "US/extra", "US%3F"] {
        let contents = client.get_contents(key).await.unwrap();
        assert!(contents.is_empty(), "{} returned {} items", key, contents.len());
    }
    assert!(client.get_targeting_groups("A?x=1").await.unwrap().is_empty());
    assert_eq!(client.get_contents("US").await.unwrap().len(), 1);
}

#[tokio::test]
async fn server_error_is_a_lookup_failure() {
    let router = Router::new().route(
        "/contents/{marketplace_id}",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = client(spawn_router(router).await);
    let err = client.get_contents("US").await.unwrap_err();
    assert!(matches!(err, SelectionError::ContentLookup { ref marketplace_id, .. } if marketplace_id == "US"));
}

#[tokio::test]
async fn unreachable_catalog_is_a_lookup_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr).get_targeting_groups("A").await.unwrap_err();
    assert!(matches!(err, SelectionError::TargetingGroupLookup { .. }));
}

fn engine_for(addr: SocketAddr) -> SelectionEngine {
    let remote = Arc::new(client(addr));
    let pool = Arc::new(PredicatePool::new(4, Duration::from_millis(200)));
    SelectionEngine::new(remote.clone(), remote, TargetingEvaluator::new(pool)).with_random(Arc::new(ThreadRandom))
}

#[tokio::test]
async fn advertisement_endpoint_serves_selection() {
    let catalog_addr = spawn_mock_catalog().await;
    let state = Arc::new(AppState { engine: Arc::new(engine_for(catalog_addr)) });
    let addr = spawn_router(api::router(state)).await;

    let body: Value = reqwest::get(format!("http://{}/advertisement?customer_id=c1&marketplace_id=US", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "hasAdvertisement": true, "contentId": "A", "renderableContent": "<div>A</div>" }));

    let body: Value = reqwest::get(format!("http://{}/advertisement?customer_id=c1", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "hasAdvertisement": false }));
}

#[tokio::test]
async fn advertisement_endpoint_reports_upstream_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = listener.local_addr().unwrap();
    drop(listener);

    let state = Arc::new(AppState { engine: Arc::new(engine_for(dead)) });
    let addr = spawn_router(api::router(state)).await;

    let resp = reqwest::get(format!("http://{}/advertisement?customer_id=c1&marketplace_id=US", addr))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 502);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap_or_default().contains("US"));
}
