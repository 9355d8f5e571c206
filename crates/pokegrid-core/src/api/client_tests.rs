//! Tests for the PokeAPI client against a mock server.

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{ApiError, PokeApiClient, PAGE_LIMIT};
use crate::config::Config;
use crate::models::Identifier;

const NAMES: [&str; 12] = [
    "bulbasaur",
    "ivysaur",
    "venusaur",
    "charmander",
    "charmeleon",
    "charizard",
    "squirtle",
    "wartortle",
    "blastoise",
    "caterpie",
    "metapod",
    "butterfree",
];

/// Helper: a detail body as PokeAPI shapes it (with a few extra fields).
pub(crate) fn details_json(id: u32, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "height": 7,
        "sprites": {
            "front_default": format!("https://sprites.example.com/pokemon/{}.png", id),
            "back_default": null
        }
    })
}

/// Helper: mounts the index endpoint and all twelve detail endpoints.
pub(crate) async fn mount_pokedex(server: &MockServer) {
    let results: Vec<serde_json::Value> = NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            serde_json::json!({
                "name": name,
                "url": format!("{}/pokemon/{}/", server.uri(), i + 1),
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": 1302,
            "next": null,
            "previous": null,
            "results": results,
        })))
        .mount(server)
        .await;

    for (i, name) in NAMES.iter().enumerate() {
        let id = i as u32 + 1;
        Mock::given(method("GET"))
            .and(path(format!("/pokemon/{}/", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(details_json(id, name)))
            .mount(server)
            .await;
    }
}

// ── fetch_list ───────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_list_returns_twelve_display_records() {
    let mock_server = MockServer::start().await;
    mount_pokedex(&mock_server).await;

    let client = PokeApiClient::with_base_url(&mock_server.uri()).unwrap();
    let list = client.fetch_list().await.unwrap();

    assert_eq!(list.len(), PAGE_LIMIT);
    for pokemon in &list {
        assert!(!pokemon.name.is_empty());
        assert!(pokemon.name.chars().next().unwrap().is_uppercase());
        assert!(!pokemon.image.is_empty());
    }
}

#[tokio::test]
async fn fetch_list_keeps_listing_order() {
    let mock_server = MockServer::start().await;
    mount_pokedex(&mock_server).await;

    let client = PokeApiClient::with_base_url(&mock_server.uri()).unwrap();
    let list = client.fetch_list().await.unwrap();

    let ids: Vec<u32> = list.iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    assert_eq!(list[0].name, "Bulbasaur");
    assert_eq!(list[11].name, "Butterfree");
}

#[tokio::test]
async fn fetch_list_fails_when_one_detail_fails() {
    let mock_server = MockServer::start().await;

    // Mounted first so it takes priority over the healthy detail mock
    Mock::given(method("GET"))
        .and(path("/pokemon/7/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;
    mount_pokedex(&mock_server).await;

    let client = PokeApiClient::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_list().await.unwrap_err();

    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Status { status, message }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("Expected ApiError::Status, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_list_index_error_skips_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PokeApiClient::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_list().await.unwrap_err();

    assert_eq!(err.to_string(), "API Error: 503 Service Unavailable - Service Unavailable");
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn fetch_list_malformed_body_is_not_an_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&mock_server)
        .await;

    let client = PokeApiClient::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_list().await.unwrap_err();

    assert!(err.downcast_ref::<ApiError>().is_none());
    assert!(err.downcast_ref::<serde_json::Error>().is_some());
}

// ── fetch_one ────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_one_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(details_json(25, "pikachu")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PokeApiClient::with_base_url(&mock_server.uri()).unwrap();
    let pokemon = client.fetch_one(&Identifier::Id(25)).await.unwrap();

    assert_eq!(pokemon.id, 25);
    assert_eq!(pokemon.name, "Pikachu");
    assert_eq!(pokemon.image, "https://sprites.example.com/pokemon/25.png");
}

#[tokio::test]
async fn fetch_one_by_name_returns_canonical_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/ditto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(details_json(132, "ditto")))
        .mount(&mock_server)
        .await;

    let client = PokeApiClient::with_base_url(&mock_server.uri()).unwrap();
    let pokemon = client.fetch_one(&Identifier::from("ditto")).await.unwrap();

    assert_eq!(pokemon.id, 132);
    assert_eq!(pokemon.name, "Ditto");
}

#[tokio::test]
async fn fetch_one_unknown_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/missingno"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = PokeApiClient::with_base_url(&mock_server.uri()).unwrap();
    let err = client
        .fetch_one(&Identifier::from("missingno"))
        .await
        .unwrap_err();

    let api_err = err.downcast_ref::<ApiError>().expect("should be an ApiError");
    assert!(api_err.is_not_found());
    assert_eq!(err.to_string(), "API Error: 404 Not Found - Not Found");
}

#[tokio::test]
async fn slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(details_json(1, "bulbasaur"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let config = Config {
        api_base_url: Some(mock_server.uri()),
        request_timeout_secs: Some(1),
        ..Config::default()
    };
    let client = PokeApiClient::with_config(&config).unwrap();
    let err = client.fetch_one(&Identifier::Id(1)).await.unwrap_err();

    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Timeout(_)) => {}
        other => panic!("Expected ApiError::Timeout, got: {other:?}"),
    }
}
