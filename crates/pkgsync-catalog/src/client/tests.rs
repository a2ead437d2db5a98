//! Unit tests for the catalog client

use super::*;
use crate::api::EntityProperties;

use pkgsync_core::{build_http_client, HttpSettings};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> CatalogSettings {
    CatalogSettings {
        base_url: server.uri(),
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        ..CatalogSettings::default()
    }
}

fn http() -> Client {
    build_http_client(&HttpSettings::default()).unwrap()
}

fn entity(identifier: &str) -> Entity {
    Entity {
        identifier: identifier.to_string(),
        title: "widget".to_string(),
        properties: EntityProperties {
            package_type: "npm".to_string(),
            visibility: "public".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            link: "https://github.com/acme/widget".to_string(),
            latest_version_tag: "1.0.0".to_string(),
            latest_version_link: "https://github.com/acme/widget/1.0.0".to_string(),
            latest_version_created_at: "2024-02-01T00:00:00Z".to_string(),
        },
    }
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/access_token"))
        .and(body_json(serde_json::json!({ "clientId": "client", "clientSecret": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "accessToken": "port-token",
            "expiresIn": 10800,
            "tokenType": "Bearer"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_authenticate_success() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let client = CatalogClient::authenticate(http(), &settings(&server)).await.unwrap();
    assert_eq!(client.access_token, "port-token");
    assert_eq!(client.base_url, server.uri());
}

#[tokio::test]
async fn test_authenticate_missing_token_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .mount(&server)
        .await;

    let result = CatalogClient::authenticate(http(), &settings(&server)).await;
    assert!(matches!(result, Err(SyncError::Authentication { .. })));
}

#[tokio::test]
async fn test_authenticate_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/access_token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({ "ok": false })))
        .mount(&server)
        .await;

    match CatalogClient::authenticate(http(), &settings(&server)).await {
        Err(SyncError::Authentication { message }) => assert!(message.contains("401")),
        Err(other) => panic!("Expected Authentication error, got {:?}", other),
        Ok(_) => panic!("Expected Authentication error"),
    }
}

#[tokio::test]
async fn test_upsert_uses_merge_semantics() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let expected = entity("42");
    Mock::given(method("POST"))
        .and(path("/blueprints/githubPackage/entities"))
        .and(query_param("upsert", "true"))
        .and(query_param("merge", "true"))
        .and(header("Authorization", "Bearer port-token"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = CatalogClient::authenticate(http(), &settings(&server)).await.unwrap();
    let outcome = client.upsert_entity("githubPackage", &expected).await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Applied);
}

#[tokio::test]
async fn test_upsert_rejection_is_not_an_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/blueprints/githubPackage/entities"))
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&server)
        .await;

    let client = CatalogClient::authenticate(http(), &settings(&server)).await.unwrap();
    let outcome = client.upsert_entity("githubPackage", &entity("7")).await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Rejected(422));
}
