#![allow(clippy::unwrap_used)]
// Integration tests for `SdwanClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use copylan_api::{Error, SdwanClient, ServiceAccount};

// ── Helpers ─────────────────────────────────────────────────────────

fn account() -> ServiceAccount {
    ServiceAccount {
        client_id: "svc@1234.iam.panserviceaccount.com".into(),
        client_secret: SecretString::from("s3cret".to_string()),
        tsg_id: "1234".into(),
    }
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .and(header_exists("authorization"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("scope=tsg_id%3A1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-abc",
            "token_type": "Bearer",
            "expires_in": 899
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sdwan/v2.1/api/profile"))
        .and(header("authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenant_id": "1234",
            "email": "svc@1234.iam.panserviceaccount.com"
        })))
        .mount(server)
        .await;
}

/// Start a mock controller (serving both the token and resource APIs) and log in.
async fn setup() -> (MockServer, SdwanClient) {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let base = Url::parse(&server.uri()).unwrap();
    let client = SdwanClient::with_client(reqwest::Client::new(), base.clone(), base);
    client.login(&account()).await.unwrap();
    (server, client)
}

fn element_path(suffix: &str) -> String {
    format!("/sdwan/v4.18/api/sites/s1/elements/e1/{suffix}")
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_sets_tenant() {
    let (_server, client) = setup().await;
    assert_eq!(client.tenant_id().as_deref(), Some("1234"));
}

#[tokio::test]
async fn test_login_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client"
        })))
        .mount(&server)
        .await;

    let base = Url::parse(&server.uri()).unwrap();
    let client = SdwanClient::with_client(reqwest::Client::new(), base.clone(), base);
    let result = client.login(&account()).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(client.tenant_id().is_none());
}

#[tokio::test]
async fn test_login_profile_without_tenant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-abc"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sdwan/v2.1/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let base = Url::parse(&server.uri()).unwrap();
    let client = SdwanClient::with_client(reqwest::Client::new(), base.clone(), base);
    let result = client.login(&account()).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("tenant"), "unexpected message: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_requests_before_login_fail() {
    let server = MockServer::start().await;
    let base = Url::parse(&server.uri()).unwrap();
    let client = SdwanClient::with_client(reqwest::Client::new(), base.clone(), base);

    let result = client.list_elements().await;
    assert!(matches!(result, Err(Error::NotAuthenticated)));
}

// ── Element tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_elements() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/sdwan/v3.0/api/elements"))
        .and(header("authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "items": [
                { "id": "e1", "name": "branch-a", "site_id": "s1", "model_name": "ion 3000", "_etag": 4 },
                { "id": "e2", "name": "branch-b", "site_id": "s2", "model_name": "ion 3200" }
            ]
        })))
        .mount(&server)
        .await;

    let elements = client.list_elements().await.unwrap();

    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].name.as_deref(), Some("branch-a"));
    assert_eq!(elements[0].site_id.as_deref(), Some("s1"));
    assert_eq!(elements[1].model_name.as_deref(), Some("ion 3200"));
    assert_eq!(elements[0].extra["_etag"], 4);
}

// ── Interface tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_list_interfaces() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(element_path("interfaces")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "items": [
                { "id": "i1", "name": "5", "type": "port", "used_for": "lan" },
                { "id": "i2", "name": "5.10", "type": "subinterface", "used_for": "lan", "parent": "i1" }
            ]
        })))
        .mount(&server)
        .await;

    let interfaces = client.list_interfaces("s1", "e1").await.unwrap();

    assert_eq!(interfaces.len(), 2);
    assert_eq!(interfaces[1].parent(), Some("i1"));
    assert_eq!(interfaces[1].interface_type(), Some("subinterface"));
}

#[tokio::test]
async fn test_list_interfaces_tolerates_null_name() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(element_path("interfaces")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "items": [
                { "id": "i1", "name": null, "type": "port", "parent": null },
                { "id": "i2", "name": "vlan10", "type": "vlan", "used_for": "lan" }
            ]
        })))
        .mount(&server)
        .await;

    let interfaces = client.list_interfaces("s1", "e1").await.unwrap();

    assert_eq!(interfaces.len(), 2);
    assert_eq!(interfaces[0].name(), "");
    assert_eq!(interfaces[0].as_map()["parent"], serde_json::Value::Null);
    assert_eq!(interfaces[1].name(), "vlan10");
}

#[tokio::test]
async fn test_create_interface_sends_payload() {
    let (server, client) = setup().await;

    let payload = json!({ "name": "vlan20", "type": "vlan", "used_for": "lan" });

    Mock::given(method("POST"))
        .and(path(element_path("interfaces")))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "new1", "name": "vlan20", "type": "vlan", "used_for": "lan"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.create_interface("s1", "e1", &payload).await.unwrap();
}

#[tokio::test]
async fn test_write_ignores_response_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(element_path("interfaces")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "name": null })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/sdwan/v2.3/api/sites/s1/elements/e1/staticroutes/r1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .create_interface("s1", "e1", &json!({ "name": "vlan20" }))
        .await
        .unwrap();
    client
        .update_static_route("s1", "e1", "r1", &json!({ "destination_prefix": "10.0.0.0/8" }))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_interface_targets_id() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(element_path("interfaces/d1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "d1", "name": "vlan10"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_interface("s1", "e1", "d1", &json!({ "name": "vlan10" }))
        .await
        .unwrap();
}

// ── Static route tests ──────────────────────────────────────────────

#[tokio::test]
async fn test_list_static_routes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/sdwan/v2.3/api/sites/s1/elements/e1/staticroutes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "items": [{
                "id": "r1",
                "destination_prefix": "10.0.0.0/8",
                "nexthops": [{ "nexthop_ip": "192.168.1.1", "nexthop_interface_id": "i1" }]
            }]
        })))
        .mount(&server)
        .await;

    let routes = client.list_static_routes("s1", "e1").await.unwrap();

    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].id(), "r1");
    assert_eq!(routes[0].destination_prefix(), "10.0.0.0/8");
    assert_eq!(routes[0].as_map()["nexthops"][0]["nexthop_interface_id"], "i1");
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_structured_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/sdwan/v2.3/api/sites/s1/elements/e1/staticroutes"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "_error": [{ "code": "STATICROUTE_CONFIG_INVALID", "message": "Invalid nexthop" }]
        })))
        .mount(&server)
        .await;

    let result = client
        .create_static_route("s1", "e1", &json!({ "destination_prefix": "10.0.0.0/8" }))
        .await;

    match result {
        Err(Error::Api {
            status,
            ref message,
            ref code,
        }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid nexthop");
            assert_eq!(code.as_deref(), Some("STATICROUTE_CONFIG_INVALID"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unstructured_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(element_path("interfaces")))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let result = client.list_interfaces("s1", "e1").await;

    match result {
        Err(Error::Api { status, ref message, .. }) => {
            assert_eq!(status, 502);
            assert!(message.contains("upstream"), "unexpected message: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/sdwan/v3.0/api/elements"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_elements().await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}
