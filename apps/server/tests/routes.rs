use appwire_server::{Server, ServerConfig};
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::net::{IpAddr, Ipv4Addr};
use tower::ServiceExt;

fn server() -> Server {
    Server::builder()
        .config(ServerConfig {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8088,
            greeting: "Welcome".to_owned(),
            admin_token: Some("hunter2".to_owned()),
        })
        .build()
        .unwrap()
}

async fn get_json(server: &Server, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = server.router().clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[test]
fn test_address_comes_from_config() {
    assert_eq!(server().address().to_string(), "127.0.0.1:8088");
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(&server(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_config_masks_secrets() {
    let (status, body) = get_json(&server(), "/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["GREETING"], "Welcome");
    assert_eq!(body["PORT"], 8088);
    assert_eq!(body["ADMIN_TOKEN"], "********");
}

#[tokio::test]
async fn test_every_request_is_a_new_visit() {
    let server = server();

    let (_, first) = get_json(&server, "/hello/ada").await;
    let (_, second) = get_json(&server, "/hello/grace").await;

    assert_eq!(first["message"], "Welcome, ada!");
    assert_eq!(second["message"], "Welcome, grace!");
    assert_eq!(first["visit"], 1);
    assert_eq!(second["visit"], 2);
    assert_ne!(first["request"], second["request"]);
}
