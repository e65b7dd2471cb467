//! Shared harness: boots the gateway on an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;

use seating_gateway::app_state::{AppState, build_app};
use seating_gateway::config::GatewayConfig;

/// Starts an in-memory gateway on `127.0.0.1:0` and returns its address.
pub async fn spawn_server() -> SocketAddr {
    let config = GatewayConfig::default();
    let app = build_app(AppState::from_config(&config));
    let listener = tokio_test::assert_ok!(tokio::net::TcpListener::bind("127.0.0.1:0").await);
    let addr = tokio_test::assert_ok!(listener.local_addr());
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            eprintln!("test server stopped: {err}");
        }
    });
    addr
}

/// Base URL of the versioned REST API.
pub fn api(addr: SocketAddr) -> String {
    format!("http://{addr}/api/v1")
}

/// Creates a chart and returns its id.
pub async fn create_chart(client: &reqwest::Client, addr: SocketAddr, name: &str) -> String {
    let resp = tokio_test::assert_ok!(
        client
            .post(format!("{}/charts", api(addr)))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
    );
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    let body: serde_json::Value = tokio_test::assert_ok!(resp.json().await);
    body["chart_id"].as_str().unwrap_or_default().to_string()
}

/// Adds a table of `shape` and returns the created table.
pub async fn add_table(
    client: &reqwest::Client,
    addr: SocketAddr,
    chart_id: &str,
    shape: &str,
) -> serde_json::Value {
    let resp = tokio_test::assert_ok!(
        client
            .post(format!("{}/charts/{chart_id}/tables", api(addr)))
            .json(&serde_json::json!({ "shape": shape }))
            .send()
            .await
    );
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    tokio_test::assert_ok!(resp.json().await)
}

/// Adds a guest and returns the created guest.
pub async fn add_guest(
    client: &reqwest::Client,
    addr: SocketAddr,
    chart_id: &str,
    name: &str,
) -> serde_json::Value {
    let resp = tokio_test::assert_ok!(
        client
            .post(format!("{}/charts/{chart_id}/guests", api(addr)))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
    );
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    tokio_test::assert_ok!(resp.json().await)
}

/// Fetches the full chart state.
pub async fn chart_state(
    client: &reqwest::Client,
    addr: SocketAddr,
    chart_id: &str,
) -> serde_json::Value {
    let resp = tokio_test::assert_ok!(
        client
            .get(format!("{}/charts/{chart_id}", api(addr)))
            .send()
            .await
    );
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    tokio_test::assert_ok!(resp.json().await)
}
