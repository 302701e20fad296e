use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use keystone_admin_rust::routes::app;
use keystone_admin_rust::state::AppState;
use keystone_admin_rust::testing::MemoryCredentialStore;

pub const SIGNING_KEY: &str = "integration-test-signing-key";

/// Build the full router over an in-memory credential store, seeded with the
/// standard fixtures used across the integration tests.
pub fn test_app() -> (Router, MemoryCredentialStore) {
    let store = MemoryCredentialStore::new();
    store.add_user("alice", "secret", true, &["ROOT"]);
    store.add_user("bob", "hunter2", true, &["USER"]);
    store.add_user("mallory", "secret", false, &["USER"]);

    let state = AppState::new(
        Arc::new(store.clone()),
        SIGNING_KEY.to_string(),
        1800,
        86400,
    );
    (app(state), store)
}

pub async fn body_json(response: Response) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

pub async fn login(app: &Router, name: &str, password: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("POST")
        .uri("/access-token")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "accountName": name, "accountPassword": password }).to_string(),
        ))?;

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let body = body_json(response).await?;
    Ok((status, body))
}

pub async fn get(app: &Router, uri: &str, bearer: Option<&str>) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let response = app.clone().oneshot(builder.body(Body::empty())?).await?;
    let status = response.status();
    let body = body_json(response).await?;
    Ok((status, body))
}
