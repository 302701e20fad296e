mod common;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::http::StatusCode;

use keystone_admin_rust::auth::{RoleHierarchy, SessionCache, TokenIssuer};
use keystone_admin_rust::routes::app;
use keystone_admin_rust::state::AppState;
use keystone_admin_rust::testing::MemoryCredentialStore;

#[tokio::test]
async fn login_returns_token_pair() -> Result<()> {
    let (app, _store) = common::test_app();

    let (status, body) = common::login(&app, "alice", "secret").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expiresInSeconds"], 1800);

    let access = body["accessToken"].as_str().unwrap();
    let refresh = body["refreshToken"].as_str().unwrap();
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());
    assert_ne!(access, refresh);
    Ok(())
}

#[tokio::test]
async fn login_failures_are_401_with_stable_codes() -> Result<()> {
    let (app, _store) = common::test_app();

    // Bad password
    let (status, body) = common::login(&app, "alice", "wrong").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 40108);

    // Unknown account: still 401, never 404
    let (status, body) = common::login(&app, "nobody", "secret").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 40106);

    // Disabled account
    let (status, body) = common::login(&app, "mallory", "secret").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 40107);
    Ok(())
}

#[tokio::test]
async fn whoami_reflects_session_identity() -> Result<()> {
    let (app, _store) = common::test_app();

    let (_, pair) = common::login(&app, "alice", "secret").await?;
    let access = pair["accessToken"].as_str().unwrap();

    let (status, body) = common::get(&app, "/api/auth/whoami", Some(access)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["principalName"], "alice");
    assert_eq!(body["roleCodes"][0], "ROOT");
    assert!(body["principalId"].is_string());
    Ok(())
}

#[tokio::test]
async fn protected_endpoint_rejects_anonymous_and_bad_tokens() -> Result<()> {
    let (app, _store) = common::test_app();

    // No header: anonymous reaches the handler, which requires an identity
    let (status, _) = common::get(&app, "/api/auth/whoami", None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Garbage token is malformed
    let (status, body) = common::get(&app, "/api/auth/whoami", Some("not.a.token")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 40101);
    Ok(())
}

#[tokio::test]
async fn refresh_token_is_rejected_by_the_gate() -> Result<()> {
    let (app, _store) = common::test_app();

    let (_, pair) = common::login(&app, "alice", "secret").await?;
    let refresh = pair["refreshToken"].as_str().unwrap();

    let (status, body) = common::get(&app, "/api/auth/whoami", Some(refresh)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 40104);
    Ok(())
}

#[tokio::test]
async fn access_token_is_rejected_by_refresh_endpoint() -> Result<()> {
    let (app, _store) = common::test_app();

    let (_, pair) = common::login(&app, "alice", "secret").await?;
    let access = pair["accessToken"].as_str().unwrap();

    let (status, body) = common::get(&app, &format!("/refresh-token/{}", access), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 40104);
    Ok(())
}

#[tokio::test]
async fn second_login_invalidates_first_session() -> Result<()> {
    let (app, _store) = common::test_app();

    let (_, first) = common::login(&app, "alice", "secret").await?;
    let (_, second) = common::login(&app, "alice", "secret").await?;

    let old_access = first["accessToken"].as_str().unwrap();
    let (status, body) = common::get(&app, "/api/auth/whoami", Some(old_access)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 40105);

    let new_access = second["accessToken"].as_str().unwrap();
    let (status, _) = common::get(&app, "/api/auth/whoami", Some(new_access)).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn refresh_rotates_the_pair() -> Result<()> {
    let (app, _store) = common::test_app();

    let (_, pair) = common::login(&app, "alice", "secret").await?;
    let old_access = pair["accessToken"].as_str().unwrap();
    let old_refresh = pair["refreshToken"].as_str().unwrap();

    let (status, rotated) = common::get(&app, &format!("/refresh-token/{}", old_refresh), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rotated["expiresInSeconds"], 1800);
    assert_ne!(rotated["accessToken"], pair["accessToken"]);

    // The consumed refresh token is superseded
    let (status, body) = common::get(&app, &format!("/refresh-token/{}", old_refresh), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 40105);

    // So is the old access token
    let (status, _) = common::get(&app, "/api/auth/whoami", Some(old_access)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The rotated pair works
    let new_access = rotated["accessToken"].as_str().unwrap();
    let (status, _) = common::get(&app, "/api/auth/whoami", Some(new_access)).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

// End-to-end: login -> protected call -> access expiry -> refresh -> old pair dead.
//
// Access tokens here live one second while the session entry stays live, so
// the expiry step observes the token's own expiry rather than cache eviction.
#[tokio::test]
async fn end_to_end_expiry_and_refresh() -> Result<()> {
    let store = MemoryCredentialStore::new();
    store.add_user("alice", "secret", true, &["ROOT"]);

    let sessions = Arc::new(SessionCache::new(3600));
    let issuer = Arc::new(TokenIssuer::new(
        Arc::new(store.clone()),
        sessions.clone(),
        common::SIGNING_KEY.to_string(),
        1,
        86400,
    ));
    let state = AppState {
        issuer,
        sessions,
        hierarchy: Arc::new(RoleHierarchy::builtin()),
        signing_key: common::SIGNING_KEY.to_string(),
    };
    let app = app(state);

    let (status, pair) = common::login(&app, "alice", "secret").await?;
    assert_eq!(status, StatusCode::OK);
    let access = pair["accessToken"].as_str().unwrap();

    // Works while fresh
    let (status, _) = common::get(&app, "/api/auth/whoami", Some(access)).await?;
    assert_eq!(status, StatusCode::OK);

    // Wait out the access TTL
    tokio::time::sleep(Duration::from_secs(2)).await;
    let (status, body) = common::get(&app, "/api/auth/whoami", Some(access)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 40103);

    // The still-cached refresh token mints a new pair
    let refresh = pair["refreshToken"].as_str().unwrap();
    let (status, rotated) = common::get(&app, &format!("/refresh-token/{}", refresh), None).await?;
    assert_eq!(status, StatusCode::OK);

    let new_access = rotated["accessToken"].as_str().unwrap();
    let (status, _) = common::get(&app, "/api/auth/whoami", Some(new_access)).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}
