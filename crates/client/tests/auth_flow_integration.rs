//! Integration tests for the authentication flows
//!
//! **Coverage:**
//! - Login: token adoption plus inline profile snapshot
//! - Token restore: identity fetch validates the provisional token
//! - Registration: generated credentials reach the wire intact
//! - Logout: best effort on the wire, local invalidation always
//! - 401 mid-session: exactly one request, then local-only failures

#[path = "support.rs"]
mod support;

use kaalition_client::{KaalitionError, Pages, SessionState};
use serde_json::json;
use support::{client_for, logged_in_account};
use wiremock::matchers::{body_partial_json, bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_yields_an_active_account_with_profile() {
    let server = MockServer::start().await;
    let account = logged_in_account(&server).await;

    assert!(account.is_active().await);
    assert_eq!(account.session().state().await, SessionState::Authenticated);

    let profile = account.profile().await.expect("snapshot from login");
    assert_eq!(profile.id, 1);
    assert_eq!(profile.username, "tester");
}

#[tokio::test]
async fn login_without_inline_user_falls_back_to_identity_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": support::TOKEN})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(bearer_token(support::TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": 7, "username": "restored", "nickname": "Restored" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let account = client_for(&server)
        .login("tester@example.com", "hunter2!A")
        .await
        .expect("login with identity fetch");

    let profile = account.profile().await.expect("snapshot from /me");
    assert_eq!(profile.id, 7);
}

#[tokio::test]
async fn from_token_rejects_a_stale_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthenticated"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .from_token("stale")
        .await
        .expect_err("stale token must not authenticate");
    assert!(matches!(err, KaalitionError::AuthExpired));
}

#[tokio::test]
async fn registration_sends_confirmation_and_authenticates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_partial_json(json!({"username": "freshuser"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": support::TOKEN,
            "user": { "id": 12, "username": "freshuser", "nickname": "Fresh" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = kaalition_client::Credentials {
        username: "freshuser".to_owned(),
        nickname: "Fresh".to_owned(),
        email: "fresh@example.com".to_owned(),
        password: "Str0ng!pass".to_owned(),
    };
    let account = client_for(&server)
        .register(&credentials)
        .await
        .expect("registration");
    assert!(account.is_active().await);
}

#[tokio::test]
async fn logout_invalidates_even_when_the_server_errors() {
    let server = MockServer::start().await;
    let account = logged_in_account(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    account.logout().await;
    assert!(!account.is_active().await);
    assert_eq!(account.session().state().await, SessionState::Invalidated);
}

#[tokio::test]
async fn refresh_updates_the_snapshot_or_reports_a_dead_session() {
    let server = MockServer::start().await;
    let account = logged_in_account(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": 1, "username": "tester", "nickname": "Renamed" },
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    assert!(account.refresh().await.expect("refresh"));
    assert_eq!(account.profile().await.unwrap().nickname, "Renamed");

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "expired"})))
        .mount(&server)
        .await;

    assert!(!account.refresh().await.expect("auth rejection is Ok(false)"));
    assert!(!account.is_active().await);
}

#[tokio::test]
async fn a_401_flips_the_session_and_later_calls_stay_local() {
    let server = MockServer::start().await;
    let account = logged_in_account(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/messages/chats"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "expired"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = account.chats(Pages::All).await.expect_err("401 surfaces");
    assert!(matches!(err, KaalitionError::AuthExpired));

    // Subsequent calls fail before reaching the wire.
    let before = server.received_requests().await.unwrap().len();
    let err = account.chats(Pages::All).await.expect_err("session is dead");
    assert!(matches!(err, KaalitionError::AuthExpired));
    assert_eq!(server.received_requests().await.unwrap().len(), before);
}
