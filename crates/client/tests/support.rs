//! Shared helpers for the wiremock integration tests

#![allow(dead_code)]

use kaalition_client::{Account, ClientConfig, PublicClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "tok-integration";

/// A client pointed at the mock server instead of kaalition.ru.
pub fn client_for(server: &MockServer) -> PublicClient {
    let config = ClientConfig::with_base_url(server.uri()).expect("mock server uri is valid");
    PublicClient::with_config(config).expect("client construction")
}

/// The JSON body a successful login answers with.
pub fn login_body(user_id: i64) -> Value {
    json!({
        "token": TOKEN,
        "user": { "id": user_id, "username": "tester", "nickname": "Tester" },
    })
}

/// Mount a login mock and authenticate against it.
pub async fn logged_in_account(server: &MockServer) -> Account {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body(1)))
        .mount(server)
        .await;

    client_for(server)
        .login("tester@example.com", "hunter2!A")
        .await
        .expect("login against mock")
}
