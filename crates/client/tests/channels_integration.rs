//! Integration tests for channel operations
//!
//! **Coverage:**
//! - Directory paging and explicit single-page fetches
//! - Soft absence: a 404 channel lookup is `Ok(None)`
//! - Create/update/delete with enveloped responses
//! - Membership and role assignment
//! - Posts, pinning, and post reactions

#[path = "support.rs"]
mod support;

use kaalition_client::{ChannelRole, ChannelUpdate, NewChannel, Pages};
use serde_json::json;
use support::logged_in_account;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn directory_respects_an_explicit_page() {
    let server = MockServer::start().await;
    let account = logged_in_account(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/channels"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": 31, "name": "late arrivals" }],
            "has_more": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let channels = account.channels(Pages::Only(3)).await.expect("page 3");
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].id, 31);
}

#[tokio::test]
async fn missing_channel_is_none_but_server_faults_are_errors() {
    let server = MockServer::start().await;
    let account = logged_in_account(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/channels/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/channels/500"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    assert!(account.channel(404).await.expect("soft absence").is_none());
    assert!(account.channel(500).await.is_err());
}

#[tokio::test]
async fn channel_lifecycle_round_trip() {
    let server = MockServer::start().await;
    let account = logged_in_account(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/channels"))
        .and(body_json(json!({"name": "lounge"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "channel": { "id": 8, "name": "lounge", "owner": 1, "is_public": true },
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/channels/8"))
        .and(body_json(json!({"description": "slow chat"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "channel": { "id": 8, "name": "lounge", "description": "slow chat", "owner": 1 },
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/channels/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let created = account
        .create_channel(&NewChannel::named("lounge"))
        .await
        .expect("create");
    assert_eq!(created.id, 8);
    assert_eq!(created.owner.id, 1);

    let update = ChannelUpdate {
        description: Some("slow chat".to_owned()),
        ..ChannelUpdate::default()
    };
    let updated = account.update_channel(8, &update).await.expect("update");
    assert_eq!(updated.description, "slow chat");

    assert!(account.delete_channel(8).await.expect("delete"));
}

#[tokio::test]
async fn membership_and_roles() {
    let server = MockServer::start().await;
    let account = logged_in_account(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/channels/8/join"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/channels/8/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "user": { "id": 1, "username": "owner" }, "role": "owner" },
            { "user": { "id": 2, "username": "newbie" }, "role": "member" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/channels/8/members/2/role"))
        .and(body_json(json!({"role": "admin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(account.join_channel(8).await.expect("join"));

    let members = account.members(8, Pages::All).await.expect("roster");
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].role, ChannelRole::Owner);
    assert_eq!(members[1].role, ChannelRole::Member);

    assert!(account
        .set_member_role(8, 2, ChannelRole::Admin)
        .await
        .expect("promote"));
}

#[tokio::test]
async fn posts_pins_and_reactions() {
    let server = MockServer::start().await;
    let account = logged_in_account(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/channels/8/messages"))
        .and(body_json(json!({"message": "first post"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": 100, "channel_id": 8, "author": 1, "message": "first post" },
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/channels/8/messages/100/pin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/channels/8/messages/100/reactions"))
        .and(body_json(json!({"emoji": "🔥"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reactions": [{ "emoji": "🔥", "count": 1, "user_ids": [1] }],
        })))
        .mount(&server)
        .await;

    let post = account.create_post(8, "first post").await.expect("post");
    assert_eq!(post.id, 100);

    assert!(account.toggle_pin(8, 100).await.expect("pin"));

    let reactions = account
        .toggle_post_reaction(8, 100, "🔥")
        .await
        .expect("react");
    assert_eq!(reactions[0].emoji, "🔥");
}
