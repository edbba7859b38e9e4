//! Integration tests for attestation endpoints.
//!
//! These tests require a running PostgreSQL instance.
//! Set TEST_DATABASE_URL or use docker-compose.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_test_app, create_test_pool, create_test_post, get_request_with_auth,
    json_request_with_auth, parse_response_body, run_migrations, send, test_config, TestProfile,
};
use serde_json::json;

/// Creates a post and invites `member`, returning the post id.
async fn setup_post_with_member(
    app: &axum::Router,
    creator: &TestProfile,
    member: &TestProfile,
) -> String {
    let body = create_test_post(
        app,
        creator,
        json!({
            "type": "golf_round",
            "title": "Saturday Round",
            "date": "2025-06-01T08:00:00Z"
        }),
    )
    .await;
    let post_id = body["group_post"]["id"].as_str().unwrap().to_string();

    let response = send(
        app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_ids": [member.profile_id]}),
            &creator.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    post_id
}

async fn attest(
    app: &axum::Router,
    post_id: &str,
    profile: &TestProfile,
    status: &str,
) -> axum::http::Response<axum::body::Body> {
    send(
        app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/attest", post_id),
            json!({"status": status}),
            &profile.token,
        ),
    )
    .await
}

#[tokio::test]
async fn test_attest_by_non_participant_is_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let stranger = TestProfile::new();
    let member = TestProfile::new();
    let post_id = setup_post_with_member(&app, &creator, &member).await;

    let response = attest(&app, &post_id, &stranger, "confirmed").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_confirm_sets_attested_at() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let member = TestProfile::new();
    let post_id = setup_post_with_member(&app, &creator, &member).await;

    let response = attest(&app, &post_id, &member, "confirmed").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_response_body(response).await;
    assert_eq!(body["participant"]["status"], "confirmed");
    assert!(!body["participant"]["attested_at"].is_null());
    // The post rides along in the response.
    assert_eq!(body["group_post"]["id"], post_id);

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_decline_clears_attested_at() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let member = TestProfile::new();
    let post_id = setup_post_with_member(&app, &creator, &member).await;

    attest(&app, &post_id, &member, "confirmed").await;
    let response = attest(&app, &post_id, &member, "declined").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_response_body(response).await;
    assert_eq!(body["participant"]["status"], "declined");
    assert!(body["participant"]["attested_at"].is_null());

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_maybe_leaves_attested_at_untouched() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let member = TestProfile::new();
    let post_id = setup_post_with_member(&app, &creator, &member).await;

    // From confirmed: the timestamp survives.
    let response = attest(&app, &post_id, &member, "confirmed").await;
    let confirmed: serde_json::Value = parse_response_body(response).await;
    let stamp = confirmed["participant"]["attested_at"].clone();
    assert!(!stamp.is_null());

    let response = attest(&app, &post_id, &member, "maybe").await;
    let body: serde_json::Value = parse_response_body(response).await;
    assert_eq!(body["participant"]["status"], "maybe");
    assert_eq!(body["participant"]["attested_at"], stamp);

    // From declined: stays null.
    attest(&app, &post_id, &member, "declined").await;
    let response = attest(&app, &post_id, &member, "maybe").await;
    let body: serde_json::Value = parse_response_body(response).await;
    assert!(body["participant"]["attested_at"].is_null());

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_reattestation_is_idempotent() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let member = TestProfile::new();
    let post_id = setup_post_with_member(&app, &creator, &member).await;

    let response = attest(&app, &post_id, &member, "confirmed").await;
    assert_eq!(response.status(), StatusCode::OK);
    let first: serde_json::Value = parse_response_body(response).await;

    let response = attest(&app, &post_id, &member, "confirmed").await;
    assert_eq!(response.status(), StatusCode::OK);
    let second: serde_json::Value = parse_response_body(response).await;

    assert_eq!(first["participant"]["status"], second["participant"]["status"]);
    assert!(!second["participant"]["attested_at"].is_null());

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_attest_invalid_status_rejected() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let member = TestProfile::new();
    let post_id = setup_post_with_member(&app, &creator, &member).await;

    // Unknown status fails deserialization.
    let response = attest(&app, &post_id, &member, "perhaps").await;
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );

    // Pending is the initial state, never a target.
    let response = attest(&app, &post_id, &member, "pending").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_creator_starts_confirmed_and_may_reattest() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let member = TestProfile::new();
    let post_id = setup_post_with_member(&app, &creator, &member).await;

    let response = send(
        &app,
        get_request_with_auth(
            &format!("/api/v1/group-posts/{}/attest", post_id),
            &creator.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_response_body(response).await;
    assert_eq!(body["participant"]["role"], "creator");
    assert_eq!(body["participant"]["status"], "confirmed");
    assert!(!body["participant"]["attested_at"].is_null());

    // The creator can change their mind like anyone else.
    let response = attest(&app, &post_id, &creator, "maybe").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_response_body(response).await;
    assert_eq!(body["participant"]["status"], "maybe");

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_get_attestation_for_non_participant_is_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let stranger = TestProfile::new();
    let member = TestProfile::new();
    let post_id = setup_post_with_member(&app, &creator, &member).await;

    let response = send(
        &app,
        get_request_with_auth(
            &format!("/api/v1/group-posts/{}/attest", post_id),
            &stranger.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    common::cleanup_post(&pool, &post_id).await;
}
