//! Integration tests for participant management endpoints.
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

async fn setup_post(
    app: &axum::Router,
    creator: &TestProfile,
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
    body["group_post"]["id"].as_str().unwrap().to_string()
}

// ============================================================================
// Adding participants
// ============================================================================

#[tokio::test]
async fn test_add_participants_success() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let a = TestProfile::new();
    let b = TestProfile::new();
    let post_id = setup_post(&app, &creator).await;

    let response = send(
        &app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_ids": [a.profile_id, b.profile_id]}),
            &creator.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = parse_response_body(response).await;
    let rows = body["participants"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["role"], "participant");
        assert_eq!(row["status"], "pending");
        assert!(row["attested_at"].is_null());
    }

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_add_duplicate_participant_conflicts_whole_batch() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let a = TestProfile::new();
    let b = TestProfile::new();
    let post_id = setup_post(&app, &creator).await;

    let response = send(
        &app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_ids": [a.profile_id]}),
            &creator.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Second batch contains an id already on the post: the whole batch
    // fails and the fresh id is not inserted either.
    let response = send(
        &app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_ids": [b.profile_id, a.profile_id]}),
            &creator.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        get_request_with_auth(
            &format!("/api/v1/group-posts/{}/participants", post_id),
            &creator.token,
        ),
    )
    .await;
    let listed: serde_json::Value = parse_response_body(response).await;
    let profile_ids: Vec<&str> = listed["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["profile_id"].as_str().unwrap())
        .collect();
    assert!(profile_ids.contains(&a.profile_id.to_string().as_str()));
    assert!(!profile_ids.contains(&b.profile_id.to_string().as_str()));

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_organizer_can_add_participants() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let organizer = TestProfile::new();
    let invitee = TestProfile::new();
    let post_id = setup_post(&app, &creator).await;

    let response = send(
        &app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_ids": [organizer.profile_id], "role": "organizer"}),
            &creator.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_ids": [invitee.profile_id]}),
            &organizer.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_plain_participant_cannot_add() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let member = TestProfile::new();
    let invitee = TestProfile::new();
    let post_id = setup_post(&app, &creator).await;

    send(
        &app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_ids": [member.profile_id]}),
            &creator.token,
        ),
    )
    .await;

    let response = send(
        &app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_ids": [invitee.profile_id]}),
            &member.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_add_participants_rejects_creator_role() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let other = TestProfile::new();
    let post_id = setup_post(&app, &creator).await;

    let response = send(
        &app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_ids": [other.profile_id], "role": "creator"}),
            &creator.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_add_participants_to_missing_post() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let profile = TestProfile::new();

    let response = send(
        &app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", uuid::Uuid::new_v4()),
            json!({"participant_ids": [uuid::Uuid::new_v4()]}),
            &profile.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Removing participants
// ============================================================================

#[tokio::test]
async fn test_remove_participant_by_creator() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let member = TestProfile::new();
    let post_id = setup_post(&app, &creator).await;

    send(
        &app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_ids": [member.profile_id]}),
            &creator.token,
        ),
    )
    .await;

    let response = send(
        &app,
        json_request_with_auth(
            Method::DELETE,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_id": member.profile_id}),
            &creator.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_remove_creator_always_rejected() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let organizer = TestProfile::new();
    let post_id = setup_post(&app, &creator).await;

    send(
        &app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_ids": [organizer.profile_id], "role": "organizer"}),
            &creator.token,
        ),
    )
    .await;

    // Not by an organizer.
    let response = send(
        &app,
        json_request_with_auth(
            Method::DELETE,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_id": creator.profile_id}),
            &organizer.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Not even by the creator themself.
    let response = send(
        &app,
        json_request_with_auth(
            Method::DELETE,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_id": creator.profile_id}),
            &creator.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_participant_can_remove_themself() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let member = TestProfile::new();
    let post_id = setup_post(&app, &creator).await;

    send(
        &app,
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_ids": [member.profile_id]}),
            &creator.token,
        ),
    )
    .await;

    let response = send(
        &app,
        json_request_with_auth(
            Method::DELETE,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_id": member.profile_id}),
            &member.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    common::cleanup_post(&pool, &post_id).await;
}

#[tokio::test]
async fn test_remove_missing_participant_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    let creator = TestProfile::new();
    let post_id = setup_post(&app, &creator).await;

    let response = send(
        &app,
        json_request_with_auth(
            Method::DELETE,
            &format!("/api/v1/group-posts/{}/participants", post_id),
            json!({"participant_id": uuid::Uuid::new_v4()}),
            &creator.token,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    common::cleanup_post(&pool, &post_id).await;
}
