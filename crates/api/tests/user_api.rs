//! HTTP-level integration tests for the `/api/users` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, delete, get, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user_returns_201_with_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/users",
        serde_json::json!({"username": "alice", "email": "alice@example.com"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "User created successfully");
    assert!(json.get("error").is_none());
    assert_eq!(json["data"]["username"], "alice");
    assert_eq!(json["data"]["email"], "alice@example.com");
    assert!(json["data"]["id"].is_number());
    assert!(json["data"]["created_at"].is_string());
    assert!(json["data"]["updated_at"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_created_user_round_trips(pool: PgPool) {
    let created = create_user(&pool, "bob", "bob@example.com").await;
    let id = created["id"].as_i64().unwrap();

    let response = get(common::build_test_app(pool), &format!("/api/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], created);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_partial_update_keeps_other_fields(pool: PgPool) {
    let created = create_user(&pool, "carol", "carol@example.com").await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/users/{id}"),
        serde_json::json!({"username": "caroline"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "User updated successfully");
    assert_eq!(json["data"]["username"], "caroline");
    assert_eq!(json["data"]["email"], "carol@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_update_is_rejected(pool: PgPool) {
    let created = create_user(&pool, "dave", "dave@example.com").await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/users/{id}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "at least one field required");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_username_length_boundary(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/users",
        serde_json::json!({"username": "ab", "email": "ab@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json.get("data").is_none());

    let response = post_json(
        common::build_test_app(pool),
        "/api/users",
        serde_json::json!({"username": "abc", "email": "abc@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_email_and_unknown_fields_are_rejected(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/users",
        serde_json::json!({"username": "erin", "email": "not-an-email"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "email must be a valid email address"
    );

    let response = post_json(
        common::build_test_app(pool),
        "/api/users",
        serde_json::json!({"username": "erin", "email": "erin@example.com", "admin": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_first_violation_follows_field_order(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/users",
        serde_json::json!({"username": "x", "email": "bad"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "username must be between 3 and 50 characters"
    );
}

// ---------------------------------------------------------------------------
// Conflicts and not-found
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_email_returns_409_and_keeps_one_row(pool: PgPool) {
    create_user(&pool, "frank", "frank@example.com").await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/users",
        serde_json::json!({"username": "frank2", "email": "frank@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "CONFLICT");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("frank@example.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_to_taken_email_returns_409(pool: PgPool) {
    create_user(&pool, "gina", "gina@example.com").await;
    let other = create_user(&pool, "hank", "hank@example.com").await;
    let id = other["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/users/{id}"),
        serde_json::json!({"email": "gina@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_user_is_404_for_get_put_delete(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/users/99999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User with id 99999 not found");
    assert_eq!(json["success"], false);

    let response = put_json(
        common::build_test_app(pool.clone()),
        "/api/users/99999",
        serde_json::json!({"username": "nobody"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["message"],
        "User with id 99999 not found"
    );

    let response = delete(common::build_test_app(pool.clone()), "/api/users/99999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_of_missing_user_with_taken_email_is_404(pool: PgPool) {
    create_user(&pool, "alice", "alice@example.com").await;

    let response = put_json(
        common::build_test_app(pool),
        "/api/users/99999",
        serde_json::json!({"email": "alice@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "User with id 99999 not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_numeric_id_is_400(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/users/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_user_lifecycle_scenario(pool: PgPool) {
    let body = serde_json::json!({"username": "ivan", "email": "ivan@example.com"});

    let response = post_json(common::build_test_app(pool.clone()), "/api/users", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(common::build_test_app(pool.clone()), "/api/users", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(common::build_test_app(pool.clone()), "/api/users/99999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User deleted successfully");
    assert!(json.get("data").is_none());

    let response = get(common::build_test_app(pool), &format!("/api/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_pagination_block(pool: PgPool) {
    for i in 0..7 {
        create_user(&pool, &format!("user{i}"), &format!("user{i}@example.com")).await;
    }

    let response = get(common::build_test_app(pool.clone()), "/api/users?page=2&limit=3").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"]["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(json["data"]["pagination"]["page"], 2);
    assert_eq!(json["data"]["pagination"]["limit"], 3);
    assert_eq!(json["data"]["pagination"]["total"], 7);
    assert_eq!(json["data"]["pagination"]["totalPages"], 3);

    // Newest first: page 1 starts with the last user created.
    let response = get(common::build_test_app(pool.clone()), "/api/users?limit=3").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["data"][0]["username"], "user6");

    let response = get(common::build_test_app(pool), "/api/users?page=3&limit=3").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_defaults_and_empty_table(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/users").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["data"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["pagination"]["page"], 1);
    assert_eq!(json["data"]["pagination"]["limit"], 10);
    assert_eq!(json["data"]["pagination"]["total"], 0);
    assert_eq!(json["data"]["pagination"]["totalPages"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_limit_above_max_is_clamped(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/users?limit=101").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["pagination"]["limit"], 100);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_page_values_are_rejected(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/users?page=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "page must be a positive integer"
    );

    let response = get(common::build_test_app(pool.clone()), "/api/users?page=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(common::build_test_app(pool), "/api/users?limit=1.5").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
