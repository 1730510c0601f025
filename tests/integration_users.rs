mod common;

use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    authed_json_request, authed_request, create_test_user, generate_unique_email, json_request,
    obtain_credential, setup_test_app,
};

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let response = app
        .oneshot(json_request(
            "/api/users",
            "POST",
            json!({
                "first_name": "Grace",
                "last_name": "Hopper",
                "email": email
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["email"], email);
    assert_eq!(body["first_name"], "Grace");
    assert_eq!(body["is_admin"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_duplicate_email(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let payload = json!({
        "first_name": "Grace",
        "last_name": "Hopper",
        "email": email
    });

    let first = app
        .clone()
        .oneshot(json_request("/api/users", "POST", payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("/api/users", "POST", payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_missing_field(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(json_request(
            "/api/users",
            "POST",
            json!({ "last_name": "Hopper", "email": generate_unique_email() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_user_requires_authentication(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/users/1")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_can_read_own_record_but_not_others(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();
    let other_email = generate_unique_email();

    let mut tx = pool.begin().await.unwrap();
    let other_id = create_test_user(&mut tx, &other_email, false).await;
    tx.commit().await.unwrap();

    let credential = obtain_credential(&app, &pool, &email).await;
    let user_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(authed_request(
            &format!("/api/users/{user_id}"),
            "GET",
            &credential,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["email"], email);

    let response = app
        .oneshot(authed_request(
            &format!("/api/users/{other_id}"),
            "GET",
            &credential,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_can_read_any_user(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let admin_email = generate_unique_email();
    let other_email = generate_unique_email();

    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, &admin_email, true).await;
    let other_id = create_test_user(&mut tx, &other_email, false).await;
    tx.commit().await.unwrap();

    let credential = obtain_credential(&app, &pool, &admin_email).await;

    let response = app
        .oneshot(authed_request(
            &format!("/api/users/{other_id}"),
            "GET",
            &credential,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_can_update_own_names(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let credential = obtain_credential(&app, &pool, &email).await;
    let user_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();

    let response = app
        .oneshot(authed_json_request(
            &format!("/api/users/{user_id}"),
            "PUT",
            &credential,
            json!({ "first_name": "Ada" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["first_name"], "Ada");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_can_delete_user(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let admin_email = generate_unique_email();
    let other_email = generate_unique_email();

    let mut tx = pool.begin().await.unwrap();
    create_test_user(&mut tx, &admin_email, true).await;
    let other_id = create_test_user(&mut tx, &other_email, false).await;
    tx.commit().await.unwrap();

    let credential = obtain_credential(&app, &pool, &admin_email).await;

    let response = app
        .clone()
        .oneshot(authed_request(
            &format!("/api/users/{other_id}"),
            "DELETE",
            &credential,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(authed_request(
            &format!("/api/users/{other_id}"),
            "GET",
            &credential,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
