use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};
use tower::ServiceExt;

use gradebook::config::auth::AuthConfig;
use gradebook::config::cors::CorsConfig;
use gradebook::config::email::EmailConfig;
use gradebook::router::init_router;
use gradebook::state::AppState;

pub async fn setup_test_app(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        auth_config: AuthConfig::from_env(),
        email_config: EmailConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", uuid::Uuid::new_v4())
}

#[allow(dead_code)]
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    is_admin: bool,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (email, first_name, last_name, is_admin)
         VALUES ($1, 'Test', 'User', $2)
         RETURNING id",
    )
    .bind(email)
    .bind(is_admin)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_course(tx: &mut Transaction<'_, Postgres>, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO courses (name, course_details) VALUES ($1, 'Test course') RETURNING id",
    )
    .bind(name)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn enroll_as_teacher(tx: &mut Transaction<'_, Postgres>, user_id: i64, course_id: i64) {
    sqlx::query(
        "INSERT INTO course_enrollments (user_id, course_id, role) VALUES ($1, $2, 'TEACHER')",
    )
    .bind(user_id)
    .bind(course_id)
    .execute(&mut **tx)
    .await
    .unwrap();
}

/// Reads the most recently issued login code for an email straight from the
/// store, standing in for the email channel (SMTP is disabled in tests).
#[allow(dead_code)]
pub async fn fetch_email_code(pool: &PgPool, email: &str) -> String {
    sqlx::query_scalar::<_, String>(
        "SELECT t.email_code
         FROM tokens t
         JOIN users u ON u.id = t.user_id
         WHERE u.email = $1 AND t.token_kind = 'EMAIL_CODE'
         ORDER BY t.id DESC
         LIMIT 1",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub fn json_request(uri: &str, method: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_request(uri: &str, method: &str, credential: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {credential}"))
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn authed_json_request(
    uri: &str,
    method: &str,
    credential: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {credential}"))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Runs the full passwordless flow for an email and returns the issued
/// credential from the `Authorization` response header.
#[allow(dead_code)]
pub async fn obtain_credential(app: &Router, pool: &PgPool, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "/api/auth/login",
            "POST",
            json!({ "email": email }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let code = fetch_email_code(pool, email).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "/api/auth/authenticate",
            "POST",
            json!({ "email": email, "email_code": code }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    response
        .headers()
        .get(header::AUTHORIZATION)
        .expect("credential header missing")
        .to_str()
        .unwrap()
        .to_string()
}
