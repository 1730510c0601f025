use std::collections::HashSet;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::warn;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::token::verify_api_token;

/// Request-scoped authorization facts, rebuilt on every request.
///
/// The admin flag and taught-course set are read from the store at
/// validation time, so changes to a user's privileges apply on their next
/// request without reissuing the credential.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub token_id: i64,
    pub user_id: i64,
    pub is_admin: bool,
    pub teaches_course_ids: HashSet<i64>,
}

#[derive(sqlx::FromRow)]
struct TokenOwnerRow {
    id: i64,
    user_id: i64,
    is_admin: bool,
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_api_token(token, &state.auth_config)?;

        // A missing row and an invalidated row are deliberately
        // indistinguishable to the caller. Expiry of an API token is enforced
        // by clearing `valid`, not re-checked against `expires_at` here.
        let row = sqlx::query_as::<_, TokenOwnerRow>(
            "SELECT t.id, t.user_id, u.is_admin
             FROM tokens t
             JOIN users u ON u.id = t.user_id
             WHERE t.id = $1 AND t.valid = TRUE",
        )
        .bind(claims.token_id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| {
            warn!(error = %e, "token lookup failed");
            AppError::unauthorized("Invalid credentials")
        })?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        let teaches_course_ids: Vec<i64> = sqlx::query_scalar(
            "SELECT course_id FROM course_enrollments WHERE user_id = $1 AND role = 'TEACHER'",
        )
        .bind(row.user_id)
        .fetch_all(&state.db)
        .await
        .map_err(|e| {
            warn!(error = %e, "taught-course lookup failed");
            AppError::unauthorized("Invalid credentials")
        })?;

        Ok(AuthContext {
            token_id: row.id,
            user_id: row.user_id,
            is_admin: row.is_admin,
            teaches_course_ids: teaches_course_ids.into_iter().collect(),
        })
    }
}
