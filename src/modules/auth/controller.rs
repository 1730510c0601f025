use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::instrument;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{AuthenticateRequest, LoginRequest};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request a one-time login code by email
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login code issued and sent"),
        (status = 422, description = "Invalid email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<StatusCode, AppError> {
    let email_service = EmailService::new(state.email_config.clone());
    AuthService::request_login_code(&state.db, &state.auth_config, &email_service, dto).await?;
    Ok(StatusCode::OK)
}

/// Exchange a login code for an API credential
///
/// On success the credential is returned in the `Authorization` response
/// header; clients replay it as a bearer token on every subsequent request.
#[utoipa::path(
    post,
    path = "/api/auth/authenticate",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "Credential issued in the Authorization header"),
        (status = 401, description = "Invalid or expired login code", body = ErrorResponse),
        (status = 422, description = "Invalid request shape", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn authenticate(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<AuthenticateRequest>,
) -> Result<Response, AppError> {
    let token = AuthService::authenticate(&state.db, &state.auth_config, dto).await?;
    Ok((StatusCode::OK, [(header::AUTHORIZATION, token)]).into_response())
}
