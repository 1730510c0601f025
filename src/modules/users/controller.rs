use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::middleware::auth::AuthContext;
use crate::middleware::guards::require_self_or_admin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateUserDto, UpdateUserDto, User};
use super::service::UserService;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Email already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = UserService::create_user(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by id (self or admin)
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    responses(
        (status = 200, description = "The user", body = User),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the requested user and not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, ctx))]
pub async fn get_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<i64>,
) -> Result<Json<User>, AppError> {
    require_self_or_admin(&ctx, user_id)?;

    let user = UserService::get_user(&state.db, user_id).await?;
    Ok(Json(user))
}

/// Update a user's names (self or admin)
#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "The updated user", body = User),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the requested user and not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, ctx))]
pub async fn update_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    require_self_or_admin(&ctx, user_id)?;

    let user = UserService::update_user(&state.db, user_id, dto).await?;
    Ok(Json(user))
}

/// Delete a user (self or admin)
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the requested user and not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, ctx))]
pub async fn delete_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_self_or_admin(&ctx, user_id)?;

    UserService::delete_user(&state.db, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
