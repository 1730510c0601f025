use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::middleware::auth::AuthContext;
use crate::middleware::guards::{require_admin, require_course_teacher_or_admin};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Course, CreateCourseDto, UpdateCourseDto};
use super::service::CourseService;

/// List all courses
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses", body = Vec<Course>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state, _ctx))]
pub async fn list_courses(
    State(state): State<AppState>,
    _ctx: AuthContext,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_courses(&state.db).await?;
    Ok(Json(courses))
}

/// Create a course (admin only)
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state, ctx))]
pub async fn create_course(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    require_admin(&ctx)?;

    let course = CourseService::create_course(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Update a course (teacher of the course or admin)
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}",
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "The updated course", body = Course),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not a teacher of the course and not an admin", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state, ctx))]
pub async fn update_course(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(course_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    require_course_teacher_or_admin(&ctx, course_id)?;

    let course = CourseService::update_course(&state.db, course_id, dto).await?;
    Ok(Json(course))
}
