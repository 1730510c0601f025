use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{AuthenticateRequest, LoginRequest};
use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};
use crate::modules::users::model::{CreateUserDto, UpdateUserDto, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::authenticate,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
    ),
    components(
        schemas(
            LoginRequest,
            AuthenticateRequest,
            User,
            CreateUserDto,
            UpdateUserDto,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Passwordless login via emailed one-time codes"),
        (name = "Users", description = "User management endpoints"),
        (name = "Courses", description = "Course management endpoints")
    ),
    info(
        title = "Gradebook API",
        version = "0.1.0",
        description = "A course/grading REST API built with Rust, Axum, and PostgreSQL featuring passwordless email-code authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
