use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{create_course, list_courses, update_course};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/{course_id}", put(update_course))
}
