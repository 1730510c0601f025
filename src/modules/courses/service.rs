use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;

use super::model::{Course, CreateCourseDto, UpdateCourseDto};

const COURSE_COLUMNS: &str = "id, name, course_details, created_at, updated_at";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn list_courses(db: &PgPool) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY id"
        ))
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (name, course_details)
             VALUES ($1, $2)
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.course_details)
        .fetch_one(db)
        .await?;

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn update_course(
        db: &PgPool,
        course_id: i64,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses
             SET name = COALESCE($1, name),
                 course_details = COALESCE($2, course_details),
                 updated_at = now()
             WHERE id = $3
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.course_details)
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Course not found"))
    }
}
