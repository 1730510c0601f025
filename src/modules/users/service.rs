use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;

use super::model::{CreateUserDto, UpdateUserDto, User};

const USER_COLUMNS: &str = "id, email, first_name, last_name, is_admin, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (first_name, last_name, email)
             VALUES ($1, $2, $3)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .fetch_one(db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::bad_request("Email already exists")
            }
            _ => AppError::internal(e),
        })?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, user_id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    #[instrument(skip(db))]
    pub async fn update_user(
        db: &PgPool,
        user_id: i64,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET first_name = COALESCE($1, first_name),
                 last_name = COALESCE($2, last_name),
                 updated_at = now()
             WHERE id = $3
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, user_id: i64) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::not_found("User not found"));
        }

        Ok(())
    }
}
