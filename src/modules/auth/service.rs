use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sqlx::PgPool;
use tracing::{error, instrument};

use crate::config::auth::AuthConfig;
use crate::utils::email::EmailService;
use crate::utils::errors::AppError;
use crate::utils::token::sign_api_token;

use super::model::{AuthenticateRequest, LoginRequest};

pub struct AuthService;

#[derive(sqlx::FromRow)]
struct EmailCodeRow {
    id: i64,
    valid: bool,
    expires_at: DateTime<Utc>,
    user_id: i64,
    email: String,
}

impl AuthService {
    /// Issues a one-time login code for the given email.
    ///
    /// The user is created on first request (the unique constraint on
    /// `users.email` makes this idempotent under concurrent first-time
    /// requests). The code row commits before delivery is attempted; a
    /// delivery failure is logged but does not fail the request, since the
    /// code is already usable.
    #[instrument(skip(db, auth_config, email_service))]
    pub async fn request_login_code(
        db: &PgPool,
        auth_config: &AuthConfig,
        email_service: &EmailService,
        dto: LoginRequest,
    ) -> Result<(), AppError> {
        let code = generate_login_code();
        let expires_at = Utc::now() + Duration::minutes(auth_config.email_code_expiry_mins);

        let mut tx = db.begin().await?;

        sqlx::query("INSERT INTO users (email) VALUES ($1) ON CONFLICT (email) DO NOTHING")
            .bind(&dto.email)
            .execute(&mut *tx)
            .await?;

        // Refetch rather than RETURNING: the insert is a no-op when the user
        // already exists, or when a concurrent request created them first.
        let user_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO tokens (token_kind, email_code, expires_at, user_id)
             VALUES ('EMAIL_CODE', $1, $2, $3)",
        )
        .bind(&code)
        .bind(expires_at)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        if let Err(e) = email_service.send_login_code(&dto.email, &code).await {
            error!(error = ?e, "failed to deliver login code");
        }

        Ok(())
    }

    /// Redeems a login code for a signed API credential.
    ///
    /// Apart from the expired case, every rejection uses the same generic
    /// message so the response doesn't reveal which check failed or whether
    /// an email is registered.
    #[instrument(skip_all)]
    pub async fn authenticate(
        db: &PgPool,
        auth_config: &AuthConfig,
        dto: AuthenticateRequest,
    ) -> Result<String, AppError> {
        let row = sqlx::query_as::<_, EmailCodeRow>(
            "SELECT t.id, t.valid, t.expires_at, t.user_id, u.email
             FROM tokens t
             JOIN users u ON u.id = t.user_id
             WHERE t.email_code = $1",
        )
        .bind(&dto.email_code)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid login code"))?;

        if !row.valid {
            return Err(AppError::unauthorized("Invalid login code"));
        }

        if row.expires_at < Utc::now() {
            return Err(AppError::unauthorized("Login code expired"));
        }

        if row.email != dto.email {
            return Err(AppError::unauthorized("Invalid login code"));
        }

        let mut tx = db.begin().await?;

        let api_token_id: i64 = sqlx::query_scalar(
            "INSERT INTO tokens (token_kind, expires_at, user_id)
             VALUES ('API', $1, $2)
             RETURNING id",
        )
        .bind(Utc::now() + Duration::hours(auth_config.api_token_expiry_hours))
        .bind(row.user_id)
        .fetch_one(&mut *tx)
        .await?;

        // One-time use: the conditional update serializes concurrent
        // redemptions of the same code. Zero rows means another request
        // already consumed it, and the transaction rolls back.
        let invalidated = sqlx::query("UPDATE tokens SET valid = FALSE WHERE id = $1 AND valid = TRUE")
            .bind(row.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if invalidated == 0 {
            return Err(AppError::unauthorized("Invalid login code"));
        }

        tx.commit().await?;

        sign_api_token(api_token_id, auth_config)
    }
}

/// Generates an 8-digit decimal login code.
///
/// The code is single-use, short-lived, and only ever delivered out of band,
/// so a non-cryptographic source is acceptable here.
fn generate_login_code() -> String {
    rand::thread_rng().gen_range(10_000_000..=99_999_999).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_code_is_eight_digits() {
        for _ in 0..1000 {
            let code = generate_login_code();
            assert_eq!(code.len(), 8);
            let n: u32 = code.parse().unwrap();
            assert!((10_000_000..=99_999_999).contains(&n));
        }
    }
}
