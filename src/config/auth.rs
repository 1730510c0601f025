use std::env;

/// Signing secret and expiry windows for the passwordless login flow.
///
/// Injected into the issuer and validator through [`crate::state::AppState`]
/// rather than read from the environment at call time, so tests can pin a
/// fixed secret and window.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of an emailed login code, in minutes.
    pub email_code_expiry_mins: i64,
    /// Lifetime of an issued API token, in hours.
    pub api_token_expiry_hours: i64,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            email_code_expiry_mins: env::var("EMAIL_CODE_EXPIRY_MINS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            api_token_expiry_hours: env::var("API_TOKEN_EXPIRY_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(12),
        }
    }
}
