use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Payload of a signed API credential.
///
/// Carries only the token row id. Validity, ownership and expiry live in the
/// store, so a credential can be revoked by flipping the row's `valid` flag.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiTokenClaims {
    pub token_id: i64,
}

/// Request a one-time login code by email.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
}

/// Exchange a login code for an API credential.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthenticateRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub email_code: String,
}
