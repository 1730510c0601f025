use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::config::auth::AuthConfig;
use crate::modules::auth::model::ApiTokenClaims;
use crate::utils::errors::AppError;

/// Signs an API credential whose payload carries only the token row id.
///
/// The payload deliberately has no `iat`/`exp` claims: expiry and revocation
/// are enforced against the stored token row, which a baked-in expiry claim
/// could not support.
pub fn sign_api_token(token_id: i64, auth_config: &AuthConfig) -> Result<String, AppError> {
    let claims = ApiTokenClaims { token_id };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(auth_config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("failed to sign API token: {}", e)))
}

/// Verifies the signature and decodes the payload, failing closed on any
/// signature or shape violation.
pub fn verify_api_token(token: &str, auth_config: &AuthConfig) -> Result<ApiTokenClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // The payload has no registered claims, so there is nothing for the
    // library to check beyond the signature.
    validation.validate_exp = false;
    validation.set_required_spec_claims(&[] as &[&str]);

    decode::<ApiTokenClaims>(
        token,
        &DecodingKey::from_secret(auth_config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid credentials"))
}
