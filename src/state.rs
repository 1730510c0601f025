use sqlx::PgPool;

use crate::config::auth::AuthConfig;
use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::email::EmailConfig;

/// Shared application state: the connection pool plus configuration that is
/// read-only after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub auth_config: AuthConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        auth_config: AuthConfig::from_env(),
        email_config: EmailConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
