use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{authenticate, login};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/authenticate", post(authenticate))
}
