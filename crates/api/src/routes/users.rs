//! User registration.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use tally_shared::auth::{RegisterRequest, UserInfo};
use tracing::info;

use crate::AppState;
use crate::error::ApiError;

/// Creates the users router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users", post(register))
}

/// POST /users - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserInfo>), ApiError> {
    let user = state
        .users
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(UserInfo {
            id: user.id.into_inner(),
            name: user.name,
            email: user.email,
        }),
    ))
}
