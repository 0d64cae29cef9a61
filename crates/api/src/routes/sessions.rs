//! Session creation (login).

use axum::{Json, Router, extract::State, routing::post};
use tally_shared::auth::{SessionRequest, SessionResponse, UserInfo};
use tracing::info;

use crate::AppState;
use crate::error::ApiError;

/// Creates the sessions router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/sessions", post(create_session))
}

/// POST /sessions - Authenticate and return a bearer token.
async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let user = state
        .users
        .authenticate(&payload.email, &payload.password)
        .await
        .inspect_err(|e| info!(error = %e, "Failed login attempt"))?;

    let token = state.jwt_service.generate_token(user.id.into_inner())?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(SessionResponse {
        user: UserInfo {
            id: user.id.into_inner(),
            name: user.name,
            email: user.email,
        },
        token,
        expires_in: state.jwt_service.expires_in(),
    }))
}
