//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod health;
pub mod profile;
pub mod sessions;
pub mod statements;
pub mod users;

/// Creates the API router; everything but health, registration and
/// sessions requires a bearer token.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(profile::routes())
        .merge(statements::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(users::routes())
        .merge(sessions::routes())
        .merge(protected_routes)
}
