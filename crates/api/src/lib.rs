//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Bearer token authentication middleware
//! - Mapping of domain errors to JSON responses

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tally_core::statement::{StatementService, StatementStore};
use tally_core::users::{UserService, UserStore};
use tally_shared::JwtService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and profile.
    pub users: UserService,
    /// Statement use cases.
    pub statements: StatementService,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    /// Wires the services over the given stores.
    pub fn new<U>(users: Arc<U>, statements: Arc<dyn StatementStore>, jwt_service: JwtService) -> Self
    where
        U: UserStore + 'static,
    {
        Self {
            users: UserService::new(users.clone()),
            statements: StatementService::new(statements, users),
            jwt_service: Arc::new(jwt_service),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
