//! Route definitions for the AuthHub HTTP API.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with every route, threading `state` through.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(session_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        .with_state(state)
}

/// Endpoints reachable without a session.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/user/{id}", get(handlers::auth::get_user))
        .route(
            "/auth/forgot-password/{email}",
            post(handlers::auth::forgot_password),
        )
        .route("/auth/reset-password", post(handlers::auth::reset_password))
}

/// Endpoints behind the auth gate.
fn session_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/user/profile",
            get(handlers::user::get_profile)
                .put(handlers::user::update_profile)
                .delete(handlers::user::delete_profile),
        )
        .route("/user/password", put(handlers::user::change_password))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}

/// Endpoints behind the auth gate and the RBAC policy.
fn admin_routes(state: AppState) -> Router<AppState> {
    // Layers run bottom-up: the gate first, then RBAC.
    Router::new()
        .route("/admin/register", post(handlers::admin::register))
        .route("/admin/users", get(handlers::admin::list_users))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rbac::enforce_rbac,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}
