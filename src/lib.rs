// Library crate for the notes service
// Exports modules for use by the server binary and tests

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod schemas;
pub mod services;
pub mod state;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_note, delete_note, get_note, health_check, list_notes, login, me, patch_note, register,
    soft_delete_note, update_me, update_note,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        // Auth & User routes
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/users/me", patch(update_me))
        // Note routes
        .route("/api/v1/notes", get(list_notes).post(create_note))
        .route(
            "/api/v1/notes/{id}",
            get(get_note)
                .put(update_note)
                .patch(patch_note)
                .delete(delete_note),
        )
        .route("/api/v1/notes/{id}/soft-delete", post(soft_delete_note))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/api/v1/health-check", get(health_check))
        // Public auth routes
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        // Protected routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
