//! # HTTP Server
//!
//! JSON API for persona selections and the chat advisor.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: `/api/chat` and `/api/persona-types`
//! - 1.1.0: Port fallback when the configured port is taken
//! - 1.0.0: Persona save and lookup routes

pub mod error;
pub mod handlers;
pub mod listener;
pub mod middleware;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::storage::PersonaStore;

pub use error::{ApiError, ApiResult};
pub use handlers::{parse_user_id, PathUserId};
pub use listener::bind_with_retry;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PersonaStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PersonaStore>) -> Self {
        AppState { store }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/personas", post(handlers::create_persona))
        .route("/api/personas/:user_id", get(handlers::list_personas))
        .route("/api/persona-types", get(handlers::persona_types))
        .route("/api/chat", post(handlers::chat))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::log_api_requests))
}
