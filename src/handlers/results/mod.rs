//! Race result handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    Router,
    routing::{delete, post},
};

use crate::state::AppState;

/// Result routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_result))
        .route("/{id}", delete(handler::delete_result))
}
