//! Runner handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Runner routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_runner).get(handler::get_runners_batch))
        .route(
            "/{id}",
            get(handler::get_runner)
                .put(handler::update_runner)
                .delete(handler::delete_runner),
        )
}
