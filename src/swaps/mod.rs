use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
mod repo;
mod status;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/swap_requests",
            get(handlers::list_requests).post(handlers::create_request),
        )
        .route("/swap_requests/:id/respond", post(handlers::respond))
        .route("/swap_requests/:id/feedback", post(handlers::leave_feedback))
}
