use axum::{routing::get, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;
mod repo;

pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(handlers::dashboard))
}
