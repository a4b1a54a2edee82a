use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;
mod repo;
mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/profile/photo", get(handlers::get_profile_photo))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10MB photo uploads
}
