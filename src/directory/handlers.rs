use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{debug, instrument};

use super::dto::{DirectoryEntry, DirectoryFilters};
use super::repo;
use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;

/// GET /dashboard: everyone except the caller, filterable by offered skill
/// and availability mode. Private profiles are excluded.
#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(filters): Query<DirectoryFilters>,
) -> AppResult<Json<Vec<DirectoryEntry>>> {
    if filters.date.is_some() {
        // the form submits a date but no calendar filtering exists
        debug!("date filter received and ignored");
    }

    let users = repo::list_others(&state.db, user_id, &filters).await?;
    let entries = users.into_iter().map(DirectoryEntry::from).collect();
    Ok(Json(entries))
}
