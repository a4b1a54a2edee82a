use axum::{
    extract::{Multipart, State},
    response::Redirect,
    Json,
};
use tracing::{info, instrument, warn};

use super::dto::{PhotoUpload, ProfileResponse, ProfileUpdate, ProfileUpdated};
use super::services;
use crate::auth::{repo::User, AuthUser};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const PRESIGN_TTL_SECS: u64 = 600;

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(ProfileResponse::from(user)))
}

/// PUT /profile (multipart): text fields plus an optional `photo` file,
/// applied as one atomic update. A malformed availability date is downgraded
/// to a warning and the rest of the update still applies.
#[instrument(skip(state, mp))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut mp: Multipart,
) -> AppResult<Json<ProfileUpdated>> {
    let mut update = ProfileUpdate::default();
    let mut warnings = Vec::new();

    while let Ok(Some(field)) = mp.next_field().await {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };
        match name.as_str() {
            "photo" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let body = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::validation("photo", "unreadable photo upload"))?;
                if !body.is_empty() {
                    update.photo = Some(PhotoUpload { body, content_type });
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| AppError::validation("form", "malformed form field"))?;
                apply_text_field(&mut update, &mut warnings, &name, value);
            }
        }
    }

    let user = services::apply_update(&state, user_id, update).await?;
    info!(user_id, "profile updated");

    Ok(Json(ProfileUpdated {
        profile: ProfileResponse::from(user),
        warnings,
    }))
}

fn apply_text_field(
    update: &mut ProfileUpdate,
    warnings: &mut Vec<String>,
    name: &str,
    value: String,
) {
    match name {
        "location" => update.location = non_empty(value),
        "skills_offered" => update.skills_offered = non_empty(value),
        "skills_wanted" => update.skills_wanted = non_empty(value),
        "availability_mode" => update.availability_mode = non_empty(value),
        "availability_remark" => update.availability_remark = non_empty(value),
        "availability_date" => {
            if value.trim().is_empty() {
                return;
            }
            match services::parse_availability_date(&value) {
                Ok(date) => update.availability_date = Some(date),
                Err(_) => {
                    warn!(raw = %value, "invalid availability date, skipping");
                    warnings.push("invalid date format; availability date not updated".into());
                }
            }
        }
        "is_public" => update.is_public = parse_checkbox(&value),
        other => {
            // unknown fields from older form versions are ignored
            tracing::debug!(field = other, "ignoring unknown profile field");
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_checkbox(value: &str) -> bool {
    matches!(value.trim(), "true" | "on" | "1" | "yes")
}

/// 302 to a presigned URL for the caller's photo.
#[instrument(skip(state))]
pub async fn get_profile_photo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Redirect> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let key = user.profile_photo.ok_or(AppError::NotFound("photo"))?;
    let url = state.storage.presign_get(&key, PRESIGN_TTL_SECS).await?;
    Ok(Redirect::temporary(&url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_values() {
        assert!(parse_checkbox("true"));
        assert!(parse_checkbox("on"));
        assert!(parse_checkbox(" 1 "));
        assert!(!parse_checkbox("false"));
        assert!(!parse_checkbox(""));
    }

    #[test]
    fn empty_fields_become_none() {
        assert_eq!(non_empty("  ".into()), None);
        assert_eq!(non_empty(" Berlin ".into()), Some("Berlin".to_string()));
    }

    #[test]
    fn malformed_date_is_a_warning_not_an_error() {
        let mut update = ProfileUpdate::default();
        let mut warnings = Vec::new();
        apply_text_field(&mut update, &mut warnings, "availability_date", "nope".into());
        assert!(update.availability_date.is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn valid_date_is_applied() {
        let mut update = ProfileUpdate::default();
        let mut warnings = Vec::new();
        apply_text_field(
            &mut update,
            &mut warnings,
            "availability_date",
            "2025-07-14".into(),
        );
        assert!(update.availability_date.is_some());
        assert!(warnings.is_empty());
    }

    #[test]
    fn text_fields_land_in_place() {
        let mut update = ProfileUpdate::default();
        let mut warnings = Vec::new();
        apply_text_field(&mut update, &mut warnings, "location", "Lisbon".into());
        apply_text_field(&mut update, &mut warnings, "skills_offered", "Python,Go".into());
        apply_text_field(&mut update, &mut warnings, "is_public", "on".into());
        assert_eq!(update.location.as_deref(), Some("Lisbon"));
        assert_eq!(update.skills_offered.as_deref(), Some("Python,Go"));
        assert!(update.is_public);
        assert!(warnings.is_empty());
    }
}
