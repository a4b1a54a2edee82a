use anyhow::Context;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};
use uuid::Uuid;

use super::dto::ProfileUpdate;
use super::repo;
use crate::auth::repo::User;
use crate::error::AppResult;
use crate::state::AppState;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` availability date from the form.
pub fn parse_availability_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw.trim(), DATE_FORMAT)
}

/// Collision-resistant object key for an uploaded profile photo.
pub fn photo_key(user_id: i64, content_type: &str) -> String {
    let ext = ext_from_mime(content_type).unwrap_or("bin");
    let ts = OffsetDateTime::now_utc().unix_timestamp();
    format!("profiles/{user_id}/{ts}-{}.{ext}", Uuid::new_v4())
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

/// Upload the photo (if any), then apply every profile field in a single
/// transactional update. A database failure after upload leaves an orphaned
/// object but no partial record.
pub async fn apply_update(
    st: &AppState,
    user_id: i64,
    update: ProfileUpdate,
) -> AppResult<User> {
    let photo_key = match &update.photo {
        Some(photo) => {
            let key = photo_key(user_id, &photo.content_type);
            st.storage
                .put_object(&key, photo.body.clone(), &photo.content_type)
                .await
                .with_context(|| format!("put_object {key}"))?;
            Some(key)
        }
        None => None,
    };

    let mut tx = st.db.begin().await?;
    let user = repo::update_profile_tx(&mut tx, user_id, &update, photo_key.as_deref()).await?;
    tx.commit().await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let date = parse_availability_date("2025-07-14").unwrap();
        assert_eq!(date.to_string(), "2025-07-14");
        assert!(parse_availability_date("  2025-01-02 ").is_ok());
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["14/07/2025", "2025-13-01", "next tuesday", ""] {
            assert!(parse_availability_date(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn photo_keys_are_scoped_and_unique() {
        let a = photo_key(7, "image/png");
        let b = photo_key(7, "image/png");
        assert!(a.starts_with("profiles/7/"));
        assert!(a.ends_with(".png"));
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_mime_falls_back_to_bin() {
        let key = photo_key(1, "application/octet-stream");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn mime_extension_mapping() {
        assert_eq!(ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/jpg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(ext_from_mime("text/plain"), None);
    }
}
