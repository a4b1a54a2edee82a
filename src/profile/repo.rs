use sqlx::{Postgres, Transaction};

use super::dto::ProfileUpdate;
use crate::auth::repo::{User, USER_COLUMNS};

/// Apply every profile field in one UPDATE. The availability date and photo
/// keep their previous value when the form carried none; everything else is
/// overwritten.
pub async fn update_profile_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    update: &ProfileUpdate,
    photo_key: Option<&str>,
) -> Result<User, sqlx::Error> {
    let sql = format!(
        "UPDATE users SET \
            location = $2, \
            skills_offered = $3, \
            skills_wanted = $4, \
            availability_mode = $5, \
            availability_date = COALESCE($6, availability_date), \
            availability_remark = $7, \
            is_public = $8, \
            profile_photo = COALESCE($9, profile_photo) \
         WHERE id = $1 \
         RETURNING {USER_COLUMNS}"
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(user_id)
        .bind(&update.location)
        .bind(&update.skills_offered)
        .bind(&update.skills_wanted)
        .bind(&update.availability_mode)
        .bind(update.availability_date)
        .bind(&update.availability_remark)
        .bind(update.is_public)
        .bind(photo_key)
        .fetch_one(&mut **tx)
        .await
}
