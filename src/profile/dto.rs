use bytes::Bytes;
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::auth::repo::User;

/// A photo file carried in the multipart profile form.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub body: Bytes,
    pub content_type: String,
}

/// Parsed multipart profile form. All text fields are applied together in
/// one update; the photo, when present, is uploaded first.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub location: Option<String>,
    pub skills_offered: Option<String>,
    pub skills_wanted: Option<String>,
    pub availability_mode: Option<String>,
    pub availability_date: Option<Date>,
    pub availability_remark: Option<String>,
    pub is_public: bool,
    pub photo: Option<PhotoUpload>,
}

/// Full own-profile record; the owner always sees everything regardless of
/// the visibility flag.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub location: Option<String>,
    pub is_public: bool,
    pub availability_mode: Option<String>,
    pub availability_date: Option<Date>,
    pub availability_remark: Option<String>,
    pub profile_photo: Option<String>,
    pub skills_offered: Option<String>,
    pub skills_wanted: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<User> for ProfileResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            location: u.location,
            is_public: u.is_public,
            availability_mode: u.availability_mode,
            availability_date: u.availability_date,
            availability_remark: u.availability_remark,
            profile_photo: u.profile_photo,
            skills_offered: u.skills_offered,
            skills_wanted: u.skills_wanted,
            created_at: u.created_at,
        }
    }
}

/// Update response; `warnings` carries non-fatal notices such as a skipped
/// malformed availability date.
#[derive(Debug, Serialize)]
pub struct ProfileUpdated {
    pub profile: ProfileResponse,
    pub warnings: Vec<String>,
}
