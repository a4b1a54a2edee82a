use serde::{Deserialize, Serialize};
use time::Date;

use crate::auth::repo::User;

/// Dashboard query parameters. `date` is accepted for compatibility with the
/// dashboard form but no calendar filtering is applied to it.
#[derive(Debug, Default, Deserialize)]
pub struct DirectoryFilters {
    pub skill: Option<String>,
    pub mode: Option<String>,
    pub date: Option<String>,
}

/// A discoverable user as shown in the dashboard listing. No email, no
/// credentials.
#[derive(Debug, Serialize)]
pub struct DirectoryEntry {
    pub id: i64,
    pub username: String,
    pub location: Option<String>,
    pub availability_mode: Option<String>,
    pub availability_date: Option<Date>,
    pub availability_remark: Option<String>,
    pub skills_offered: Option<String>,
    pub skills_wanted: Option<String>,
    pub has_photo: bool,
}

impl From<User> for DirectoryEntry {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            location: u.location,
            availability_mode: u.availability_mode,
            availability_date: u.availability_date,
            availability_remark: u.availability_remark,
            skills_offered: u.skills_offered,
            skills_wanted: u.skills_wanted,
            has_photo: u.profile_photo.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn entry_hides_private_data() {
        let user = User {
            id: 3,
            username: "bob".into(),
            email: "b@x.com".into(),
            password_hash: "secret-hash".into(),
            location: Some("Oslo".into()),
            is_public: true,
            availability_mode: Some("weekends".into()),
            availability_date: None,
            availability_remark: None,
            profile_photo: Some("profiles/3/1-x.png".into()),
            skills_offered: Some("Guitar".into()),
            skills_wanted: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let entry = DirectoryEntry::from(user);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("Guitar"));
        assert!(json.contains("\"has_photo\":true"));
        assert!(!json.contains("b@x.com"));
        assert!(!json.contains("secret-hash"));
    }
}
