use sqlx::{PgPool, Postgres, QueryBuilder};

use super::dto::DirectoryFilters;
use crate::auth::repo::{User, USER_COLUMNS};

pub fn like_pattern(skill: &str) -> String {
    format!("%{}%", skill.trim())
}

/// Every public user except the caller, optionally narrowed by a substring
/// match on offered skills and/or an exact availability mode.
pub async fn list_others(
    db: &PgPool,
    current_id: i64,
    filters: &DirectoryFilters,
) -> Result<Vec<User>, sqlx::Error> {
    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users WHERE is_public AND id <> "));
    qb.push_bind(current_id);

    if let Some(skill) = filters.skill.as_deref().filter(|s| !s.trim().is_empty()) {
        qb.push(" AND skills_offered ILIKE ");
        qb.push_bind(like_pattern(skill));
    }
    if let Some(mode) = filters.mode.as_deref().filter(|m| !m.trim().is_empty()) {
        qb.push(" AND availability_mode = ");
        qb.push_bind(mode.trim().to_string());
    }

    qb.push(" ORDER BY id");
    qb.build_query_as::<User>().fetch_all(db).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_trims() {
        assert_eq!(like_pattern("Python"), "%Python%");
        assert_eq!(like_pattern("  Guitar "), "%Guitar%");
    }
}
