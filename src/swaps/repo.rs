use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::status::SwapStatus;

const SWAP_COLUMNS: &str =
    "id, requester_id, receiver_id, skill, status, feedback, created_at";

#[derive(Debug, Clone, FromRow)]
pub struct SwapRequest {
    pub id: i64,
    pub requester_id: i64,
    pub receiver_id: i64,
    pub skill: String,
    pub status: String,
    pub feedback: Option<String>,
    pub created_at: OffsetDateTime,
}

impl SwapRequest {
    pub fn status(&self) -> Option<SwapStatus> {
        SwapStatus::parse(&self.status)
    }
}

/// Swap request joined with both participants' display names for listings.
#[derive(Debug, Clone, FromRow)]
pub struct SwapRequestWithNames {
    pub id: i64,
    pub requester_id: i64,
    pub receiver_id: i64,
    pub requester_name: String,
    pub receiver_name: String,
    pub skill: String,
    pub status: String,
    pub feedback: Option<String>,
    pub created_at: OffsetDateTime,
}

pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<SwapRequest>, sqlx::Error> {
    let sql = format!("SELECT {SWAP_COLUMNS} FROM swap_requests WHERE id = $1");
    sqlx::query_as::<_, SwapRequest>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Whether a Pending request already exists for the ordered pair.
pub async fn pending_exists(
    db: &PgPool,
    requester_id: i64,
    receiver_id: i64,
) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS ( \
            SELECT 1 FROM swap_requests \
            WHERE requester_id = $1 AND receiver_id = $2 AND status = 'Pending' \
        )",
    )
    .bind(requester_id)
    .bind(receiver_id)
    .fetch_one(db)
    .await?;
    Ok(exists)
}

pub async fn create(
    db: &PgPool,
    requester_id: i64,
    receiver_id: i64,
    skill: &str,
) -> Result<SwapRequest, sqlx::Error> {
    let sql = format!(
        "INSERT INTO swap_requests (requester_id, receiver_id, skill) \
         VALUES ($1, $2, $3) \
         RETURNING {SWAP_COLUMNS}"
    );
    sqlx::query_as::<_, SwapRequest>(&sql)
        .bind(requester_id)
        .bind(receiver_id)
        .bind(skill)
        .fetch_one(db)
        .await
}

const SWAP_WITH_NAMES: &str = "SELECT s.id, s.requester_id, s.receiver_id, \
        rq.username AS requester_name, rc.username AS receiver_name, \
        s.skill, s.status, s.feedback, s.created_at \
     FROM swap_requests s \
     JOIN users rq ON rq.id = s.requester_id \
     JOIN users rc ON rc.id = s.receiver_id";

pub async fn list_sent(
    db: &PgPool,
    user_id: i64,
) -> Result<Vec<SwapRequestWithNames>, sqlx::Error> {
    let sql = format!("{SWAP_WITH_NAMES} WHERE s.requester_id = $1 ORDER BY s.id");
    sqlx::query_as::<_, SwapRequestWithNames>(&sql)
        .bind(user_id)
        .fetch_all(db)
        .await
}

pub async fn list_received(
    db: &PgPool,
    user_id: i64,
) -> Result<Vec<SwapRequestWithNames>, sqlx::Error> {
    let sql = format!("{SWAP_WITH_NAMES} WHERE s.receiver_id = $1 ORDER BY s.id");
    sqlx::query_as::<_, SwapRequestWithNames>(&sql)
        .bind(user_id)
        .fetch_all(db)
        .await
}

/// Guarded transition out of Pending. Returns rows affected; zero means the
/// request was already terminal (for example a concurrent responder won).
pub async fn resolve_pending(
    db: &PgPool,
    id: i64,
    new_status: SwapStatus,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE swap_requests SET status = $2 WHERE id = $1 AND status = 'Pending'",
    )
    .bind(id)
    .bind(new_status.as_str())
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

/// Guarded one-shot feedback write. Zero rows means the request is not
/// Accepted or feedback was already set.
pub async fn set_feedback(db: &PgPool, id: i64, feedback: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE swap_requests SET feedback = $2 \
         WHERE id = $1 AND status = 'Accepted' AND feedback IS NULL",
    )
    .bind(id)
    .bind(feedback)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}
