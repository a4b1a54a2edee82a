use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo::SwapRequestWithNames;

#[derive(Debug, Deserialize)]
pub struct CreateSwapRequest {
    pub receiver_id: i64,
    pub skill: String,
}

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    /// "accept" or "reject"
    pub action: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct SwapRequestItem {
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

impl From<SwapRequestWithNames> for SwapRequestItem {
    fn from(s: SwapRequestWithNames) -> Self {
        Self {
            id: s.id,
            requester_id: s.requester_id,
            receiver_id: s.receiver_id,
            requester_name: s.requester_name,
            receiver_name: s.receiver_name,
            skill: s.skill,
            status: s.status,
            feedback: s.feedback,
            created_at: s.created_at,
        }
    }
}

/// Both directions of the caller's swap traffic.
#[derive(Debug, Serialize)]
pub struct SwapLists {
    pub sent: Vec<SwapRequestItem>,
    pub received: Vec<SwapRequestItem>,
}

#[derive(Debug, Serialize)]
pub struct CreatedSwapResponse {
    pub id: i64,
    pub receiver_id: i64,
    pub skill: String,
    pub status: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct RespondedSwapResponse {
    pub id: i64,
    pub status: String,
}
