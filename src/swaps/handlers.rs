use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use super::dto::{
    CreateSwapRequest, CreatedSwapResponse, FeedbackRequest, RespondRequest,
    RespondedSwapResponse, SwapLists, SwapRequestItem,
};
use super::repo;
use super::status::{SwapAction, SwapStatus};
use crate::auth::{repo::User, AuthUser};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::state::AppState;

const MAX_SKILL_LEN: usize = 100;

/// POST /swap_requests: propose a swap for a named skill. At most one
/// Pending request per ordered (requester, receiver) pair.
#[instrument(skip(state, payload))]
pub async fn create_request(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateSwapRequest>,
) -> AppResult<(StatusCode, Json<CreatedSwapResponse>)> {
    let skill = payload.skill.trim();
    if skill.is_empty() || skill.len() > MAX_SKILL_LEN {
        return Err(AppError::validation(
            "skill",
            format!("skill must be between 1 and {MAX_SKILL_LEN} characters"),
        ));
    }

    let receiver = User::find_by_id(&state.db, payload.receiver_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    if receiver.id == user_id {
        return Err(AppError::validation(
            "receiver_id",
            "cannot send a swap request to yourself",
        ));
    }

    if repo::pending_exists(&state.db, user_id, receiver.id).await? {
        warn!(requester_id = user_id, receiver_id = receiver.id, "duplicate pending request");
        return Err(AppError::conflict(
            "a pending request with this user already exists",
        ));
    }

    // The partial unique index closes the race between the check above and
    // this insert.
    let swap = repo::create(&state.db, user_id, receiver.id, skill)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("a pending request with this user already exists")
            } else {
                AppError::from(e)
            }
        })?;

    info!(swap_id = swap.id, requester_id = user_id, receiver_id = receiver.id, %skill, "swap request created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedSwapResponse {
            id: swap.id,
            receiver_id: swap.receiver_id,
            skill: swap.skill,
            status: swap.status,
            created_at: swap.created_at,
        }),
    ))
}

/// GET /swap_requests: the caller's sent and received requests.
#[instrument(skip(state))]
pub async fn list_requests(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<SwapLists>> {
    let sent = repo::list_sent(&state.db, user_id).await?;
    let received = repo::list_received(&state.db, user_id).await?;
    Ok(Json(SwapLists {
        sent: sent.into_iter().map(SwapRequestItem::from).collect(),
        received: received.into_iter().map(SwapRequestItem::from).collect(),
    }))
}

/// POST /swap_requests/:id/respond: the receiver accepts or rejects a
/// pending request, exactly once.
#[instrument(skip(state, payload))]
pub async fn respond(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(swap_id): Path<i64>,
    Json(payload): Json<RespondRequest>,
) -> AppResult<Json<RespondedSwapResponse>> {
    let action = SwapAction::parse(&payload.action).ok_or_else(|| {
        AppError::validation("action", "action must be \"accept\" or \"reject\"")
    })?;

    let swap = repo::find_by_id(&state.db, swap_id)
        .await?
        .ok_or(AppError::NotFound("swap request"))?;

    if swap.receiver_id != user_id {
        warn!(swap_id, user_id, "respond attempt by non-receiver");
        return Err(AppError::Forbidden);
    }

    let current = swap
        .status()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("corrupt status: {}", swap.status)))?;
    let new_status = current.respond(action).map_err(|_| {
        AppError::conflict("this request has already been responded to")
    })?;

    // Guarded update: a concurrent responder makes this a no-op.
    let affected = repo::resolve_pending(&state.db, swap_id, new_status).await?;
    if affected == 0 {
        return Err(AppError::conflict(
            "this request has already been responded to",
        ));
    }

    info!(swap_id, user_id, status = new_status.as_str(), "swap request resolved");
    Ok(Json(RespondedSwapResponse {
        id: swap_id,
        status: new_status.as_str().to_string(),
    }))
}

/// POST /swap_requests/:id/feedback: either participant attaches feedback to
/// an accepted swap, once, permanently.
#[instrument(skip(state, payload))]
pub async fn leave_feedback(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(swap_id): Path<i64>,
    Json(payload): Json<FeedbackRequest>,
) -> AppResult<Json<SwapRequestItem>> {
    let text = payload.feedback.trim();
    if text.is_empty() {
        return Err(AppError::validation("feedback", "feedback is required"));
    }

    let swap = repo::find_by_id(&state.db, swap_id)
        .await?
        .ok_or(AppError::NotFound("swap request"))?;

    if swap.requester_id != user_id && swap.receiver_id != user_id {
        warn!(swap_id, user_id, "feedback attempt by non-participant");
        return Err(AppError::Forbidden);
    }

    if swap.status() != Some(SwapStatus::Accepted) {
        return Err(AppError::conflict(
            "feedback is only allowed for accepted swaps",
        ));
    }
    if swap.feedback.is_some() {
        return Err(AppError::conflict(
            "feedback has already been submitted for this swap",
        ));
    }

    let affected = repo::set_feedback(&state.db, swap_id, text).await?;
    if affected == 0 {
        return Err(AppError::conflict(
            "feedback has already been submitted for this swap",
        ));
    }

    info!(swap_id, user_id, "feedback submitted");

    // Re-read with names so the caller gets the updated record back.
    let sent = repo::list_sent(&state.db, swap.requester_id).await?;
    let item = sent
        .into_iter()
        .find(|s| s.id == swap_id)
        .ok_or(AppError::NotFound("swap request"))?;
    Ok(Json(SwapRequestItem::from(item)))
}
