/// Current-user endpoints
///
/// # Endpoints
///
/// - `GET /v1/user` - The household member this session acts as
/// - `PUT /v1/user` - Reassign the session to the other member
///
/// Reassignment writes through to the session row, so the change outlives
/// the request.

use axum::{
    extract::{Extension, State},
    Json,
};
use serde::{Deserialize, Serialize};
use weekspend_shared::models::session::Session;
use weekspend_shared::models::user::UserName;

use crate::{app::AppState, error::{ApiError, ApiResult}, middleware::session::SessionContext};

/// Current-user response
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// The session's user
    pub user: UserName,
}

/// Change-user request
#[derive(Debug, Deserialize)]
pub struct ChangeUserRequest {
    /// The member to act as from now on
    pub user: UserName,
}

/// Returns the current session's user
pub async fn get_user(Extension(ctx): Extension<SessionContext>) -> ApiResult<Json<UserResponse>> {
    Ok(Json(UserResponse { user: ctx.user }))
}

/// Reassigns the session to a different household member
///
/// # Errors
///
/// - `401 Unauthorized`: the session row vanished under us (expired or
///   signed out concurrently)
pub async fn change_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Json(req): Json<ChangeUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let session = Session::update_user(&state.db, &ctx.session_id, req.user)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Session no longer exists".to_string()))?;

    Ok(Json(UserResponse { user: session.user }))
}
