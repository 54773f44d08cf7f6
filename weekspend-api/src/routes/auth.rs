/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/sign-in` - Exchange the household PIN for a session cookie
/// - `POST /v1/auth/sign-out` - Delete the session and clear the cookie
///
/// Sign-in is the only way a session row comes into existence. A wrong PIN
/// writes nothing and sets nothing.

use axum::{
    extract::{Extension, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use weekspend_shared::auth::session::{create_session, invalidate_session};
use weekspend_shared::auth::token::verify_pin;
use weekspend_shared::models::user::UserName;

use crate::{
    app::AppState,
    cookie::{clear_session_cookie, set_session_cookie},
    error::{validation_error, ApiError, ApiResult},
    middleware::session::SessionContext,
};

/// Sign-in request
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    /// The 6-character household PIN
    #[validate(length(min = 6, max = 6, message = "PIN must be exactly 6 characters"))]
    pub pin: String,
}

/// Sign-in response
#[derive(Debug, Serialize, Deserialize)]
pub struct SignInResponse {
    /// The user the new session acts as
    pub user: UserName,

    /// Session expiry, mirrored by the cookie's Expires attribute
    pub expires_at: DateTime<Utc>,
}

/// Sign-in handler
///
/// Validates the PIN in constant time against the configured secret. On
/// success a fresh session row is inserted and the `session` cookie is set
/// with the bearer token and the session expiry.
///
/// # Errors
///
/// - `401 Unauthorized`: wrong PIN (no row created, no cookie set)
/// - `422 Unprocessable Entity`: PIN of the wrong length
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> ApiResult<Response> {
    req.validate().map_err(validation_error)?;

    if !verify_pin(&req.pin, &state.config.auth.pin) {
        tracing::info!("sign-in rejected: wrong PIN");
        return Err(ApiError::Unauthorized("Invalid PIN".to_string()));
    }

    let (token, session) = create_session(
        &state.db,
        &state.session_policy,
        UserName::default_user(),
        Utc::now(),
    )
    .await?;

    tracing::info!(user = %session.user, "sign-in succeeded");

    let cookie = set_session_cookie(&token, session.expires_at, state.config.api.production);
    let body = Json(SignInResponse {
        user: session.user,
        expires_at: session.expires_at,
    });

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], body).into_response())
}

/// Sign-out response
#[derive(Debug, Serialize, Deserialize)]
pub struct SignOutResponse {
    /// Whether a session row was actually deleted
    pub signed_out: bool,
}

/// Sign-out handler
///
/// Deletes the session row and clears the cookie. Signing out a session that
/// was concurrently removed still clears the cookie and succeeds.
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> ApiResult<Response> {
    let deleted = invalidate_session(&state.db, &ctx.session_id).await?;

    let cookie = clear_session_cookie(state.config.api.production);
    let body = Json(SignOutResponse { signed_out: deleted });

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], body).into_response())
}
