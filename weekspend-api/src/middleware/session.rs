/// Session middleware
///
/// Two layers cooperate here:
///
/// - [`session_layer`] runs on every request. It reads the `session` cookie,
///   resolves it through the lifecycle manager, and inserts a
///   [`SessionContext`] into the request extensions. Cookie mutations happen
///   in lockstep with the store: a renewal re-sets the cookie with the new
///   expiry, a missing or expired row invalidates it.
/// - [`require_session`] guards protected route trees and rejects requests
///   whose extensions carry no context (401).
///
/// Handlers receive the context with Axum's `Extension` extractor:
///
/// ```no_run
/// use axum::Extension;
/// use weekspend_api::middleware::session::SessionContext;
///
/// async fn handler(Extension(ctx): Extension<SessionContext>) -> String {
///     format!("signed in as {}", ctx.user)
/// }
/// ```

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use weekspend_shared::auth::session::{resolve_session, SessionOutcome};
use weekspend_shared::models::user::UserName;

use crate::{
    app::AppState,
    cookie::{clear_session_cookie, has_session_set_cookie, session_token, set_session_cookie},
    error::ApiError,
};

/// Request-scoped view of the resolved session
///
/// Constructed once per request by [`session_layer`]; never global.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Session id (token digest), used for store mutations
    pub session_id: String,

    /// The household member this request acts as
    pub user: UserName,

    /// Current session expiry
    pub expires_at: DateTime<Utc>,
}

/// Resolves the session cookie for every request
///
/// State machine per request: no cookie → proceed unauthenticated; unknown
/// id → invalidate cookie; expired row → row deleted, cookie invalidated;
/// valid row → context populated, expiry possibly renewed with the cookie
/// re-set to match. Store failures terminate the request.
///
/// When the handler itself emits a session `Set-Cookie` (sign-in, sign-out),
/// the layer's own cookie is suppressed rather than appended after it.
pub async fn session_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let secure = state.config.api.production;

    let outbound_cookie = match session_token(req.headers()) {
        None => None,
        Some(token) => {
            match resolve_session(&state.db, &state.session_policy, &token, Utc::now()).await {
                Ok(SessionOutcome::Valid { session, renewed }) => {
                    let cookie = renewed
                        .then(|| set_session_cookie(&token, session.expires_at, secure));
                    req.extensions_mut().insert(SessionContext {
                        session_id: session.id,
                        user: session.user,
                        expires_at: session.expires_at,
                    });
                    cookie
                }
                Ok(SessionOutcome::NotFound) | Ok(SessionOutcome::Expired) => {
                    Some(clear_session_cookie(secure))
                }
                Err(e) => return ApiError::from(e).into_response(),
            }
        }
    };

    let mut response = next.run(req).await;

    // A handler that mutated the session cookie itself (sign-in installs a
    // fresh one, sign-out clears it) wins: browsers keep the last Set-Cookie
    // for a name, so appending ours would override the handler's.
    if let Some(cookie) = outbound_cookie {
        if !has_session_set_cookie(response.headers()) {
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }
    }

    response
}

/// Rejects requests that carry no resolved session
pub async fn require_session(req: Request, next: Next) -> Result<Response, ApiError> {
    if req.extensions().get::<SessionContext>().is_none() {
        return Err(ApiError::Unauthorized(
            "Authentication required. Please sign in to access this resource.".to_string(),
        ));
    }
    Ok(next.run(req).await)
}
