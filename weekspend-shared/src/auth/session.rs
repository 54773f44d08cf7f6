/// Session lifecycle management
///
/// One request moves a session through a small state machine:
///
/// ```text
/// NoToken -> (lookup) -> NotFound | Expired | Valid
/// ```
///
/// - `NotFound`: the token's derived id matches no row; the caller clears
///   the cookie.
/// - `Expired`: `now >= expires_at`; the row is deleted on the spot (lazy
///   expiry) and the caller clears the cookie.
/// - `Valid`: the session is live. When `now` is inside the renewal window
///   the expiry is extended to `now + lifetime`, written through to the
///   store, and the caller re-sets the cookie with the same token (a
///   sliding window, not a token rotation).
///
/// The renewal write is deliberately not wrapped in a transaction. Two
/// concurrent renewals double-write the same kind of value (idempotent), and
/// a renewal racing a deletion affects zero rows, which is a tolerated no-op.
///
/// # Example
///
/// ```no_run
/// use chrono::Utc;
/// use weekspend_shared::auth::session::{resolve_session, SessionOutcome, SessionPolicy};
///
/// # async fn example(pool: sqlx::PgPool, token: &str) -> Result<(), sqlx::Error> {
/// match resolve_session(&pool, &SessionPolicy::default(), token, Utc::now()).await? {
///     SessionOutcome::Valid { session, renewed } => { /* populate context */ }
///     SessionOutcome::NotFound | SessionOutcome::Expired => { /* clear cookie */ }
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::models::session::Session;
use crate::models::user::UserName;

use super::token::{generate_session_token, session_id_from_token};

/// Expiry and renewal parameters for sessions
#[derive(Debug, Clone, Copy)]
pub struct SessionPolicy {
    /// Total lifetime granted at sign-in and on each renewal
    pub lifetime: Duration,

    /// Time-before-expiry threshold inside which a valid session is renewed
    pub renewal_window: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            lifetime: Duration::days(30),
            renewal_window: Duration::days(15),
        }
    }
}

impl SessionPolicy {
    /// True when the session is past its expiry
    pub fn is_expired(&self, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now >= expires_at
    }

    /// True when a still-valid session should have its expiry extended
    pub fn should_renew(&self, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        !self.is_expired(expires_at, now) && now >= expires_at - self.renewal_window
    }

    /// The expiry granted at sign-in or renewal
    pub fn new_expiry(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.lifetime
    }
}

/// Result of resolving a bearer token against the store
#[derive(Debug, Clone)]
pub enum SessionOutcome {
    /// No row for the derived id; the cookie should be invalidated
    NotFound,

    /// The row existed but was past expiry; it has been deleted and the
    /// cookie should be invalidated
    Expired,

    /// A live session. `renewed` is set when the expiry was extended, in
    /// which case the cookie should be re-set with the new expiry
    Valid { session: Session, renewed: bool },
}

/// Resolves a bearer token to a session, applying lazy expiry and renewal
///
/// Store failures propagate; nothing is retried.
pub async fn resolve_session(
    pool: &PgPool,
    policy: &SessionPolicy,
    token: &str,
    now: DateTime<Utc>,
) -> Result<SessionOutcome, sqlx::Error> {
    let id = session_id_from_token(token);

    let Some(mut session) = Session::find_by_id(pool, &id).await? else {
        debug!(session_id = %id, "session token has no matching row");
        return Ok(SessionOutcome::NotFound);
    };

    if policy.is_expired(session.expires_at, now) {
        Session::delete(pool, &id).await?;
        debug!(session_id = %id, "expired session deleted on access");
        return Ok(SessionOutcome::Expired);
    }

    let mut renewed = false;
    if policy.should_renew(session.expires_at, now) {
        let expires_at = policy.new_expiry(now);
        // The row can vanish between the read above and this write; zero
        // rows affected is a tolerated race, the old expiry stands.
        if Session::update_expiry(pool, &id, expires_at).await? {
            session.expires_at = expires_at;
            renewed = true;
            debug!(session_id = %id, %expires_at, "session expiry renewed");
        }
    }

    Ok(SessionOutcome::Valid { session, renewed })
}

/// Creates a session for `user` and returns the bearer token with the row
///
/// The sign-in transition: fresh token, derived id, `lifetime` expiry,
/// inserted row. The token is returned exactly once, for the cookie; only
/// its digest is stored.
pub async fn create_session(
    pool: &PgPool,
    policy: &SessionPolicy,
    user: UserName,
    now: DateTime<Utc>,
) -> Result<(String, Session), sqlx::Error> {
    let token = generate_session_token();
    let session = Session {
        id: session_id_from_token(&token),
        expires_at: policy.new_expiry(now),
        user,
    };

    session.insert(pool).await?;
    debug!(session_id = %session.id, user = %session.user, "session created");

    Ok((token, session))
}

/// Explicitly invalidates a session (sign-out)
///
/// Returns `true` if a row was deleted.
pub async fn invalidate_session(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let deleted = Session::delete(pool, id).await?;
    debug!(session_id = %id, deleted, "session invalidated");
    Ok(deleted)
}
