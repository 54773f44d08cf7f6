/// Session model and store operations
///
/// Sessions persist an authenticated cookie holder. The primary key is the
/// SHA-256 digest of the bearer token; the token itself never reaches the
/// database (see `auth::token`).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE session (
///     id TEXT PRIMARY KEY,
///     expires_at TIMESTAMPTZ NOT NULL,
///     user_name TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use chrono::{Duration, Utc};
/// use weekspend_shared::models::session::Session;
/// use weekspend_shared::models::user::UserName;
///
/// # async fn example(pool: sqlx::PgPool) -> Result<(), sqlx::Error> {
/// let session = Session {
///     id: "64-hex-chars...".to_string(),
///     expires_at: Utc::now() + Duration::days(30),
///     user: UserName::Alex,
/// };
/// session.insert(&pool).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::user::UserName;

/// A session row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// Session id: lowercase-hex SHA-256 of the bearer token
    pub id: String,

    /// Absolute expiry; sessions at or past this instant are invalid
    pub expires_at: DateTime<Utc>,

    /// The household member this session acts as
    #[sqlx(rename = "user_name")]
    pub user: UserName,
}

impl Session {
    /// Inserts this session row
    ///
    /// Called exactly once, at sign-in. Fails on id collision (primary key
    /// violation) or connectivity loss; no partial state is written.
    pub async fn insert(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO session (id, expires_at, user_name)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&self.id)
        .bind(self.expires_at)
        .bind(self.user)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Looks up a session by its derived id
    ///
    /// Returns `None` when no row matches; expiry is not checked here, that
    /// is the lifecycle manager's job.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, expires_at, user_name
            FROM session
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// Writes a new expiry for a session (sliding-window renewal)
    ///
    /// Returns `true` when a row was updated. A return of `false` means the
    /// row vanished between read and write (concurrent sign-out or lazy
    /// expiry); callers treat that as a no-op, not an error.
    pub async fn update_expiry(
        pool: &PgPool,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE session
            SET expires_at = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Reassigns the session to a different household member
    ///
    /// Returns the updated session, or `None` if the row no longer exists.
    pub async fn update_user(
        pool: &PgPool,
        id: &str,
        user: UserName,
    ) -> Result<Option<Self>, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            UPDATE session
            SET user_name = $2
            WHERE id = $1
            RETURNING id, expires_at, user_name
            "#,
        )
        .bind(id)
        .bind(user)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// Deletes a session by id
    ///
    /// Returns `true` if a row was removed. Deleting an absent session is
    /// not an error.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM session WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
