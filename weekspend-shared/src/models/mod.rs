/// Database models for weekspend
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: The fixed set of household users (no table, stored as text)
/// - `session`: Authenticated sessions keyed by token digest
/// - `transaction`: Recorded spending, bucketed by week
/// - `preset`: Named shortcut amounts
/// - `budget`: Weekly budget rows, unique per week
///
/// # Example
///
/// ```no_run
/// use weekspend_shared::models::session::Session;
///
/// # async fn example(pool: sqlx::PgPool) -> Result<(), sqlx::Error> {
/// let session = Session::find_by_id(&pool, "deadbeef...").await?;
/// # Ok(())
/// # }
/// ```

pub mod budget;
pub mod preset;
pub mod session;
pub mod transaction;
pub mod user;
