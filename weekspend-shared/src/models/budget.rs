/// Budget model and store operations
///
/// A budget row caps one week's spend. `applies_to` is the Monday of the
/// week (the same convention as `transactions.for_week`) and carries a
/// uniqueness constraint, so writes are upserts: setting the budget for a
/// week that already has a row updates that row instead of duplicating it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE budget (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     amount NUMERIC(10, 2) NOT NULL,
///     applies_to DATE NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::week::week_start_date;

/// A budget row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Budget {
    /// Unique budget id (UUID v4)
    pub id: Uuid,

    /// Weekly cap, fixed-point decimal
    pub amount: Decimal,

    /// The Monday of the week this budget applies to (unique)
    pub applies_to: NaiveDate,

    /// Row creation time
    pub created_at: DateTime<Utc>,

    /// Last edit time
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Sets the budget for a week (insert or update)
    ///
    /// `applies_to` is normalized to its week's Monday before the write, so
    /// any date inside the week addresses the same row. Upserting the same
    /// week twice updates in place, so the uniqueness invariant holds.
    pub async fn upsert(
        pool: &PgPool,
        applies_to: NaiveDate,
        amount: Decimal,
    ) -> Result<Self, sqlx::Error> {
        let applies_to = week_start_date(applies_to);

        let budget = sqlx::query_as::<_, Budget>(
            r#"
            INSERT INTO budget (amount, applies_to)
            VALUES ($1, $2)
            ON CONFLICT (applies_to)
            DO UPDATE SET amount = EXCLUDED.amount, updated_at = NOW()
            RETURNING id, amount, applies_to, created_at, updated_at
            "#,
        )
        .bind(amount)
        .bind(applies_to)
        .fetch_one(pool)
        .await?;

        Ok(budget)
    }

    /// Finds the budget for a week, if one was ever set
    ///
    /// The lookup date is normalized the same way as writes.
    pub async fn find_by_applies_to(
        pool: &PgPool,
        applies_to: NaiveDate,
    ) -> Result<Option<Self>, sqlx::Error> {
        let applies_to = week_start_date(applies_to);

        let budget = sqlx::query_as::<_, Budget>(
            r#"
            SELECT id, amount, applies_to, created_at, updated_at
            FROM budget
            WHERE applies_to = $1
            "#,
        )
        .bind(applies_to)
        .fetch_optional(pool)
        .await?;

        Ok(budget)
    }

    /// Changes the amount of an existing budget row by id
    ///
    /// Returns the updated row, or `None` if the id matched nothing.
    pub async fn update_amount(
        pool: &PgPool,
        id: Uuid,
        amount: Decimal,
    ) -> Result<Option<Self>, sqlx::Error> {
        let budget = sqlx::query_as::<_, Budget>(
            r#"
            UPDATE budget
            SET amount = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, amount, applies_to, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(pool)
        .await?;

        Ok(budget)
    }
}
