/// Transaction model and store operations
///
/// A transaction is one recorded spend. Its `for_week` column is a pure
/// function of `paid_at` (the Monday-aligned week start) and is the key
/// both the weekly listing and the budget comparison use.
///
/// Postgres cannot hold `date_trunc` over `timestamptz` in a generated
/// column (the function is only STABLE), so `for_week` is computed here at
/// write time and re-verified when rows are read back.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE transactions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     amount NUMERIC(10, 2) NOT NULL,
///     name TEXT NOT NULL,
///     paid_at TIMESTAMPTZ NOT NULL,
///     for_week TIMESTAMPTZ NOT NULL,
///     user_name TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// CREATE INDEX idx_transactions_for_week ON transactions (for_week);
/// ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::week::{week_start, WeekSpend};

use super::user::UserName;

/// A transaction row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Transaction {
    /// Unique transaction id (UUID v4)
    pub id: Uuid,

    /// Amount spent, fixed-point decimal
    pub amount: Decimal,

    /// Short human label ("groceries", "fuel", ...)
    pub name: String,

    /// When the money was spent
    pub paid_at: DateTime<Utc>,

    /// Week bucket: always `week_start(paid_at)`
    pub for_week: DateTime<Utc>,

    /// Who spent it
    #[sqlx(rename = "user_name")]
    pub user: UserName,

    /// Row creation time
    pub created_at: DateTime<Utc>,

    /// Last edit time
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransaction {
    pub amount: Decimal,
    pub name: String,
    pub paid_at: DateTime<Utc>,
    pub user: UserName,
}

/// Input for editing a transaction in place
///
/// Only `Some` fields are changed.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransaction {
    pub amount: Option<Decimal>,
    pub name: Option<String>,
}

impl Transaction {
    /// Records a new transaction
    ///
    /// `for_week` is derived from `paid_at` here, never supplied by the
    /// caller.
    pub async fn create(pool: &PgPool, data: CreateTransaction) -> Result<Self, sqlx::Error> {
        let for_week = week_start(data.paid_at);

        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (amount, name, paid_at, for_week, user_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, amount, name, paid_at, for_week, user_name, created_at, updated_at
            "#,
        )
        .bind(data.amount)
        .bind(data.name)
        .bind(data.paid_at)
        .bind(for_week)
        .bind(data.user)
        .fetch_one(pool)
        .await?;

        Ok(transaction)
    }

    /// Edits amount and/or name in place
    ///
    /// Returns the updated row, or `None` if the id matched nothing.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTransaction,
    ) -> Result<Option<Self>, sqlx::Error> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions
            SET amount = COALESCE($2, amount),
                name = COALESCE($3, name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, amount, name, paid_at, for_week, user_name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.amount)
        .bind(data.name)
        .fetch_optional(pool)
        .await?;

        Ok(transaction)
    }

    /// Deletes a transaction by id
    ///
    /// Returns the deleted row so callers can refresh the affected week.
    /// Deleting a missing id yields `Ok(None)`, never an error.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            DELETE FROM transactions
            WHERE id = $1
            RETURNING id, amount, name, paid_at, for_week, user_name, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(transaction)
    }

    /// Lists the transactions of one week bucket, newest first
    ///
    /// Re-verifies the `for_week` invariant on every row read back; a
    /// mismatch means the write path and the bucketing function disagree and
    /// is logged loudly rather than crashing the request.
    pub async fn list_by_week(
        pool: &PgPool,
        for_week: DateTime<Utc>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, amount, name, paid_at, for_week, user_name, created_at, updated_at
            FROM transactions
            WHERE for_week = $1
            ORDER BY paid_at DESC
            "#,
        )
        .bind(for_week)
        .fetch_all(pool)
        .await?;

        for t in &transactions {
            if !t.week_invariant_holds() {
                warn!(
                    transaction_id = %t.id,
                    for_week = %t.for_week,
                    paid_at = %t.paid_at,
                    "stored for_week disagrees with week_start(paid_at)"
                );
            }
        }

        Ok(transactions)
    }

    /// Total spend for one week bucket (zero when the week has no rows)
    pub async fn spent_by_week(
        pool: &PgPool,
        for_week: DateTime<Utc>,
    ) -> Result<Decimal, sqlx::Error> {
        let (amount,): (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM transactions
            WHERE for_week = $1
            "#,
        )
        .bind(for_week)
        .fetch_one(pool)
        .await?;

        Ok(amount)
    }

    /// Total spend per week bucket, across all history
    ///
    /// Summation happens in SQL over NUMERIC; the result feeds the yearly
    /// grouping in `week::group_spend_by_year`.
    pub async fn spent_per_week(pool: &PgPool) -> Result<Vec<WeekSpend>, sqlx::Error> {
        let rows = sqlx::query_as::<_, WeekSpend>(
            r#"
            SELECT for_week AS week, SUM(amount) AS amount
            FROM transactions
            GROUP BY for_week
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// True when `for_week` equals the week start derived from `paid_at`
    pub fn week_invariant_holds(&self) -> bool {
        self.for_week == week_start(self.paid_at)
    }
}
