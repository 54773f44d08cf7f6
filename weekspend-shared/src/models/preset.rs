/// Preset model and store operations
///
/// Presets are named shortcut amounts ("coffee 4.50") the UI offers when
/// recording a transaction. Plain CRUD, no derived fields.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE presets (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     amount NUMERIC(10, 2) NOT NULL,
///     name TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A preset row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Preset {
    /// Unique preset id (UUID v4)
    pub id: Uuid,

    /// Shortcut amount, fixed-point decimal
    pub amount: Decimal,

    /// Display name
    pub name: String,

    /// Row creation time
    pub created_at: DateTime<Utc>,

    /// Last edit time
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a preset
#[derive(Debug, Clone)]
pub struct CreatePreset {
    pub amount: Decimal,
    pub name: String,
}

impl Preset {
    /// Creates a new preset
    pub async fn create(pool: &PgPool, data: CreatePreset) -> Result<Self, sqlx::Error> {
        let preset = sqlx::query_as::<_, Preset>(
            r#"
            INSERT INTO presets (amount, name)
            VALUES ($1, $2)
            RETURNING id, amount, name, created_at, updated_at
            "#,
        )
        .bind(data.amount)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(preset)
    }

    /// Lists all presets, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let presets = sqlx::query_as::<_, Preset>(
            r#"
            SELECT id, amount, name, created_at, updated_at
            FROM presets
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(presets)
    }

    /// Updates a preset's amount and name
    ///
    /// Returns the updated row, or `None` if the id matched nothing.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        amount: Decimal,
        name: String,
    ) -> Result<Option<Self>, sqlx::Error> {
        let preset = sqlx::query_as::<_, Preset>(
            r#"
            UPDATE presets
            SET amount = $2, name = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, amount, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(preset)
    }

    /// Deletes a preset by id
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM presets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
