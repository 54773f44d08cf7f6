/// Transaction endpoints
///
/// # Endpoints
///
/// - `GET    /v1/transactions?week=<rfc3339>` - One week's transactions
/// - `POST   /v1/transactions` - Record a spend
/// - `PUT    /v1/transactions/:id` - Edit amount/name in place
/// - `DELETE /v1/transactions/:id` - Delete (missing id is not an error)
/// - `GET    /v1/transactions/spent?week=<rfc3339>` - One week's total
/// - `GET    /v1/transactions/spent-per-week` - Yearly grouped summary
///
/// Amounts cross the wire as decimal strings and are parsed into fixed-point
/// decimals; binary floats never touch money. The `week` query parameter is
/// any instant inside the week and is truncated to the bucket server-side.

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use weekspend_shared::models::transaction::{CreateTransaction, Transaction, UpdateTransaction};
use weekspend_shared::week::{group_spend_by_year, sort_spend_by_year, week_start, YearSpend};

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult, ValidationErrorDetail},
    middleware::session::SessionContext,
};

/// Parses a wire amount (decimal string) into a fixed-point decimal
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, ApiError> {
    raw.parse::<Decimal>().map_err(|_| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "amount".to_string(),
            message: format!("'{}' is not a decimal amount", raw),
        }])
    })
}

/// Week selector query
#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    /// Any instant inside the requested week
    pub week: DateTime<Utc>,
}

/// Create-transaction request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    /// Amount spent, as a decimal string
    pub amount: String,

    /// Short label
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    /// When the money was spent
    pub paid_at: DateTime<Utc>,
}

/// Update-transaction request; only present fields change
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTransactionRequest {
    /// New amount, as a decimal string
    pub amount: Option<String>,

    /// New label
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: Option<String>,
}

/// Delete-transaction response
///
/// `for_week` lets the client refresh the affected week's views.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTransactionResponse {
    /// Whether a row was removed
    pub deleted: bool,

    /// Week bucket of the removed row, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub for_week: Option<DateTime<Utc>>,
}

/// Weekly total response
#[derive(Debug, Serialize, Deserialize)]
pub struct SpentResponse {
    /// Summed spend, decimal string on the wire
    pub amount: Decimal,
}

/// Lists one week's transactions, newest first
pub async fn list_by_week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = Transaction::list_by_week(&state.db, week_start(query.week)).await?;
    Ok(Json(transactions))
}

/// Records a spend for the signed-in user
///
/// `for_week` is derived server-side; the session context supplies the user.
pub async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Json(req): Json<CreateTransactionRequest>,
) -> ApiResult<Json<Transaction>> {
    req.validate().map_err(validation_error)?;
    let amount = parse_amount(&req.amount)?;

    let transaction = Transaction::create(
        &state.db,
        CreateTransaction {
            amount,
            name: req.name,
            paid_at: req.paid_at,
            user: ctx.user,
        },
    )
    .await?;

    Ok(Json(transaction))
}

/// Edits a transaction's amount/name in place
///
/// # Errors
///
/// - `404 Not Found`: no row with this id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTransactionRequest>,
) -> ApiResult<Json<Transaction>> {
    req.validate().map_err(validation_error)?;
    let amount = req.amount.as_deref().map(parse_amount).transpose()?;

    let transaction = Transaction::update(
        &state.db,
        id,
        UpdateTransaction {
            amount,
            name: req.name,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Transaction not found".to_string()))?;

    Ok(Json(transaction))
}

/// Deletes a transaction
///
/// Deleting an id that matches nothing returns `deleted: false`, not an
/// error.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteTransactionResponse>> {
    let deleted = Transaction::delete(&state.db, id).await?;

    Ok(Json(DeleteTransactionResponse {
        deleted: deleted.is_some(),
        for_week: deleted.map(|t| t.for_week),
    }))
}

/// Returns one week's summed spend (zero for an empty week)
pub async fn spent_by_week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> ApiResult<Json<SpentResponse>> {
    let amount = Transaction::spent_by_week(&state.db, week_start(query.week)).await?;
    Ok(Json(SpentResponse { amount }))
}

/// Returns all weekly totals grouped by year, most recent first
pub async fn spent_per_week(State(state): State<AppState>) -> ApiResult<Json<Vec<YearSpend>>> {
    let rows = Transaction::spent_per_week(&state.db).await?;
    let summary = sort_spend_by_year(group_spend_by_year(rows));
    Ok(Json(summary))
}
