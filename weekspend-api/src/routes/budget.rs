/// Budget endpoints
///
/// One budget row per week, addressed by the week's Monday. Reading a week
/// that was never budgeted falls back to a default amount instead of a 404,
/// so the client always has a cap to render against.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;
use weekspend_shared::models::budget::Budget;

use crate::{
    app::AppState,
    error::{validation_error, ApiResult},
    routes::transactions::parse_amount,
};

/// Weekly cap assumed for weeks with no budget row
pub const DEFAULT_BUDGET: &str = "200.00";

/// Week selector query
#[derive(Debug, Deserialize)]
pub struct BudgetQuery {
    /// Any instant inside the requested week
    pub week: DateTime<Utc>,
}

/// Set-budget request
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertBudgetRequest {
    /// Weekly cap, as a decimal string
    pub amount: String,

    /// Any date inside the week being budgeted
    pub applies_to: NaiveDate,
}

/// Budget read response
///
/// `stored` distinguishes a real row from the default fallback.
#[derive(Debug, Serialize, Deserialize)]
pub struct BudgetResponse {
    /// Weekly cap, decimal string on the wire
    pub amount: Decimal,

    /// The Monday of the week
    pub applies_to: NaiveDate,

    /// Whether a budget row exists for this week
    pub stored: bool,
}

/// Returns the budget for a week, defaulting when none was set
pub async fn get_by_week(
    State(state): State<AppState>,
    Query(query): Query<BudgetQuery>,
) -> ApiResult<Json<BudgetResponse>> {
    let applies_to = weekspend_shared::week::week_start_date(query.week.date_naive());

    let response = match Budget::find_by_applies_to(&state.db, applies_to).await? {
        Some(budget) => BudgetResponse {
            amount: budget.amount,
            applies_to: budget.applies_to,
            stored: true,
        },
        None => BudgetResponse {
            amount: parse_amount(DEFAULT_BUDGET)?,
            applies_to,
            stored: false,
        },
    };

    Ok(Json(response))
}

/// Sets the budget for a week (insert or update)
pub async fn upsert(
    State(state): State<AppState>,
    Json(req): Json<UpsertBudgetRequest>,
) -> ApiResult<Json<Budget>> {
    req.validate().map_err(validation_error)?;
    let amount = parse_amount(&req.amount)?;

    let budget = Budget::upsert(&state.db, req.applies_to, amount).await?;
    Ok(Json(budget))
}
