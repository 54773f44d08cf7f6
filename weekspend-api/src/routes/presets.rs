/// Preset endpoints
///
/// Presets are reusable amount+name templates for recurring spends. Creating
/// a transaction from a preset is a plain transaction create on the client
/// side; the server only stores the templates.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;
use weekspend_shared::models::preset::{CreatePreset, Preset};

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
    routes::transactions::parse_amount,
};

/// Create-preset request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePresetRequest {
    /// Template amount, as a decimal string
    pub amount: String,

    /// Template label
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,
}

/// Update-preset request; replaces both fields
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePresetRequest {
    /// New amount, as a decimal string
    pub amount: String,

    /// New label
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,
}

/// Lists all presets, oldest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Preset>>> {
    let presets = Preset::list(&state.db).await?;
    Ok(Json(presets))
}

/// Creates a preset
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePresetRequest>,
) -> ApiResult<Json<Preset>> {
    req.validate().map_err(validation_error)?;
    let amount = parse_amount(&req.amount)?;

    let preset = Preset::create(
        &state.db,
        CreatePreset {
            amount,
            name: req.name,
        },
    )
    .await?;

    Ok(Json(preset))
}

/// Replaces a preset's amount and name
///
/// # Errors
///
/// - `404 Not Found`: no preset with this id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePresetRequest>,
) -> ApiResult<Json<Preset>> {
    req.validate().map_err(validation_error)?;
    let amount = parse_amount(&req.amount)?;

    let preset = Preset::update(&state.db, id, amount, req.name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Preset not found".to_string()))?;

    Ok(Json(preset))
}

/// Deletes a preset
///
/// # Errors
///
/// - `404 Not Found`: no preset with this id
pub async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<()> {
    if !Preset::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Preset not found".to_string()));
    }
    Ok(())
}
