use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::errors::AppError;
use crate::models::chart::ChartResponse;
use crate::models::levels::LevelsQuery;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/chart",
    params(LevelsQuery),
    responses(
        (status = 200, description = "Candles, volume bars and level lines for the range", body = ChartResponse),
        (status = 400, description = "Invalid request or date range", body = crate::errors::ErrorResponse),
        (status = 404, description = "No candles for the range", body = crate::errors::ErrorResponse),
        (status = 422, description = "Not enough history for the requested clusters", body = crate::errors::ErrorResponse),
        (status = 502, description = "Market data provider failed", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_chart(
    State(state): State<AppState>,
    Query(query): Query<LevelsQuery>,
) -> Result<Json<ChartResponse>, AppError> {
    query
        .validate()
        .map_err(|err| AppError::Validation(err.to_string()))?;

    let analysis = state.level_service().analyze(&query).await?;
    Ok(Json(analysis.into_chart_response()))
}
