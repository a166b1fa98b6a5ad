use axum::{extract::State, Json};

use crate::database::models::SalaryView;
use crate::error::ApiError;
use crate::server::AppState;

/// GET /api/salaries - every salary record, labels resolved
pub async fn list_get(State(state): State<AppState>) -> Result<Json<Vec<SalaryView>>, ApiError> {
    Ok(Json(state.records.list().await?))
}
