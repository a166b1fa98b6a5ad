use axum::{
    extract::{Path, State},
    Json,
};

use super::parse_id;
use crate::database::models::SalaryView;
use crate::error::ApiError;
use crate::server::AppState;

/// GET /api/salaries/:id
pub async fn record_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SalaryView>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.records.get(id).await?))
}
