use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};

use super::parse_id;
use crate::api::format::{parse_body, UpdateSalaryRequest};
use crate::database::models::SalaryView;
use crate::error::ApiError;
use crate::server::AppState;

/// PUT /api/salaries/:id - partial update; always bumps `updated_date`
pub async fn update_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<SalaryView>, ApiError> {
    let id = parse_id(&id)?;
    let request: UpdateSalaryRequest =
        parse_body(&body).map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))?;

    Ok(Json(state.records.update(id, request.into()).await?))
}
