use axum::{body::Bytes, extract::State, Json};

use crate::api::format::{AverageSalaryRequest, AverageSalaryResponse};
use crate::error::ApiError;
use crate::server::AppState;

/// POST /api/salaries/average-salary - average salary over the filtered subset
pub async fn average_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AverageSalaryResponse>, ApiError> {
    let request = AverageSalaryRequest::from_body(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))?;

    let result = state.salaries.average_salary(request.into()).await?;
    Ok(Json(result.into()))
}
