use axum::{body::Bytes, extract::State, http::StatusCode, Json};

use crate::api::format::{parse_body, CreateSalaryRequest};
use crate::database::models::SalaryView;
use crate::error::ApiError;
use crate::server::AppState;

/// POST /api/salaries - create a record from reference ids
pub async fn create_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SalaryView>), ApiError> {
    let request: CreateSalaryRequest =
        parse_body(&body).map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))?;
    let salary = request
        .into_new_salary()
        .map_err(|missing| ApiError::bad_request(format!("Missing required fields: {}", missing.join(", "))))?;

    let record = state.records.create(salary).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
