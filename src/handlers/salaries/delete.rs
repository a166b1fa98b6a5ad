use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::parse_id;
use crate::error::ApiError;
use crate::server::AppState;

/// DELETE /api/salaries/:id
pub async fn record_delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.records.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
