use axum::{extract::State, Json};

use crate::api::format::FilterOptionsResponse;
use crate::error::ApiError;
use crate::server::AppState;

/// GET /api/salaries/filters - known values for the client filter menus
pub async fn filters_get(State(state): State<AppState>) -> Result<Json<FilterOptionsResponse>, ApiError> {
    let options = state.salaries.filter_options().await?;
    Ok(Json(options.into()))
}
