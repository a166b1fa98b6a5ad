use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::format::LookupResponse;
use crate::error::ApiError;
use crate::server::AppState;
use crate::types::Dimension;

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    /// Substring to search for; empty matches every label
    pub q: Option<String>,
}

/// GET /api/salaries/lookup/:dimension?q= - diagnostic label search
pub async fn lookup_get(
    State(state): State<AppState>,
    Path(dimension): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<LookupResponse>, ApiError> {
    let dimension: Dimension = dimension.parse().map_err(ApiError::bad_request)?;
    let needle = query.q.unwrap_or_default();

    let matches = state.salaries.lookup(dimension, &needle).await?;
    Ok(Json(LookupResponse {
        dimension,
        query: needle,
        matches,
    }))
}
