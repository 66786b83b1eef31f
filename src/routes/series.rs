use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{error::AppResult, models::SeriesDetails, routes::AppState, services::catalog};

/// Handler for a series' seasons and episodes
pub async fn episodes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<Json<SeriesDetails>> {
    let series = catalog::series_episodes(state.provider.clone(), id).await?;
    Ok(Json(series))
}
