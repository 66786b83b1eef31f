use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{MediaKind, MediaSummary},
    routes::AppState,
    services::catalog,
};

/// Handler for today's trending titles of one kind
pub async fn trending(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> AppResult<Json<Vec<MediaSummary>>> {
    let kind: MediaKind = kind.parse()?;
    let titles = catalog::trending_titles(state.provider.clone(), kind, &state.search).await?;
    Ok(Json(titles))
}
