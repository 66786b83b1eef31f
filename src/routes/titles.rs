use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{MediaKind, MediaSummary},
    routes::AppState,
    services::{catalog, title_search},
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Handler for title search endpoint
///
/// Always 200: provider failures degrade to an empty list.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<MediaSummary>> {
    tracing::debug!(request_id = %request_id, query = %params.q, "Title search requested");
    let results = title_search::search_titles(state.provider.clone(), &params.q, &state.search).await;
    Json(results)
}

/// Handler for a single title by kind and provider ID
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, u64)>,
) -> AppResult<Json<MediaSummary>> {
    let kind: MediaKind = kind.parse()?;
    let summary = catalog::lookup_title(state.provider.clone(), kind, id, &state.search).await?;
    Ok(Json(summary))
}
