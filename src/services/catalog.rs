use std::sync::Arc;

use crate::{
    config::SearchConfig,
    error::AppResult,
    models::{MediaKind, MediaSummary, SeriesDetails},
    services::providers::MetadataProvider,
};

/// Looks up a single title by kind and provider ID
pub async fn lookup_title(
    provider: Arc<dyn MetadataProvider>,
    kind: MediaKind,
    id: u64,
    config: &SearchConfig,
) -> AppResult<MediaSummary> {
    let candidate = provider.details(kind, id).await?;
    Ok(MediaSummary::from_candidate(&candidate, &config.poster_base_url))
}

/// Fetches a series with its seasons and episodes
pub async fn series_episodes(
    provider: Arc<dyn MetadataProvider>,
    id: u64,
) -> AppResult<SeriesDetails> {
    provider.series_details(id).await
}

/// Today's trending titles of one kind, in provider order
pub async fn trending_titles(
    provider: Arc<dyn MetadataProvider>,
    kind: MediaKind,
    config: &SearchConfig,
) -> AppResult<Vec<MediaSummary>> {
    let candidates = provider.trending(kind).await?;

    tracing::info!(
        kind = %kind,
        results = candidates.len(),
        provider = provider.name(),
        "Trending titles fetched"
    );

    Ok(candidates
        .iter()
        .map(|c| MediaSummary::from_candidate(c, &config.poster_base_url))
        .collect())
}
