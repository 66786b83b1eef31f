use crate::{
    config::SearchConfig,
    models::MediaSummary,
    services::{
        candidate_fetcher::fetch_candidates, providers::MetadataProvider,
        query_expander::expand_query, rank_fuser::fuse, similarity::score_similarity,
    },
};
use std::sync::Arc;

/// Service function for title search
///
/// Runs the full pipeline: expand the query into variants, fetch candidates
/// for every variant in parallel, score text similarity against the original
/// query, and fuse the signals into a ranked, deduplicated list.
///
/// Never fails: an empty query, a provider outage and "nothing matched" all
/// produce an empty list. Failure details are only logged.
pub async fn search_titles(
    provider: Arc<dyn MetadataProvider>,
    query: &str,
    config: &SearchConfig,
) -> Vec<MediaSummary> {
    let query = query.trim();
    if query.is_empty() {
        tracing::debug!("Empty search query, skipping provider");
        return Vec::new();
    }

    let variants = expand_query(query, config.max_variants);
    let candidates = fetch_candidates(&provider, &variants, config.fetch_timeout).await;
    let candidate_count = candidates.len();

    let similarity = score_similarity(query, &candidates, config.similarity_floor);
    let results = fuse(
        candidates,
        &similarity,
        &variants,
        &config.weights,
        &config.poster_base_url,
    );

    tracing::info!(
        query = %query,
        variants = variants.len(),
        candidates = candidate_count,
        results = results.len(),
        provider = provider.name(),
        "Title search completed"
    );

    results
}
