use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::{
    error::AppError,
    models::{CandidateSet, MediaKind, RawCandidate},
    services::providers::MetadataProvider,
};

/// Fetches candidates for every variant and media kind in parallel
///
/// One retrieval is spawned per (variant, kind) pair and each is bounded by
/// `timeout`. A retrieval that errors, times out or panics contributes no
/// candidates. Results are merged after all retrievals finish, in spawn order,
/// so completion order never affects the resulting set.
///
/// Retrievals live in a [`JoinSet`]: dropping the returned future aborts any
/// that are still in flight.
pub async fn fetch_candidates(
    provider: &Arc<dyn MetadataProvider>,
    variants: &[String],
    timeout: Duration,
) -> CandidateSet {
    let mut tasks = JoinSet::new();
    let mut labels: Vec<(&str, MediaKind)> = Vec::new();

    for variant in variants {
        for kind in MediaKind::ALL {
            let index = labels.len();
            labels.push((variant.as_str(), kind));

            let provider = Arc::clone(provider);
            let query = variant.clone();
            tasks.spawn(async move {
                let result = tokio::time::timeout(timeout, provider.search(&query, kind)).await;
                (index, result)
            });
        }
    }

    let attempted = labels.len();
    let mut batches: Vec<Option<Vec<RawCandidate>>> = vec![None; attempted];
    let mut errors = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(Ok(candidates)))) => batches[index] = Some(candidates),
            Ok((index, Ok(Err(e)))) => {
                let (variant, kind) = labels[index];
                tracing::warn!(
                    error = %e,
                    variant = %variant,
                    kind = %kind,
                    provider = provider.name(),
                    "Candidate retrieval failed"
                );
                errors.push(e);
            }
            Ok((index, Err(_elapsed))) => {
                let (variant, kind) = labels[index];
                tracing::warn!(
                    variant = %variant,
                    kind = %kind,
                    timeout_ms = timeout.as_millis() as u64,
                    provider = provider.name(),
                    "Candidate retrieval timed out"
                );
                errors.push(AppError::ExternalApi(format!(
                    "{} search for '{}' timed out",
                    kind, variant
                )));
            }
            Err(e) => {
                tracing::error!(error = %e, "Task join error");
                errors.push(AppError::Internal(e.to_string()));
            }
        }
    }

    let succeeded = batches.iter().filter(|batch| batch.is_some()).count();

    if !errors.is_empty() {
        tracing::warn!(
            success_count = succeeded,
            error_count = errors.len(),
            "Partial candidate fetch failure"
        );
    }

    if succeeded == 0 && attempted > 0 {
        tracing::warn!(
            attempted = attempted,
            provider = provider.name(),
            "Every candidate retrieval failed"
        );
    }

    batches.into_iter().flatten().flatten().collect()
}
