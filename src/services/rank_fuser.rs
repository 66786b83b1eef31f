use std::collections::HashMap;

use crate::{
    config::RankWeights,
    models::{CandidateSet, MediaKey, MediaSummary, RawCandidate, ScoredCandidate},
};

/// Blends similarity, popularity, vote count and exact-match signals into a
/// single score per candidate and returns the candidates best-first.
///
/// The sort is stable: equal scores keep the candidate set's order, so the
/// same input always produces the same output.
pub fn rank_candidates(
    candidates: CandidateSet,
    similarity: &HashMap<MediaKey, f64>,
    exact_forms: &[String],
    weights: &RankWeights,
) -> Vec<ScoredCandidate> {
    let exact_forms: Vec<String> = exact_forms.iter().map(|f| exact_form(f)).collect();

    let mut scored: Vec<ScoredCandidate> = candidates
        .into_candidates()
        .map(|candidate| {
            let sim = similarity.get(&candidate.key).copied().unwrap_or(0.0);
            let is_exact = exact_forms.contains(&exact_form(candidate.titles.display()));
            let score = final_score(&candidate, sim, is_exact, weights);
            ScoredCandidate { candidate, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Ranks candidates and converts them to summaries
pub fn fuse(
    candidates: CandidateSet,
    similarity: &HashMap<MediaKey, f64>,
    exact_forms: &[String],
    weights: &RankWeights,
    poster_base_url: &str,
) -> Vec<MediaSummary> {
    rank_candidates(candidates, similarity, exact_forms, weights)
        .iter()
        .map(|scored| MediaSummary::from_candidate(&scored.candidate, poster_base_url))
        .collect()
}

/// Score for one candidate given its similarity and exact-match status
pub fn final_score(
    candidate: &RawCandidate,
    similarity: f64,
    is_exact_match: bool,
    weights: &RankWeights,
) -> f64 {
    let popularity = normalize(candidate.popularity, weights.popularity_cap);
    let vote_count = normalize(candidate.vote_count as f64, weights.vote_count_cap);
    let bonus = if is_exact_match {
        weights.exact_match_bonus
    } else {
        0.0
    };

    similarity * weights.similarity
        + popularity * weights.popularity
        + vote_count * weights.vote_count
        + bonus
}

/// `value / cap` clamped to `[0, 1]`; a non-positive cap disables the signal
fn normalize(value: f64, cap: f64) -> f64 {
    if cap <= 0.0 {
        return 0.0;
    }
    (value / cap).clamp(0.0, 1.0)
}

fn exact_form(value: &str) -> String {
    value.trim().to_lowercase()
}
