/// Text similarity between the user's query and candidate titles.
///
/// The provider's own ordering is unreliable for short, ambiguous or
/// misspelled queries, so every candidate is scored here from scratch.
///
/// For a normalized query `q` and title `t`:
/// - `q == t` scores 1.0
/// - `q` appearing in `t` as a whole-word phrase scores
///   `0.75 + 0.25 * len(q) / len(t)`
/// - otherwise the best of whole-string normalized Levenshtein and token
///   coverage (mean best per-token Levenshtein of the query's words)
///
/// Titles are compared both with punctuation as a word break ("spider man")
/// and with punctuation dropped ("spiderman"); the better form counts. The
/// best score over a candidate's titles is kept; scores under the configured
/// floor are reported as 0.0.
use std::collections::HashMap;

use strsim::normalized_levenshtein;

use crate::{
    models::{CandidateSet, MediaKey},
    services::text::{compact_search_text, normalize_search_text},
};

const CONTAINMENT_BASE: f64 = 0.75;
const MIN_TOKEN_CHARS: usize = 3;

/// Similarity in `[0, 1]` for every candidate in the set
pub fn score_similarity(
    query: &str,
    candidates: &CandidateSet,
    floor: f64,
) -> HashMap<MediaKey, f64> {
    let query_norm = normalize_search_text(query);

    candidates
        .iter()
        .map(|candidate| {
            let best = candidate
                .titles
                .iter()
                .map(|title| title_similarity(&query_norm, title))
                .fold(0.0_f64, f64::max);

            let similarity = if best >= floor { best } else { 0.0 };
            (candidate.key, similarity)
        })
        .collect()
}

/// Similarity between an already-normalized query and a raw title
pub fn title_similarity(query_norm: &str, title: &str) -> f64 {
    let spaced = normalize_search_text(title);
    let compact = compact_search_text(title);

    let best = normalized_similarity(query_norm, &spaced);
    if compact == spaced {
        return best;
    }
    best.max(normalized_similarity(query_norm, &compact))
}

fn normalized_similarity(query_norm: &str, title_norm: &str) -> f64 {
    if query_norm.is_empty() || title_norm.is_empty() {
        return 0.0;
    }

    if title_norm == query_norm {
        return 1.0;
    }

    if contains_phrase(title_norm, query_norm) {
        let ratio = query_norm.chars().count() as f64 / title_norm.chars().count() as f64;
        return CONTAINMENT_BASE + (1.0 - CONTAINMENT_BASE) * ratio.clamp(0.0, 1.0);
    }

    fuzzy_similarity(query_norm, title_norm)
}

/// Whether `phrase` occurs in `text` starting and ending on word boundaries
fn contains_phrase(text: &str, phrase: &str) -> bool {
    let text_words: Vec<&str> = text.split(' ').collect();
    let phrase_words: Vec<&str> = phrase.split(' ').collect();

    text_words
        .windows(phrase_words.len())
        .any(|window| window == phrase_words.as_slice())
}

/// Best of whole-string and token-coverage similarity
fn fuzzy_similarity(query_norm: &str, title_norm: &str) -> f64 {
    normalized_levenshtein(query_norm, title_norm).max(token_coverage(query_norm, title_norm))
}

/// Mean, over query words, of each word's best match among the title's words
fn token_coverage(query_norm: &str, title_norm: &str) -> f64 {
    let title_tokens: Vec<&str> = title_norm
        .split(' ')
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .collect();
    if title_tokens.is_empty() {
        return 0.0;
    }

    let query_tokens: Vec<&str> = query_norm.split(' ').collect();
    let total: f64 = query_tokens
        .iter()
        .map(|q| {
            title_tokens
                .iter()
                .map(|t| normalized_levenshtein(q, t))
                .fold(0.0_f64, f64::max)
        })
        .sum();

    total / query_tokens.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaKind, RawCandidate, TitleFields};

    fn candidate(id: u64, title: &str, original: Option<&str>) -> RawCandidate {
        RawCandidate {
            key: MediaKey::new(MediaKind::Movie, id),
            titles: TitleFields::new(Some(title.to_string()), original.map(str::to_string))
                .unwrap(),
            release_date: None,
            popularity: 0.0,
            vote_count: 0,
            poster_path: None,
        }
    }

    #[test]
    fn test_exact_match_scores_one() {
        assert_eq!(title_similarity("cars", "Cars"), 1.0);
        assert_eq!(title_similarity("schindlers list", "Schindler's List"), 1.0);
    }

    #[test]
    fn test_phrase_containment_scores_high() {
        let sim = title_similarity("cars", "Cars 2");
        assert!(sim > 0.75 && sim < 1.0, "got {sim}");

        let long = title_similarity("harry potter", "Harry Potter and the Philosopher's Stone");
        assert!(long > 0.75 && long < sim, "got {long}");
    }

    #[test]
    fn test_containment_requires_word_boundaries() {
        // "car" is inside "scarface" but not as a word
        let sim = title_similarity("car", "Scarface");
        assert!(sim < CONTAINMENT_BASE, "got {sim}");
    }

    #[test]
    fn test_hyphenated_titles_match_spaced_query() {
        let sim = title_similarity("spider man", "Spider-Man: No Way Home");
        assert!(sim >= 0.75, "got {sim}");

        let sim = title_similarity("x men", "X-Men: Days of Future Past");
        assert!(sim >= 0.75, "got {sim}");

        assert_eq!(title_similarity("spider man", "Spider-Man"), 1.0);
    }

    #[test]
    fn test_joined_query_matches_hyphenated_title() {
        assert_eq!(title_similarity("spiderman", "Spider-Man"), 1.0);
    }

    #[test]
    fn test_spaced_query_survives_floor() {
        let set: CandidateSet = vec![candidate(1, "Spider-Man: No Way Home", None)]
            .into_iter()
            .collect();

        let scores = score_similarity("spider man", &set, 0.6);
        assert!(scores[&MediaKey::new(MediaKind::Movie, 1)] >= 0.75);
    }

    #[test]
    fn test_typos_still_match() {
        let sim = title_similarity("hary poter", "Harry Potter");
        assert!(sim > 0.8, "got {sim}");

        let sim = title_similarity("incepton", "Inception");
        assert!(sim > 0.85, "got {sim}");
    }

    #[test]
    fn test_unrelated_titles_score_low() {
        let sim = title_similarity("the godfather", "Finding Nemo");
        assert!(sim < 0.5, "got {sim}");
    }

    #[test]
    fn test_blank_inputs_score_zero() {
        assert_eq!(title_similarity("", "Cars"), 0.0);
        assert_eq!(title_similarity("cars", "!!!"), 0.0);
    }

    #[test]
    fn test_best_of_display_and_alternate_title() {
        let set: CandidateSet = vec![candidate(1, "Spirited Away", Some("Sen to Chihiro no Kamikakushi"))]
            .into_iter()
            .collect();

        let scores = score_similarity("Sen to Chihiro no Kamikakushi", &set, 0.0);
        assert_eq!(scores[&MediaKey::new(MediaKind::Movie, 1)], 1.0);
    }

    #[test]
    fn test_every_candidate_gets_a_score() {
        let set: CandidateSet = vec![
            candidate(1, "Alien", None),
            candidate(2, "Completely Different", None),
        ]
        .into_iter()
        .collect();

        let scores = score_similarity("Alien", &set, 0.6);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[&MediaKey::new(MediaKind::Movie, 1)], 1.0);
        assert_eq!(scores[&MediaKey::new(MediaKind::Movie, 2)], 0.0);
    }

    #[test]
    fn test_scores_stay_in_unit_range() {
        let titles = ["Cars", "Cars 2", "Scarface", "Car", "A", "Ça", "The Fast and the Furious"];
        for title in titles {
            for query in ["cars", "fast furious", "a", "ça"] {
                let sim = title_similarity(query, title);
                assert!((0.0..=1.0).contains(&sim), "{query} vs {title} = {sim}");
            }
        }
    }
}
