/// Query expansion
///
/// TMDB's search handles symbols poorly: "Fast & Furious" and "Fast and
/// Furious" return different result sets, and some long literal titles return
/// nothing at all while a single distinctive word from them succeeds. The
/// expander produces a small, ordered set of variants to search for.
use std::collections::HashSet;

use crate::services::text::{collapse_whitespace, words_only};

/// Symbol ⇄ word substitutions, applied in both directions
const SYMBOL_WORDS: [(char, &str); 6] = [
    ('&', "and"),
    ('+', "plus"),
    ('#', "number"),
    ('$', "dollar"),
    ('%', "percent"),
    ('@', "at"),
];

const ANCHOR_MIN_CHARS: usize = 4;
const ANCHOR_LIMIT: usize = 2;

/// Expands a trimmed, non-empty query into at most `max_variants` variants.
///
/// The original query is always first. When the cap is hit, symbol
/// substitutions are dropped before the words-only and anchor-word variants.
/// Variants are deduplicated case-insensitively.
pub fn expand_query(query: &str, max_variants: usize) -> Vec<String> {
    let max_variants = max_variants.max(1);
    let mut seen = HashSet::new();

    let mut preferred = Vec::new();
    push_unique(&mut seen, &mut preferred, query.to_string());

    let words = words_only(query);
    push_unique(&mut seen, &mut preferred, words.clone());
    for anchor in anchor_words(&words) {
        push_unique(&mut seen, &mut preferred, anchor);
    }

    let mut symbols = Vec::new();
    for variant in symbol_substitutions(query) {
        push_unique(&mut seen, &mut symbols, variant);
    }

    let room = max_variants.saturating_sub(preferred.len());
    let mut preferred = preferred.into_iter();

    let mut variants: Vec<String> = preferred.next().into_iter().collect();
    variants.extend(symbols.into_iter().take(room));
    variants.extend(preferred);
    variants.truncate(max_variants);
    variants
}

fn push_unique(seen: &mut HashSet<String>, list: &mut Vec<String>, variant: String) {
    if !variant.is_empty() && seen.insert(variant.to_lowercase()) {
        list.push(variant);
    }
}

/// Every rewrite of `query` produced by one substitution rule, in table order
fn symbol_substitutions(query: &str) -> Vec<String> {
    let mut variants = Vec::new();

    for (symbol, word) in SYMBOL_WORDS {
        if query.contains(symbol) {
            let padded = format!(" {} ", word);
            variants.push(collapse_whitespace(&query.replace(symbol, &padded)));
        }

        let tokens: Vec<&str> = query.split_whitespace().collect();
        if tokens.iter().any(|t| t.eq_ignore_ascii_case(word)) {
            let symbol = symbol.to_string();
            let replaced: Vec<&str> = tokens
                .iter()
                .map(|&t| {
                    if t.eq_ignore_ascii_case(word) {
                        symbol.as_str()
                    } else {
                        t
                    }
                })
                .collect();
            variants.push(replaced.join(" "));
        }
    }

    variants
}

/// The longest distinctive words of a words-only query
fn anchor_words(words: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tokens: Vec<&str> = words
        .split_whitespace()
        .filter(|t| t.chars().count() >= ANCHOR_MIN_CHARS)
        .filter(|t| seen.insert(t.to_lowercase()))
        .collect();

    // stable: equal lengths keep query order
    tokens.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    tokens
        .into_iter()
        .take(ANCHOR_LIMIT)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_query_has_one_variant() {
        assert_eq!(expand_query("Cars", 5), vec!["Cars"]);
    }

    #[test]
    fn test_plus_symbol_expands_to_word() {
        let variants = expand_query("Fast + Furious", 5);
        assert_eq!(variants[0], "Fast + Furious");
        assert!(variants.contains(&"Fast plus Furious".to_string()));
        assert!(variants.contains(&"Fast Furious".to_string()));
    }

    #[test]
    fn test_word_expands_to_symbol() {
        let variants = expand_query("Romeo and Juliet", 5);
        assert!(variants.contains(&"Romeo & Juliet".to_string()));
    }

    #[test]
    fn test_word_to_symbol_is_case_insensitive_whole_word() {
        let variants = expand_query("Breakfast AT Tiffanys", 5);
        assert!(variants.contains(&"Breakfast @ Tiffanys".to_string()));

        // "at" inside another word is not a match
        let variants = expand_query("Attack the Block", 5);
        assert!(!variants.iter().any(|v| v.contains('@')));
    }

    #[test]
    fn test_ampersand_variant_order() {
        let variants = expand_query("Tom & Jerry", 5);
        assert_eq!(
            variants,
            vec!["Tom & Jerry", "Tom and Jerry", "Tom Jerry", "Jerry"]
        );
    }

    #[test]
    fn test_words_only_variant_strips_punctuation() {
        let variants = expand_query("Schindler's List", 5);
        assert_eq!(variants[0], "Schindler's List");
        assert!(variants.contains(&"Schindlers List".to_string()));
    }

    #[test]
    fn test_anchor_words_longest_first() {
        let variants = expand_query("The Lord of the Rings", 5);
        assert_eq!(variants, vec!["The Lord of the Rings", "Rings", "Lord"]);
    }

    #[test]
    fn test_anchor_words_deduplicated_case_insensitively() {
        assert_eq!(anchor_words("Alien ALIEN Covenant"), vec!["Covenant", "Alien"]);
    }

    #[test]
    fn test_truncation_drops_symbol_variants_first() {
        let variants = expand_query("Fast & Furious + Friends", 5);
        assert_eq!(variants.len(), 5);
        assert_eq!(variants[0], "Fast & Furious + Friends");
        assert!(variants.contains(&"Fast Furious Friends".to_string()));
        assert!(variants.contains(&"Furious".to_string()));
        assert!(variants.contains(&"Friends".to_string()));
        assert!(variants.contains(&"Fast and Furious + Friends".to_string()));
        assert!(!variants.contains(&"Fast & Furious plus Friends".to_string()));
    }

    #[test]
    fn test_small_cap_keeps_original_first() {
        let variants = expand_query("Fast & Furious + Friends", 2);
        assert_eq!(variants, vec!["Fast & Furious + Friends", "Fast Furious Friends"]);

        assert_eq!(expand_query("Fast & Furious", 0), vec!["Fast & Furious"]);
    }

    #[test]
    fn test_expansion_is_bounded() {
        let queries = [
            "A",
            "Cars",
            "Fast + Furious",
            "$5 a Day @ 100% & #1 plus more",
            "!!!",
            "千と千尋の神隠し",
            "Mission: Impossible – Dead Reckoning Part One",
        ];

        for query in queries {
            for max in 1..=6 {
                let variants = expand_query(query, max);
                assert!(!variants.is_empty(), "no variants for {query:?}");
                assert!(variants.len() <= max, "too many variants for {query:?}");
                assert_eq!(variants[0], query);

                let unique: HashSet<String> = variants.iter().map(|v| v.to_lowercase()).collect();
                assert_eq!(unique.len(), variants.len());
            }
        }
    }
}
