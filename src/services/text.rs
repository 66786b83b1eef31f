/// Strips everything except letters, digits and whitespace, then collapses
/// whitespace runs and trims.
pub fn words_only(value: &str) -> String {
    let stripped: String = value
        .chars()
        .filter(|ch| ch.is_alphanumeric() || ch.is_whitespace())
        .collect();
    collapse_whitespace(&stripped)
}

/// Normalizes text for comparison: every non-alphanumeric character becomes
/// a word break, then lowercased.
///
/// "Spider-Man: No Way Home" becomes "spider man no way home".
pub fn normalize_search_text(value: &str) -> String {
    let spaced: String = value
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { ' ' })
        .collect();
    collapse_whitespace(&spaced).to_lowercase()
}

/// Like [`normalize_search_text`] but punctuation is dropped, joining the
/// pieces it separated: "Schindler's List" becomes "schindlers list".
pub fn compact_search_text(value: &str) -> String {
    words_only(value).to_lowercase()
}

pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
