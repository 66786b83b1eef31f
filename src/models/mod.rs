use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

pub mod tmdb;

pub use tmdb::{TmdbEpisode, TmdbItem, TmdbSeason, TmdbSeasonSummary, TmdbSeriesDetails};

/// Kind of media a title refers to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    #[serde(rename = "tv", alias = "series")]
    Series,
}

impl MediaKind {
    /// Every kind the provider is queried for on each search variant
    pub const ALL: [MediaKind; 2] = [MediaKind::Movie, MediaKind::Series];

    /// Path segment used by TMDB for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "tv" | "series" => Ok(MediaKind::Series),
            other => Err(AppError::InvalidInput(format!(
                "Unknown media kind '{}', expected 'movie' or 'tv'",
                other
            ))),
        }
    }
}

/// Identifier of a candidate within the provider's namespace
///
/// TMDB numbers movies and series independently, so the kind is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaKey {
    pub kind: MediaKind,
    pub id: u64,
}

impl MediaKey {
    pub fn new(kind: MediaKind, id: u64) -> Self {
        Self { kind, id }
    }
}

impl Display for MediaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.kind, self.id)
    }
}

/// Title strings of a candidate; a display title is always present
#[derive(Debug, Clone, PartialEq)]
pub struct TitleFields {
    display: String,
    alternate: Option<String>,
}

impl TitleFields {
    /// Builds the title fields, preferring `primary` for display.
    ///
    /// Returns `None` when neither title has any non-whitespace content.
    pub fn new(primary: Option<String>, original: Option<String>) -> Option<Self> {
        let primary = non_blank(primary);
        let original = non_blank(original);

        match (primary, original) {
            (Some(display), Some(alternate)) if alternate != display => Some(Self {
                display,
                alternate: Some(alternate),
            }),
            (Some(display), _) | (None, Some(display)) => Some(Self {
                display,
                alternate: None,
            }),
            (None, None) => None,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    #[cfg(test)]
    pub fn alternate(&self) -> Option<&str> {
        self.alternate.as_deref()
    }

    /// Display title followed by the alternate title, if any
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.display.as_str()).chain(self.alternate.as_deref())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A validated search candidate returned by a metadata provider
///
/// Optional numeric signals are already defaulted to zero, so ranking never
/// has to deal with missing fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    pub key: MediaKey,
    pub titles: TitleFields,
    pub release_date: Option<String>,
    pub popularity: f64,
    pub vote_count: u64,
    pub poster_path: Option<String>,
}

impl RawCandidate {
    /// Release year taken from the first four characters of the release date
    pub fn year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }
}

/// Candidates merged across every variant and kind, keyed by [`MediaKey`]
///
/// Re-inserting a key replaces the stored candidate but keeps its original
/// position, so iteration order depends only on merge order.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    entries: IndexMap<MediaKey, RawCandidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, candidate: RawCandidate) {
        self.entries.insert(candidate.key, candidate);
    }

    #[cfg(test)]
    pub fn get(&self, key: &MediaKey) -> Option<&RawCandidate> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawCandidate> {
        self.entries.values()
    }

    pub fn into_candidates(self) -> impl Iterator<Item = RawCandidate> {
        self.entries.into_values()
    }
}

impl Extend<RawCandidate> for CandidateSet {
    fn extend<I: IntoIterator<Item = RawCandidate>>(&mut self, iter: I) {
        for candidate in iter {
            self.insert(candidate);
        }
    }
}

impl FromIterator<RawCandidate> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = RawCandidate>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        set.extend(iter);
        set
    }
}

/// A candidate together with its fused ranking score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: RawCandidate,
    pub score: f64,
}

/// Search result returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaSummary {
    /// Unique within a result list, e.g. `movie-550` or `tv-1399`
    pub id: String,
    pub title: String,
    /// Provider identifier used to build playback and detail URLs
    pub provider_id: u64,
    pub year: Option<i32>,
    pub kind: MediaKind,
    pub poster_url: Option<String>,
}

impl MediaSummary {
    pub fn from_candidate(candidate: &RawCandidate, image_base_url: &str) -> Self {
        Self {
            id: candidate.key.to_string(),
            title: candidate.titles.display().to_string(),
            provider_id: candidate.key.id,
            year: candidate.year(),
            kind: candidate.key.kind,
            poster_url: image_url(image_base_url, candidate.poster_path.as_deref()),
        }
    }
}

/// Joins an image path onto the image base URL; blank paths yield `None`
pub fn image_url(base_url: &str, path: Option<&str>) -> Option<String> {
    let path = path?.trim().trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    Some(format!("{}/{}", base_url.trim_end_matches('/'), path))
}

// ============================================================================
// Series Structure
// ============================================================================

/// A series with every non-special season and its episodes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesDetails {
    pub id: u64,
    pub name: String,
    pub number_of_seasons: u32,
    pub number_of_episodes: u32,
    pub seasons: Vec<Season>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Season {
    pub season_number: u32,
    pub name: String,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    pub episode_number: u32,
    pub name: String,
    pub overview: Option<String>,
    pub still_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(kind: MediaKind, id: u64, title: &str) -> RawCandidate {
        RawCandidate {
            key: MediaKey::new(kind, id),
            titles: TitleFields::new(Some(title.to_string()), None).unwrap(),
            release_date: None,
            popularity: 0.0,
            vote_count: 0,
            poster_path: None,
        }
    }

    #[test]
    fn test_media_kind_serialization() {
        assert_eq!(serde_json::to_string(&MediaKind::Movie).unwrap(), "\"movie\"");
        assert_eq!(serde_json::to_string(&MediaKind::Series).unwrap(), "\"tv\"");

        let series: MediaKind = serde_json::from_str("\"series\"").unwrap();
        assert_eq!(series, MediaKind::Series);
    }

    #[test]
    fn test_media_kind_from_str() {
        assert_eq!("movie".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert_eq!("TV".parse::<MediaKind>().unwrap(), MediaKind::Series);
        assert_eq!("series".parse::<MediaKind>().unwrap(), MediaKind::Series);
        assert!(matches!(
            "person".parse::<MediaKind>(),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_media_key_display() {
        assert_eq!(MediaKey::new(MediaKind::Movie, 550).to_string(), "movie-550");
        assert_eq!(MediaKey::new(MediaKind::Series, 1399).to_string(), "tv-1399");
    }

    #[test]
    fn test_title_fields_prefers_primary() {
        let titles =
            TitleFields::new(Some("Spirited Away".into()), Some("千と千尋の神隠し".into())).unwrap();
        assert_eq!(titles.display(), "Spirited Away");
        assert_eq!(titles.alternate(), Some("千と千尋の神隠し"));
        assert_eq!(titles.iter().count(), 2);
    }

    #[test]
    fn test_title_fields_falls_back_to_original() {
        let titles = TitleFields::new(Some("   ".into()), Some("Amélie".into())).unwrap();
        assert_eq!(titles.display(), "Amélie");
        assert_eq!(titles.alternate(), None);
    }

    #[test]
    fn test_title_fields_drops_duplicate_alternate() {
        let titles = TitleFields::new(Some("Heat".into()), Some("Heat".into())).unwrap();
        assert_eq!(titles.alternate(), None);
    }

    #[test]
    fn test_title_fields_requires_a_title() {
        assert!(TitleFields::new(None, None).is_none());
        assert!(TitleFields::new(Some("".into()), Some(" ".into())).is_none());
    }

    #[test]
    fn test_year_from_release_date() {
        let mut c = candidate(MediaKind::Movie, 1, "Heat");
        c.release_date = Some("1995-12-15".to_string());
        assert_eq!(c.year(), Some(1995));

        c.release_date = Some("19".to_string());
        assert_eq!(c.year(), None);

        c.release_date = None;
        assert_eq!(c.year(), None);
    }

    #[test]
    fn test_candidate_set_last_write_wins_keeps_position() {
        let mut set = CandidateSet::new();
        set.insert(candidate(MediaKind::Movie, 1, "First"));
        set.insert(candidate(MediaKind::Movie, 2, "Second"));
        set.insert(candidate(MediaKind::Movie, 1, "First (updated)"));

        assert_eq!(set.len(), 2);
        let titles: Vec<&str> = set.iter().map(|c| c.titles.display()).collect();
        assert_eq!(titles, vec!["First (updated)", "Second"]);
    }

    #[test]
    fn test_candidate_set_keeps_kinds_apart() {
        let set: CandidateSet = vec![
            candidate(MediaKind::Movie, 7, "Seven"),
            candidate(MediaKind::Series, 7, "Seven Seas"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_image_url_joins_paths() {
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/w780", Some("/abc.jpg")),
            Some("https://image.tmdb.org/t/p/w780/abc.jpg".to_string())
        );
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/w780/", Some("abc.jpg")),
            Some("https://image.tmdb.org/t/p/w780/abc.jpg".to_string())
        );
        assert_eq!(image_url("https://img", Some("")), None);
        assert_eq!(image_url("https://img", None), None);
    }

    #[test]
    fn test_media_summary_from_candidate() {
        let mut c = candidate(MediaKind::Series, 1399, "Game of Thrones");
        c.release_date = Some("2011-04-17".to_string());
        c.poster_path = Some("/got.jpg".to_string());

        let summary = MediaSummary::from_candidate(&c, "https://img");
        assert_eq!(summary.id, "tv-1399");
        assert_eq!(summary.provider_id, 1399);
        assert_eq!(summary.title, "Game of Thrones");
        assert_eq!(summary.year, Some(2011));
        assert_eq!(summary.kind, MediaKind::Series);
        assert_eq!(summary.poster_url.as_deref(), Some("https://img/got.jpg"));
    }
}
