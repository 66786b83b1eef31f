// ============================================================================
// TMDB API Types
// ============================================================================

use serde::Deserialize;

use super::{
    image_url, Episode, MediaKey, MediaKind, RawCandidate, Season, SeriesDetails, TitleFields,
};

/// Search, details and trending result item
///
/// Movies carry `title`/`original_title`/`release_date`; series carry
/// `name`/`original_name`/`first_air_date`. Everything except the id is
/// optional because TMDB omits or nulls fields freely.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbItem {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl TmdbItem {
    /// Validates the item into a candidate of the given kind
    ///
    /// Returns `None` when the item has no usable title.
    pub fn into_candidate(self, kind: MediaKind) -> Option<RawCandidate> {
        let titles = TitleFields::new(
            self.title.or(self.name),
            self.original_title.or(self.original_name),
        )?;

        let release_date = self
            .release_date
            .or(self.first_air_date)
            .filter(|date| !date.trim().is_empty());

        Some(RawCandidate {
            key: MediaKey::new(kind, self.id),
            titles,
            release_date,
            popularity: self.popularity.unwrap_or(0.0).max(0.0),
            vote_count: self.vote_count.unwrap_or(0),
            poster_path: self.poster_path.filter(|path| !path.trim().is_empty()),
        })
    }
}

/// Response from GET /tv/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSeriesDetails {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub seasons: Vec<TmdbSeasonSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSeasonSummary {
    pub season_number: u32,
}

/// Response from GET /tv/{id}/season/{season_number}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSeason {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub episodes: Vec<TmdbEpisode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbEpisode {
    pub episode_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub still_path: Option<String>,
}

impl TmdbSeason {
    pub fn into_season(self, season_number: u32, image_base_url: &str) -> Season {
        let episodes = self
            .episodes
            .into_iter()
            .map(|ep| Episode {
                episode_number: ep.episode_number,
                name: ep
                    .name
                    .unwrap_or_else(|| format!("Episode {}", ep.episode_number)),
                overview: ep.overview.filter(|o| !o.is_empty()),
                still_url: image_url(image_base_url, ep.still_path.as_deref()),
            })
            .collect();

        Season {
            season_number,
            name: self
                .name
                .unwrap_or_else(|| format!("Season {}", season_number)),
            overview: self.overview.filter(|o| !o.is_empty()),
            poster_url: image_url(image_base_url, self.poster_path.as_deref()),
            episodes,
        }
    }
}

impl TmdbSeriesDetails {
    /// Season numbers worth loading; season 0 holds specials
    pub fn regular_season_numbers(&self) -> Vec<u32> {
        self.seasons
            .iter()
            .map(|s| s.season_number)
            .filter(|&n| n > 0)
            .collect()
    }

    pub fn into_series(self, seasons: Vec<Season>) -> SeriesDetails {
        let number_of_episodes = self
            .number_of_episodes
            .unwrap_or_else(|| seasons.iter().map(|s| s.episodes.len() as u32).sum());

        SeriesDetails {
            id: self.id,
            name: self.name.unwrap_or_default(),
            number_of_seasons: self.number_of_seasons.unwrap_or(seasons.len() as u32),
            number_of_episodes,
            seasons,
        }
    }
}
