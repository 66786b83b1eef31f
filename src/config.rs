use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB credential: a v4 read access token or a v3 API key
    pub tmdb_api_token: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL that poster and still paths are appended to
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on query variants sent to the provider per search
    #[serde(default = "default_search_max_variants")]
    pub search_max_variants: usize,

    /// Per-retrieval timeout in milliseconds
    #[serde(default = "default_search_fetch_timeout_ms")]
    pub search_fetch_timeout_ms: u64,

    /// Similarities below this are treated as no match
    #[serde(default = "default_search_similarity_floor")]
    pub search_similarity_floor: f64,

    #[serde(default = "default_rank_similarity_weight")]
    pub rank_similarity_weight: f64,

    #[serde(default = "default_rank_popularity_weight")]
    pub rank_popularity_weight: f64,

    #[serde(default = "default_rank_vote_count_weight")]
    pub rank_vote_count_weight: f64,

    #[serde(default = "default_rank_exact_match_bonus")]
    pub rank_exact_match_bonus: f64,

    #[serde(default = "default_rank_popularity_cap")]
    pub rank_popularity_cap: f64,

    #[serde(default = "default_rank_vote_count_cap")]
    pub rank_vote_count_cap: f64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w780".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_search_max_variants() -> usize {
    DEFAULT_MAX_VARIANTS
}

fn default_search_fetch_timeout_ms() -> u64 {
    DEFAULT_FETCH_TIMEOUT_MS
}

fn default_search_similarity_floor() -> f64 {
    DEFAULT_SIMILARITY_FLOOR
}

fn default_rank_similarity_weight() -> f64 {
    RankWeights::default().similarity
}

fn default_rank_popularity_weight() -> f64 {
    RankWeights::default().popularity
}

fn default_rank_vote_count_weight() -> f64 {
    RankWeights::default().vote_count
}

fn default_rank_exact_match_bonus() -> f64 {
    RankWeights::default().exact_match_bonus
}

fn default_rank_popularity_cap() -> f64 {
    RankWeights::default().popularity_cap
}

fn default_rank_vote_count_cap() -> f64 {
    RankWeights::default().vote_count_cap
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Per-retrieval timeout, also used as the HTTP client's request timeout
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.search_fetch_timeout_ms)
    }

    /// Builds the explicit configuration handed to the search pipeline
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_variants: self.search_max_variants.max(1),
            fetch_timeout: self.fetch_timeout(),
            poster_base_url: self.tmdb_image_url.clone(),
            similarity_floor: self.search_similarity_floor,
            weights: RankWeights {
                similarity: self.rank_similarity_weight,
                popularity: self.rank_popularity_weight,
                vote_count: self.rank_vote_count_weight,
                exact_match_bonus: self.rank_exact_match_bonus,
                popularity_cap: self.rank_popularity_cap,
                vote_count_cap: self.rank_vote_count_cap,
            },
        }
    }
}

const DEFAULT_MAX_VARIANTS: usize = 5;
const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_SIMILARITY_FLOOR: f64 = 0.6;

/// Settings consumed by the search pipeline
///
/// Passed explicitly into every search so concurrent requests never share
/// mutable ranking state.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_variants: usize,
    pub fetch_timeout: Duration,
    pub poster_base_url: String,
    pub similarity_floor: f64,
    pub weights: RankWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_variants: DEFAULT_MAX_VARIANTS,
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            poster_base_url: default_tmdb_image_url(),
            similarity_floor: DEFAULT_SIMILARITY_FLOOR,
            weights: RankWeights::default(),
        }
    }
}

/// Blend weights and normalization caps for the final ranking score
///
/// ```text
/// score = similarity * similarity_weight
///       + min(popularity / popularity_cap, 1) * popularity_weight
///       + min(vote_count / vote_count_cap, 1) * vote_count_weight
///       + exact_match_bonus (if the display title equals the query or a variant)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankWeights {
    pub similarity: f64,
    pub popularity: f64,
    pub vote_count: f64,
    pub exact_match_bonus: f64,
    pub popularity_cap: f64,
    pub vote_count_cap: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            similarity: 0.5,
            popularity: 0.3,
            vote_count: 0.2,
            exact_match_bonus: 0.2,
            popularity_cap: 100.0,
            vote_count_cap: 1000.0,
        }
    }
}
