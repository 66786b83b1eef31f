/// TMDB (The Movie Database) v3 API provider
///
/// API Flow:
/// 1. Search: /search/movie and /search/tv → `results` array of items
/// 2. Details: /movie/{id} or /tv/{id}
/// 3. Series structure: /tv/{id}, then /tv/{id}/season/{n} per regular season
/// 4. Trending: /trending/{movie|tv}/day
///
/// Credentials starting with `eyJ` are v4 read access tokens sent as a bearer
/// header; anything else is treated as a v3 API key query parameter.
use crate::{
    error::{AppError, AppResult},
    models::{MediaKind, RawCandidate, SeriesDetails, TmdbItem, TmdbSeason, TmdbSeriesDetails},
    services::providers::MetadataProvider,
};
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("reelscout-api/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    credential: String,
    api_url: String,
    image_url: String,
}

impl TmdbProvider {
    /// Creates a new TMDB provider
    ///
    /// `request_timeout` bounds every HTTP request made by this provider.
    pub fn new(
        credential: String,
        api_url: String,
        image_url: String,
        request_timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            credential,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url,
        })
    }

    fn is_access_token(&self) -> bool {
        self.credential.starts_with("eyJ")
    }

    /// Builds an authenticated GET request for an API path
    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_url, path);
        let request = self
            .http_client
            .get(url)
            .header("accept", "application/json");

        if self.is_access_token() {
            request.bearer_auth(&self.credential)
        } else {
            request.query(&[("api_key", self.credential.as_str())])
        }
    }

    /// Sends a request and returns the JSON body, mapping error statuses
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = request.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            let url = response.url().path().to_string();
            return Err(AppError::NotFound(format!("TMDB resource {}", url)));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize TMDB response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }

    /// Extracts candidates from a `{ "results": [...] }` body
    ///
    /// Individual items that fail to parse or have no title are skipped; a
    /// body without a `results` array is malformed.
    fn parse_results(body: &serde_json::Value, kind: MediaKind) -> AppResult<Vec<RawCandidate>> {
        let results_array = body["results"]
            .as_array()
            .ok_or_else(|| AppError::ExternalApi("Invalid TMDB response format".to_string()))?;

        let candidates: Vec<RawCandidate> = results_array
            .iter()
            .filter_map(|result| {
                let item = serde_json::from_value::<TmdbItem>(result.clone()).ok()?;
                let id = item.id;
                let candidate = item.into_candidate(kind);
                if candidate.is_none() {
                    tracing::debug!(id = id, kind = %kind, "Dropping TMDB item without a title");
                }
                candidate
            })
            .collect();

        Ok(candidates)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search(&self, query: &str, kind: MediaKind) -> AppResult<Vec<RawCandidate>> {
        let request = self
            .get(&format!("/search/{}", kind.as_str()))
            .query(&[("query", query), ("include_adult", "false")]);

        let body: serde_json::Value = self.send_json(request).await?;
        let candidates = Self::parse_results(&body, kind)?;

        tracing::debug!(
            query = %query,
            kind = %kind,
            results = candidates.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(candidates)
    }

    async fn details(&self, kind: MediaKind, id: u64) -> AppResult<RawCandidate> {
        let request = self.get(&format!("/{}/{}", kind.as_str(), id));
        let item: TmdbItem = self.send_json(request).await?;

        item.into_candidate(kind).ok_or_else(|| {
            AppError::ExternalApi(format!("TMDB {} {} has no title", kind, id))
        })
    }

    async fn series_details(&self, id: u64) -> AppResult<SeriesDetails> {
        let request = self.get(&format!("/tv/{}", id));
        let show: TmdbSeriesDetails = self.send_json(request).await?;

        let mut seasons = Vec::new();
        for season_number in show.regular_season_numbers() {
            let request = self.get(&format!("/tv/{}/season/{}", id, season_number));
            let season: TmdbSeason = match self.send_json(request).await {
                Ok(season) => season,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        series_id = id,
                        season = season_number,
                        "Skipping season that failed to load"
                    );
                    continue;
                }
            };

            if season.episodes.is_empty() {
                tracing::debug!(series_id = id, season = season_number, "Skipping empty season");
                continue;
            }

            seasons.push(season.into_season(season_number, &self.image_url));
        }

        let series = show.into_series(seasons);

        tracing::info!(
            series_id = id,
            seasons = series.seasons.len(),
            provider = "tmdb",
            "Series details fetched"
        );

        Ok(series)
    }

    async fn trending(&self, kind: MediaKind) -> AppResult<Vec<RawCandidate>> {
        let request = self.get(&format!("/trending/{}/day", kind.as_str()));
        let body: serde_json::Value = self.send_json(request).await?;
        Self::parse_results(&body, kind)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
