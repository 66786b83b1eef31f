/// Metadata provider abstraction
///
/// Search ranking only needs a source of candidate records per query and media
/// kind; the catalog lookups (details, series structure, trending) go through
/// the same provider so identifiers stay in one namespace.
use crate::{
    error::AppResult,
    models::{MediaKind, RawCandidate, SeriesDetails},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie/TV metadata providers
///
/// Implementations validate the provider's payloads at this boundary: every
/// returned [`RawCandidate`] has a title and defaulted numeric signals.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search titles of one kind matching `query`
    ///
    /// Results are returned in provider order and may contain candidates that
    /// barely match; ranking is the caller's job.
    async fn search(&self, query: &str, kind: MediaKind) -> AppResult<Vec<RawCandidate>>;

    /// Fetch a single title by provider ID
    async fn details(&self, kind: MediaKind, id: u64) -> AppResult<RawCandidate>;

    /// Fetch a series with its regular seasons and their episodes
    async fn series_details(&self, id: u64) -> AppResult<SeriesDetails>;

    /// Titles of one kind trending today, in provider order
    async fn trending(&self, kind: MediaKind) -> AppResult<Vec<RawCandidate>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
