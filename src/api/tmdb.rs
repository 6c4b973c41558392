//! TMDB (The Movie Database) API client
//!
//! Lists movies (search or discover) and fetches a movie with its videos.
//! API docs: https://developer.themoviedb.org/docs

use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{MovieDetail, MovieSummary, Video};

/// Default TMDB v3 endpoint
pub const API_BASE_URL: &str = "https://api.themoviedb.org/3";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("No TMDB API key configured (set TMDB_API_KEY)")]
    MissingApiKey,

    #[error("Invalid API key (401)")]
    Unauthorized,

    #[error("Resource not found (404)")]
    NotFound,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TMDB API client
#[derive(Debug, Clone)]
pub struct TmdbClient {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let api_key: String = api_key.into();
        Self::build(Some(api_key), base_url.into(), DEFAULT_TIMEOUT)
    }

    /// Create a client from resolved settings. A missing key yields a client
    /// whose every call fails with [`TmdbError::MissingApiKey`].
    pub fn from_settings(api_key: Option<String>, base_url: &str, timeout: Duration) -> Self {
        Self::build(api_key, base_url.to_string(), timeout)
    }

    fn build(api_key: Option<String>, base_url: String, timeout: Duration) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Make an authenticated GET request. No retries.
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T> {
        let api_key = self.api_key.as_deref().ok_or(TmdbError::MissingApiKey)?;
        let url = format!("{}{}", self.base_url, endpoint);

        tracing::debug!(endpoint, "tmdb request");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", api_key)])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(TmdbError::from)?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await.map_err(TmdbError::from)?;
                let parsed: T = serde_json::from_str(&body).map_err(|e| {
                    TmdbError::InvalidResponse(format!("JSON parse error: {}", e))
                })?;
                Ok(parsed)
            }
            StatusCode::UNAUTHORIZED => Err(TmdbError::Unauthorized.into()),
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound.into()),
            status => Err(TmdbError::ServerError(status.as_u16()).into()),
        }
    }

    /// List movies: search when `query` has text, discover otherwise
    pub async fn list_movies(&self, query: &str) -> Result<Vec<MovieSummary>> {
        let query = query.trim();
        let endpoint = if query.is_empty() {
            "/discover/movie".to_string()
        } else {
            format!("/search/movie?query={}", urlencoding::encode(query))
        };

        let response: ListResponse = self.get(&endpoint).await?;
        Ok(response.into_summaries())
    }

    /// Get a movie's details with its videos embedded
    pub async fn movie_detail(&self, id: u64) -> Result<MovieDetail> {
        let endpoint = format!("/movie/{}?append_to_response=videos", id);
        let response: MovieResponse = self.get(&endpoint).await?;
        Ok(response.into_detail())
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<MovieRaw>,
}

impl ListResponse {
    fn into_summaries(self) -> Vec<MovieSummary> {
        self.results.into_iter().map(MovieRaw::into_summary).collect()
    }
}

#[derive(Debug, Deserialize)]
struct MovieRaw {
    id: u64,
    title: Option<String>,
    original_title: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
}

impl MovieRaw {
    fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.or(self.original_title).unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            release_date: self.release_date.filter(|d| !d.is_empty()),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            vote_average: self.vote_average.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieResponse {
    id: u64,
    title: String,
    tagline: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<GenreRaw>,
    vote_average: Option<f32>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    videos: Option<VideosRaw>,
}

impl MovieResponse {
    fn into_detail(self) -> MovieDetail {
        MovieDetail {
            id: self.id,
            title: self.title,
            tagline: self.tagline.filter(|t| !t.is_empty()),
            overview: self.overview.unwrap_or_default(),
            release_date: self.release_date.filter(|d| !d.is_empty()),
            runtime: self.runtime,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            vote_average: self.vote_average.unwrap_or(0.0),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            videos: self.videos.map(|v| v.results).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenreRaw {
    name: String,
}

#[derive(Debug, Deserialize)]
struct VideosRaw {
    #[serde(default)]
    results: Vec<Video>,
}
