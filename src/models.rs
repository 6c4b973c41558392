//! Data structures shared across TrailerTUI
//!
//! - **Movies**: list summaries and full details from TMDB
//! - **Videos**: trailer/teaser metadata embedded in a detail record
//! - **Trailer policy**: which video of a movie gets played

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default TMDB image base, sized for backdrops
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w1280";

/// Video name preferred by the trailer policy
pub const OFFICIAL_TRAILER: &str = "Official Trailer";

// =============================================================================
// Movie Models (TMDB)
// =============================================================================

/// One movie as returned by the search/discover list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f32,
}

impl MovieSummary {
    /// Release year parsed from the release date
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }
}

impl fmt::Display for MovieSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{}", self.title, year_str)
    }
}

/// Video entry attached to a movie detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.kind)
    }
}

/// Full movie record including its videos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    pub tagline: Option<String>,
    pub overview: String,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub vote_average: f32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub videos: Vec<Video>,
}

impl MovieDetail {
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }

    /// The video the trailer policy picks for this movie, if any
    pub fn trailer(&self) -> Option<&Video> {
        select_trailer(&self.videos)
    }

    /// Backdrop image URL under the given image base
    pub fn backdrop_url(&self, image_base: &str) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .map(|path| image_url(image_base, path))
    }
}

impl fmt::Display for MovieDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if let Some(year) = self.year() {
            write!(f, " ({})", year)?;
        }
        if let Some(runtime) = self.runtime.filter(|r| *r > 0) {
            write!(f, " - {}h {}m", runtime / 60, runtime % 60)?;
        }
        write!(f, " - ⭐ {:.1}", self.vote_average)
    }
}

// =============================================================================
// Trailer Policy
// =============================================================================

/// Pick the trailer to play: the entry named exactly "Official Trailer",
/// otherwise the first entry. `None` for an empty list.
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|v| v.name == OFFICIAL_TRAILER)
        .or_else(|| videos.first())
}

/// Join an image base URL and a TMDB image path
pub fn image_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}
