//! API clients for external services
//!
//! - TMDB: movie listing, details and trailer metadata

pub mod tmdb;

pub use tmdb::{TmdbClient, TmdbError};
