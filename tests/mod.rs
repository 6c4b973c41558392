//! Integration tests for TrailerTUI
//!
//! Tests are organized by component:
//! - tmdb_test: TMDB API client tests (mockito)
//! - app_test: Controller state machine
//! - ui_test: Screen rendering with TestBackend
//! - cli_test: Argument parsing and JSON envelope
//! - player_test: Player argument building
//! - e2e_test: Runtime executing effects against a mock TMDB and stand-in players

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
