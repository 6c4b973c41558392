//! Controller tests
//!
//! Drives `App` with key events and API responses and checks the state
//! machine: initial discover, search, selection, trailer overlay and
//! stale-response handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use trailertui::app::{ApiEvent, App, Catalog, Effect, Hero, InputMode, TrailerState};
use trailertui::models::{MovieDetail, MovieSummary, Video};

// =============================================================================
// Fixtures
// =============================================================================

fn movie(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.into(),
        overview: format!("About {}", title),
        release_date: Some("2020-01-01".into()),
        poster_path: Some(format!("/{}.jpg", id)),
        backdrop_path: None,
        vote_average: 7.0,
    }
}

fn video(key: &str, name: &str) -> Video {
    Video {
        key: key.into(),
        name: name.into(),
        site: "YouTube".into(),
        kind: "Trailer".into(),
    }
}

fn detail(id: u64, videos: Vec<Video>) -> MovieDetail {
    MovieDetail {
        id,
        title: format!("Movie {}", id),
        tagline: None,
        overview: "Overview".into(),
        release_date: Some("2020-01-01".into()),
        runtime: Some(120),
        genres: vec!["Drama".into()],
        vote_average: 7.0,
        poster_path: None,
        backdrop_path: Some("/backdrop.jpg".into()),
        videos,
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn fetch_movies_seq(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::FetchMovies { seq, .. } => Some(*seq),
            _ => None,
        })
        .expect("expected a FetchMovies effect")
}

fn fetch_detail(effects: &[Effect]) -> (u64, u64) {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::FetchDetail { seq, id } => Some((*seq, *id)),
            _ => None,
        })
        .expect("expected a FetchDetail effect")
}

/// App with three movies listed and the first one's detail loaded
fn loaded_app(videos: Vec<Video>) -> App {
    let mut app = App::new();
    let seq = fetch_movies_seq(&app.start());
    let effects = app.apply(ApiEvent::Movies {
        seq,
        result: Ok(vec![movie(1, "One"), movie(2, "Two"), movie(3, "Three")]),
    });
    let (seq, id) = fetch_detail(&effects);
    app.apply(ApiEvent::Detail {
        seq,
        id,
        result: Ok(detail(id, videos)),
    });
    app
}

// =============================================================================
// Initial Load
// =============================================================================

#[test]
fn test_start_discovers() {
    let mut app = App::new();
    let effects = app.start();

    assert_eq!(
        effects,
        vec![Effect::FetchMovies {
            seq: 1,
            query: String::new()
        }]
    );
    assert!(app.catalog.is_loading());
    assert!(app.hero().is_none());
}

#[test]
fn test_first_movie_selected_after_list() {
    let mut app = App::new();
    let seq = fetch_movies_seq(&app.start());

    let effects = app.apply(ApiEvent::Movies {
        seq,
        result: Ok(vec![movie(10, "Ten"), movie(20, "Twenty")]),
    });

    assert_eq!(fetch_detail(&effects).1, 10);
    assert_eq!(app.movies().len(), 2);
    assert_eq!(app.grid().map(|g| g.selected), Some(0));
    assert!(matches!(app.hero(), Some(Hero::Loading { id: 10 })));
}

#[test]
fn test_empty_list_shows_empty_state() {
    let mut app = App::new();
    app.focus_search();
    for c in "zzzz".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    let seq = fetch_movies_seq(&app.handle_key(key(KeyCode::Enter)));

    let effects = app.apply(ApiEvent::Movies { seq, result: Ok(vec![]) });

    assert!(effects.is_empty());
    assert_eq!(
        app.catalog,
        Catalog::Empty {
            query: "zzzz".into()
        }
    );
    assert!(app.selected_detail().is_none());
    assert!(!app.is_trailer_shown());
}

#[test]
fn test_list_failure_then_retry() {
    let mut app = App::new();
    let seq = fetch_movies_seq(&app.start());

    app.apply(ApiEvent::Movies {
        seq,
        result: Err("Server error: 503".into()),
    });
    assert!(matches!(app.catalog, Catalog::Failed { .. }));

    let effects = app.handle_key(key(KeyCode::Char('r')));
    assert_eq!(fetch_movies_seq(&effects), seq + 1);
    assert!(app.catalog.is_loading());
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_issues_trimmed_query() {
    let mut app = loaded_app(vec![]);
    app.handle_key(key(KeyCode::Char('/')));
    assert_eq!(app.input_mode, InputMode::Editing);

    for c in " alien ".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    let effects = app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(effects.contains(&Effect::FetchMovies {
        seq: 2,
        query: "alien".into()
    }));
    assert_eq!(
        app.catalog,
        Catalog::Loading {
            query: "alien".into()
        }
    );
}

#[test]
fn test_empty_search_falls_back_to_discover() {
    let mut app = loaded_app(vec![]);
    app.focus_search();
    let effects = app.handle_key(key(KeyCode::Enter));

    assert!(effects.iter().any(|e| matches!(
        e,
        Effect::FetchMovies { query, .. } if query.is_empty()
    )));
}

#[test]
fn test_escape_leaves_search_without_fetch() {
    let mut app = loaded_app(vec![]);
    app.focus_search();
    app.handle_key(key(KeyCode::Char('a')));

    let effects = app.handle_key(key(KeyCode::Esc));

    assert!(effects.is_empty());
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.search.query, "a");
    assert!(app.selected_detail().is_some());
}

#[test]
fn test_ctrl_k_focuses_search() {
    let mut app = loaded_app(vec![]);

    let effects = app.handle_key(ctrl('k'));

    assert!(effects.is_empty());
    assert_eq!(app.input_mode, InputMode::Editing);
    assert!(app.search.query.is_empty());
}

#[test]
fn test_ctrl_k_while_editing_does_not_insert() {
    let mut app = App::new();
    app.focus_search();
    app.handle_key(key(KeyCode::Char('x')));

    app.handle_key(ctrl('k'));
    app.handle_key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::SUPER));

    assert_eq!(app.search.query, "x");
    assert_eq!(app.input_mode, InputMode::Editing);
}

#[test]
fn test_ctrl_u_clears_search() {
    let mut app = App::new();
    app.focus_search();
    for c in "dune".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }

    app.handle_key(ctrl('u'));

    assert!(app.search.query.is_empty());
    assert_eq!(app.search.cursor, 0);
}

#[test]
fn test_search_hides_trailer() {
    let mut app = loaded_app(vec![video("abc", "Official Trailer")]);
    app.play_trailer();
    assert!(app.is_trailer_shown());

    app.focus_search();
    let effects = app.handle_key(key(KeyCode::Enter));

    assert_eq!(effects.first(), Some(&Effect::StopTrailer));
    assert!(!app.is_trailer_shown());
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_enter_selects_focused_card() {
    let mut app = loaded_app(vec![]);
    app.handle_key(key(KeyCode::Right));
    app.handle_key(key(KeyCode::Right));

    let effects = app.handle_key(key(KeyCode::Enter));

    let (_, id) = fetch_detail(&effects);
    assert_eq!(id, 3);
    assert!(matches!(app.hero(), Some(Hero::Loading { id: 3 })));
}

#[test]
fn test_detail_failure_then_retry() {
    let mut app = loaded_app(vec![]);
    let (seq, id) = fetch_detail(&app.select(1));

    app.apply(ApiEvent::Detail {
        seq,
        id,
        result: Err("Resource not found".into()),
    });
    assert!(matches!(app.hero(), Some(Hero::Failed { id: 2, .. })));
    assert!(!app.can_play_trailer());

    let effects = app.handle_key(key(KeyCode::Char('r')));
    assert_eq!(fetch_detail(&effects), (seq + 1, 2));
}

// =============================================================================
// Stale Responses
// =============================================================================

#[test]
fn test_stale_list_response_ignored() {
    let mut app = App::new();
    let first = fetch_movies_seq(&app.start());

    app.focus_search();
    app.handle_key(key(KeyCode::Char('b')));
    let second = fetch_movies_seq(&app.handle_key(key(KeyCode::Enter)));

    // Second request resolves first
    app.apply(ApiEvent::Movies {
        seq: second,
        result: Ok(vec![movie(2, "B")]),
    });
    let effects = app.apply(ApiEvent::Movies {
        seq: first,
        result: Ok(vec![movie(1, "A"), movie(3, "C")]),
    });

    assert!(effects.is_empty());
    assert_eq!(app.movies(), &[movie(2, "B")]);
}

#[test]
fn test_stale_detail_response_ignored() {
    let mut app = loaded_app(vec![]);
    let (old_seq, old_id) = fetch_detail(&app.select(1));
    let (new_seq, new_id) = fetch_detail(&app.select(2));

    app.apply(ApiEvent::Detail {
        seq: new_seq,
        id: new_id,
        result: Ok(detail(new_id, vec![])),
    });
    app.apply(ApiEvent::Detail {
        seq: old_seq,
        id: old_id,
        result: Ok(detail(old_id, vec![])),
    });

    assert_eq!(app.selected_detail().map(|d| d.id), Some(3));
}

#[test]
fn test_detail_from_previous_list_ignored() {
    let mut app = App::new();
    let seq = fetch_movies_seq(&app.start());
    let effects = app.apply(ApiEvent::Movies {
        seq,
        result: Ok(vec![movie(1, "One")]),
    });
    let (detail_seq, id) = fetch_detail(&effects);

    // New search before the detail lands
    app.focus_search();
    app.handle_key(key(KeyCode::Char('z')));
    let seq = fetch_movies_seq(&app.handle_key(key(KeyCode::Enter)));
    app.apply(ApiEvent::Movies {
        seq,
        result: Ok(vec![movie(9, "Nine")]),
    });

    app.apply(ApiEvent::Detail {
        seq: detail_seq,
        id,
        result: Ok(detail(id, vec![])),
    });

    assert!(matches!(app.hero(), Some(Hero::Loading { id: 9 })));
}

// =============================================================================
// Trailer
// =============================================================================

#[test]
fn test_play_prefers_official_trailer() {
    let mut app = loaded_app(vec![video("first", "Teaser"), video("official", "Official Trailer")]);

    let effects = app.handle_key(key(KeyCode::Char('p')));

    assert_eq!(
        effects,
        vec![Effect::StartTrailer(video("official", "Official Trailer"))]
    );
    assert_eq!(app.playing_trailer().map(|v| v.key.as_str()), Some("official"));
}

#[test]
fn test_play_falls_back_to_first_video() {
    let mut app = loaded_app(vec![video("first", "Teaser"), video("second", "Clip")]);

    app.play_trailer();

    assert_eq!(app.playing_trailer().map(|v| v.key.as_str()), Some("first"));
}

#[test]
fn test_play_without_videos_is_noop() {
    let mut app = loaded_app(vec![]);

    assert!(!app.can_play_trailer());
    assert!(app.handle_key(key(KeyCode::Char('p'))).is_empty());
    assert!(!app.is_trailer_shown());
}

#[test]
fn test_play_twice_starts_once() {
    let mut app = loaded_app(vec![video("abc", "Official Trailer")]);

    assert_eq!(app.play_trailer().len(), 1);
    assert!(app.play_trailer().is_empty());
}

#[test]
fn test_close_trailer_is_idempotent() {
    let mut app = loaded_app(vec![video("abc", "Official Trailer")]);
    app.play_trailer();

    assert_eq!(app.handle_key(key(KeyCode::Char('x'))), vec![Effect::StopTrailer]);
    assert!(app.handle_key(key(KeyCode::Char('x'))).is_empty());
    assert!(app.handle_key(key(KeyCode::Esc)).is_empty());
    assert!(!app.is_trailer_shown());
}

#[test]
fn test_selecting_another_movie_stops_trailer() {
    let mut app = loaded_app(vec![video("abc", "Official Trailer")]);
    app.play_trailer();

    let effects = app.select(1);

    assert_eq!(effects[0], Effect::StopTrailer);
    assert_eq!(fetch_detail(&effects).1, 2);
    assert!(app.playing_trailer().is_none());
}

#[test]
fn test_trailer_ended_hides_overlay() {
    let mut app = loaded_app(vec![video("abc", "Official Trailer")]);
    app.play_trailer();

    app.trailer_ended();

    match app.hero() {
        Some(Hero::Loaded { trailer, .. }) => assert_eq!(*trailer, TrailerState::Hidden),
        other => panic!("unexpected hero: {:?}", other),
    }
}

#[test]
fn test_trailer_failed_reports_error() {
    let mut app = loaded_app(vec![video("abc", "Official Trailer")]);
    app.play_trailer();

    app.trailer_failed("Player 'mpv' not found. Install it first.");

    assert!(!app.is_trailer_shown());
    assert!(app.error.as_deref().unwrap_or_default().contains("mpv"));

    // Next key dismisses the popup
    app.handle_key(key(KeyCode::Right));
    assert!(app.error.is_none());
}

// =============================================================================
// Quit
// =============================================================================

#[test]
fn test_quit_keys() {
    let mut app = App::new();
    app.handle_key(key(KeyCode::Char('q')));
    assert!(!app.running);

    let mut app = App::new();
    app.focus_search();
    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.running);
    app.handle_key(ctrl('c'));
    assert!(!app.running);
}
