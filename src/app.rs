//! App state and core application logic
//!
//! The controller owns every piece of UI state. It never performs IO:
//! user input and API responses go in, [`Effect`]s come out and are
//! executed by the runtime.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::{MovieDetail, MovieSummary, Video};

// =============================================================================
// Effects and Responses
// =============================================================================

/// Side effects requested by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// List movies; an empty query means discover
    FetchMovies { seq: u64, query: String },
    /// Fetch one movie with its videos
    FetchDetail { seq: u64, id: u64 },
    /// Launch the player for this video
    StartTrailer(Video),
    /// Kill the running player, if any
    StopTrailer,
}

/// API responses fed back into the controller
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    Movies {
        seq: u64,
        result: Result<Vec<MovieSummary>, String>,
    },
    Detail {
        seq: u64,
        id: u64,
        result: Result<MovieDetail, String>,
    },
}

/// Monotonic request counter for one fetch family. Only the response to
/// the latest issued request is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    /// Issue a new sequence number, invalidating all earlier ones
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Grid / hero navigation
    #[default]
    Normal,
    /// Search field focused
    Editing,
}

// =============================================================================
// Search Input
// =============================================================================

/// Search field contents. `cursor` counts chars, not bytes.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    pub query: String,
    pub cursor: usize,
}

impl SearchInput {
    fn byte_index(&self, cursor: usize) -> usize {
        self.query
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.query.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.query.remove(idx);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index(self.cursor);
            self.query.remove(idx);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Query split at the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_index(self.cursor))
    }
}

// =============================================================================
// Grid Selection
// =============================================================================

/// Focus position in the results grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridState {
    pub selected: usize,
    pub len: usize,
    pub columns: usize,
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl GridState {
    pub fn new(len: usize, columns: usize) -> Self {
        Self {
            selected: 0,
            len,
            columns: columns.max(1),
        }
    }

    pub fn left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.selected + 1 < self.len {
            self.selected += 1;
        }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(self.columns);
    }

    pub fn down(&mut self) {
        if self.selected + self.columns < self.len {
            self.selected += self.columns;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }

    pub fn row(&self) -> usize {
        self.selected / self.columns
    }

    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }
}

// =============================================================================
// Catalog / Hero / Trailer State
// =============================================================================

/// Whether the trailer overlay is up. Only exists inside a loaded hero, so
/// a shown trailer always has a movie and a video.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TrailerState {
    #[default]
    Hidden,
    Shown(Video),
}

/// The selected movie shown in the hero region
#[derive(Debug, Clone, PartialEq)]
pub enum Hero {
    Loading {
        id: u64,
    },
    Loaded {
        detail: Box<MovieDetail>,
        trailer: TrailerState,
    },
    Failed {
        id: u64,
        error: String,
    },
}

impl Hero {
    pub fn detail(&self) -> Option<&MovieDetail> {
        match self {
            Hero::Loaded { detail, .. } => Some(&**detail),
            _ => None,
        }
    }

    pub fn is_trailer_shown(&self) -> bool {
        matches!(
            self,
            Hero::Loaded {
                trailer: TrailerState::Shown(_),
                ..
            }
        )
    }
}

/// Result set state
#[derive(Debug, Clone, PartialEq)]
pub enum Catalog {
    Loading {
        query: String,
    },
    Ready {
        query: String,
        movies: Vec<MovieSummary>,
        grid: GridState,
        hero: Hero,
    },
    Empty {
        query: String,
    },
    Failed {
        query: String,
        error: String,
    },
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::Loading {
            query: String::new(),
        }
    }
}

impl Catalog {
    /// Query that produced (or is producing) this result set
    pub fn query(&self) -> &str {
        match self {
            Catalog::Loading { query }
            | Catalog::Ready { query, .. }
            | Catalog::Empty { query }
            | Catalog::Failed { query, .. } => query,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Catalog::Loading { .. })
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    pub catalog: Catalog,
    pub search: SearchInput,
    pub input_mode: InputMode,
    /// Whether the app is running
    pub running: bool,
    /// Transient error shown as a popup, cleared on the next key
    pub error: Option<String>,
    list_seq: RequestSeq,
    detail_seq: RequestSeq,
    columns: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            search: SearchInput::default(),
            input_mode: InputMode::Normal,
            running: true,
            error: None,
            list_seq: RequestSeq::default(),
            detail_seq: RequestSeq::default(),
            columns: 4,
        }
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    // -------------------------------------------------------------------------
    // Read accessors
    // -------------------------------------------------------------------------

    pub fn movies(&self) -> &[MovieSummary] {
        match &self.catalog {
            Catalog::Ready { movies, .. } => movies,
            _ => &[],
        }
    }

    pub fn grid(&self) -> Option<&GridState> {
        match &self.catalog {
            Catalog::Ready { grid, .. } => Some(grid),
            _ => None,
        }
    }

    pub fn hero(&self) -> Option<&Hero> {
        match &self.catalog {
            Catalog::Ready { hero, .. } => Some(hero),
            _ => None,
        }
    }

    pub fn selected_detail(&self) -> Option<&MovieDetail> {
        self.hero().and_then(Hero::detail)
    }

    /// Video currently playing in the overlay
    pub fn playing_trailer(&self) -> Option<&Video> {
        match self.hero() {
            Some(Hero::Loaded {
                trailer: TrailerState::Shown(video),
                ..
            }) => Some(video),
            _ => None,
        }
    }

    pub fn is_trailer_shown(&self) -> bool {
        self.playing_trailer().is_some()
    }

    /// Play is enabled only when the loaded movie has a trailer
    pub fn can_play_trailer(&self) -> bool {
        self.selected_detail().and_then(|d| d.trailer()).is_some()
    }

    pub fn list_seq(&self) -> u64 {
        self.list_seq.latest()
    }

    pub fn detail_seq(&self) -> u64 {
        self.detail_seq.latest()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Update grid width (in cards) after a resize
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
        if let Catalog::Ready { grid, .. } = &mut self.catalog {
            grid.set_columns(self.columns);
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Initial load: discover movies
    pub fn start(&mut self) -> Vec<Effect> {
        self.fetch_movies(String::new())
    }

    /// Submit the current search key
    pub fn submit_search(&mut self) -> Vec<Effect> {
        let query = self.search.query.trim().to_string();
        self.fetch_movies(query)
    }

    fn fetch_movies(&mut self, query: String) -> Vec<Effect> {
        let mut effects = self.stop_trailer_effect();
        let seq = self.list_seq.next();
        // A detail fetch for the previous result set is no longer wanted.
        self.detail_seq.next();

        tracing::info!(seq, query = %query, "fetching movies");
        self.catalog = Catalog::Loading {
            query: query.clone(),
        };
        effects.push(Effect::FetchMovies { seq, query });
        effects
    }

    /// Select the movie at `index` in the grid
    pub fn select(&mut self, index: usize) -> Vec<Effect> {
        let mut effects = self.stop_trailer_effect();

        let Catalog::Ready {
            movies, grid, hero, ..
        } = &mut self.catalog
        else {
            return effects;
        };
        let Some(movie) = movies.get(index) else {
            return effects;
        };

        let id = movie.id;
        let seq = self.detail_seq.next();
        grid.selected = index;
        *hero = Hero::Loading { id };

        tracing::info!(seq, id, "fetching movie detail");
        effects.push(Effect::FetchDetail { seq, id });
        effects
    }

    /// Select the focused card
    pub fn select_focused(&mut self) -> Vec<Effect> {
        match self.grid() {
            Some(grid) => self.select(grid.selected),
            None => Vec::new(),
        }
    }

    /// Show the trailer overlay if the selected movie has a trailer
    pub fn play_trailer(&mut self) -> Vec<Effect> {
        let Catalog::Ready {
            hero: Hero::Loaded { detail, trailer },
            ..
        } = &mut self.catalog
        else {
            return Vec::new();
        };

        if matches!(trailer, TrailerState::Shown(_)) {
            return Vec::new();
        }

        match detail.trailer() {
            Some(video) => {
                let video = video.clone();
                *trailer = TrailerState::Shown(video.clone());
                vec![Effect::StartTrailer(video)]
            }
            None => Vec::new(),
        }
    }

    /// Hide the trailer overlay. No-op when already hidden.
    pub fn close_trailer(&mut self) -> Vec<Effect> {
        self.stop_trailer_effect()
    }

    /// The player went away on its own (finished or crashed)
    pub fn trailer_ended(&mut self) {
        self.hide_trailer();
    }

    /// The player could not be launched
    pub fn trailer_failed(&mut self, error: impl Into<String>) {
        self.hide_trailer();
        self.set_error(error);
    }

    fn hide_trailer(&mut self) -> bool {
        if let Catalog::Ready {
            hero: Hero::Loaded { trailer, .. },
            ..
        } = &mut self.catalog
        {
            if matches!(trailer, TrailerState::Shown(_)) {
                *trailer = TrailerState::Hidden;
                return true;
            }
        }
        false
    }

    fn stop_trailer_effect(&mut self) -> Vec<Effect> {
        if self.hide_trailer() {
            vec![Effect::StopTrailer]
        } else {
            Vec::new()
        }
    }

    /// Re-issue whatever failed: the list, or the selected movie's detail
    pub fn retry(&mut self) -> Vec<Effect> {
        match &self.catalog {
            Catalog::Failed { query, .. } => {
                let query = query.clone();
                self.fetch_movies(query)
            }
            Catalog::Ready {
                hero: Hero::Failed { id, .. },
                movies,
                ..
            } => {
                let id = *id;
                match movies.iter().position(|m| m.id == id) {
                    Some(index) => self.select(index),
                    None => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    /// Apply an API response. Stale responses are dropped.
    pub fn apply(&mut self, event: ApiEvent) -> Vec<Effect> {
        match event {
            ApiEvent::Movies { seq, result } => self.apply_movies(seq, result),
            ApiEvent::Detail { seq, id, result } => {
                self.apply_detail(seq, id, result);
                Vec::new()
            }
        }
    }

    fn apply_movies(&mut self, seq: u64, result: Result<Vec<MovieSummary>, String>) -> Vec<Effect> {
        if !self.list_seq.is_current(seq) {
            tracing::debug!(seq, latest = self.list_seq.latest(), "discarding stale movie list");
            return Vec::new();
        }

        let query = self.catalog.query().to_string();
        match result {
            Ok(movies) if movies.is_empty() => {
                tracing::info!(query = %query, "no movies found");
                self.catalog = Catalog::Empty { query };
                Vec::new()
            }
            Ok(movies) => {
                tracing::info!(count = movies.len(), query = %query, "movies loaded");
                let first_id = movies[0].id;
                self.catalog = Catalog::Ready {
                    query,
                    grid: GridState::new(movies.len(), self.columns),
                    movies,
                    hero: Hero::Loading { id: first_id },
                };
                self.select(0)
            }
            Err(error) => {
                tracing::warn!(error = %error, query = %query, "movie list failed");
                self.catalog = Catalog::Failed { query, error };
                Vec::new()
            }
        }
    }

    fn apply_detail(&mut self, seq: u64, id: u64, result: Result<MovieDetail, String>) {
        if !self.detail_seq.is_current(seq) {
            tracing::debug!(seq, id, latest = self.detail_seq.latest(), "discarding stale detail");
            return;
        }

        let Catalog::Ready { hero, .. } = &mut self.catalog else {
            return;
        };

        *hero = match result {
            Ok(detail) => {
                tracing::info!(id, videos = detail.videos.len(), "movie detail loaded");
                Hero::Loaded {
                    detail: Box::new(detail),
                    trailer: TrailerState::Hidden,
                }
            }
            Err(error) => {
                tracing::warn!(id, error = %error, "movie detail failed");
                Hero::Failed { id, error }
            }
        };
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Focus the search field
    pub fn focus_search(&mut self) {
        self.input_mode = InputMode::Editing;
        self.search.cursor_end();
    }

    /// Handle a key press, returning the effects it triggered
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return Vec::new();
        }

        if is_focus_shortcut(&key) {
            self.focus_search();
            return Vec::new();
        }

        match self.input_mode {
            InputMode::Editing => self.handle_editing_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                return self.submit_search();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.clear();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.search.insert(c);
            }
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Left => self.search.cursor_left(),
            KeyCode::Right => self.search.cursor_right(),
            KeyCode::Home => self.search.cursor_home(),
            KeyCode::End => self.search.cursor_end(),
            _ => {}
        }
        Vec::new()
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                Vec::new()
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.focus_search();
                Vec::new()
            }
            KeyCode::Char('p') => self.play_trailer(),
            KeyCode::Char('x') | KeyCode::Esc => self.close_trailer(),
            KeyCode::Char('r') => self.retry(),
            KeyCode::Enter => self.select_focused(),
            code => {
                if let Catalog::Ready { grid, .. } = &mut self.catalog {
                    match code {
                        KeyCode::Left | KeyCode::Char('h') => grid.left(),
                        KeyCode::Right | KeyCode::Char('l') => grid.right(),
                        KeyCode::Up | KeyCode::Char('k') => grid.up(),
                        KeyCode::Down | KeyCode::Char('j') => grid.down(),
                        KeyCode::Home | KeyCode::Char('g') => grid.first(),
                        KeyCode::End | KeyCode::Char('G') => grid.last(),
                        _ => {}
                    }
                }
                Vec::new()
            }
        }
    }
}

/// Ctrl+K / Cmd+K: jump to the search field
pub fn is_focus_shortcut(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('k') | KeyCode::Char('K'))
        && key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META)
}

// =============================================================================
// Unit Tests
// =============================================================================
