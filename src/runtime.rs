//! Runtime: terminal session, keyboard subscription and effect execution
//!
//! The controller in [`crate::app`] is pure. This module owns everything
//! with a lifetime: the raw-mode terminal, the keyboard reader thread, the
//! in-flight API tasks and the trailer player process.

use std::io::{stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::TmdbClient;
use crate::app::{ApiEvent, App, Effect};
use crate::player::{TrailerHandle, TrailerPlayer};
use crate::ui::{self, RenderContext};

/// Terminal type alias for convenience
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

const KEY_POLL: Duration = Duration::from_millis(50);
const PLAYER_POLL: Duration = Duration::from_millis(250);

/// Everything the event loop reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Api(ApiEvent),
}

// =============================================================================
// Terminal Session
// =============================================================================

/// Raw mode + alternate screen, restored when dropped
pub struct TerminalSession {
    terminal: Tui,
    _screen: ScreenGuard,
}

/// Runs `restore` when dropped. Taken as soon as raw mode is on, so a
/// failure later in setup still puts the terminal back.
struct ScreenGuard {
    restore: fn(),
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_screen() {
    let _ = execute!(stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Run `build` under a guard that restores the screen if it fails
fn guarded<T>(restore: fn(), build: impl FnOnce() -> Result<T>) -> Result<(T, ScreenGuard)> {
    let guard = ScreenGuard { restore };
    let value = build()?;
    Ok((value, guard))
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let (terminal, screen) = guarded(restore_screen, || {
            execute!(stdout(), EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
        })?;
        Ok(Self {
            terminal,
            _screen: screen,
        })
    }

    pub fn terminal(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Raw mode and the alternate screen go with `_screen`
        let _ = self.terminal.show_cursor();
    }
}

// =============================================================================
// Keyboard Subscription
// =============================================================================

/// Reads terminal input on a dedicated thread and forwards it to the event
/// loop. Dropping the subscription stops and joins the thread.
pub struct KeySubscription {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

/// Blocking source of terminal events: waits up to the given timeout and
/// yields `None` when nothing arrived.
pub trait EventSource: Send + 'static {
    fn next_event(&mut self, timeout: Duration) -> std::io::Result<Option<Event>>;
}

/// The real terminal, through crossterm
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self, timeout: Duration) -> std::io::Result<Option<Event>> {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }
}

impl KeySubscription {
    pub fn subscribe(tx: UnboundedSender<AppEvent>) -> Self {
        Self::with_source(tx, CrosstermEvents)
    }

    pub fn with_source(tx: UnboundedSender<AppEvent>, mut source: impl EventSource) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = std::thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                let event = match source.next_event(KEY_POLL) {
                    Ok(Some(event)) => event,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let forwarded = match event {
                    // Only presses; Windows also reports releases
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        tx.send(AppEvent::Key(key))
                    }
                    Event::Resize(w, h) => tx.send(AppEvent::Resize(w, h)),
                    _ => Ok(()),
                };
                if forwarded.is_err() {
                    break;
                }
            }
            tracing::debug!("keyboard subscription ended");
        });

        tracing::debug!("keyboard subscription started");
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Whether the reader thread is still running
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// =============================================================================
// Effect Execution
// =============================================================================

/// Run a fetch effect against the API. Non-fetch effects yield `None`.
pub async fn fetch(client: &TmdbClient, effect: &Effect) -> Option<ApiEvent> {
    match effect {
        Effect::FetchMovies { seq, query } => {
            let result = client.list_movies(query).await.map_err(|e| e.to_string());
            Some(ApiEvent::Movies { seq: *seq, result })
        }
        Effect::FetchDetail { seq, id } => {
            let result = client.movie_detail(*id).await.map_err(|e| e.to_string());
            Some(ApiEvent::Detail {
                seq: *seq,
                id: *id,
                result,
            })
        }
        Effect::StartTrailer(_) | Effect::StopTrailer => None,
    }
}

/// Executes controller effects
pub struct Runtime {
    client: Arc<TmdbClient>,
    player: TrailerPlayer,
    trailer: Option<TrailerHandle>,
    tx: UnboundedSender<AppEvent>,
}

impl Runtime {
    pub fn new(client: TmdbClient, player: TrailerPlayer, tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            client: Arc::new(client),
            player,
            trailer: None,
            tx,
        }
    }

    /// Execute effects. Fetches run as tasks and report back on the channel;
    /// player effects run inline.
    pub fn execute(&mut self, app: &mut App, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchMovies { .. } | Effect::FetchDetail { .. } => {
                    let client = Arc::clone(&self.client);
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        if let Some(event) = fetch(&client, &effect).await {
                            let _ = tx.send(AppEvent::Api(event));
                        }
                    });
                }
                Effect::StartTrailer(video) => {
                    self.stop_trailer();
                    match self.player.play(&video.key) {
                        Ok(handle) if self.player.player_type().is_detached() => {
                            // Only reap the launcher; the overlay stays until closed
                            tokio::spawn(handle.wait());
                        }
                        Ok(handle) => self.trailer = Some(handle),
                        Err(e) => {
                            tracing::warn!(error = %e, key = %video.key, "trailer failed to start");
                            app.trailer_failed(e.to_string());
                        }
                    }
                }
                Effect::StopTrailer => self.stop_trailer(),
            }
        }
    }

    /// Whether an attached player process is being tracked
    pub fn has_trailer(&self) -> bool {
        self.trailer.is_some()
    }

    fn stop_trailer(&mut self) {
        if let Some(handle) = self.trailer.take() {
            tracing::debug!(key = handle.key(), "stopping trailer");
            tokio::spawn(handle.close());
        }
    }

    /// Hide the overlay if the player window was closed by the user
    pub fn poll_trailer(&mut self, app: &mut App) {
        let exited = self.trailer.as_mut().is_some_and(|h| h.has_exited());
        if exited {
            if let Some(handle) = self.trailer.take() {
                tracing::info!(key = handle.key(), "player closed outside the app");
            }
            app.trailer_ended();
        }
    }

    /// Stop anything still running
    pub async fn shutdown(&mut self) {
        if let Some(handle) = self.trailer.take() {
            handle.close().await;
        }
    }
}

/// Apply one event to the app and execute what it triggers
pub fn dispatch(app: &mut App, runtime: &mut Runtime, event: AppEvent) {
    let effects = match event {
        AppEvent::Key(key) => app.handle_key(key),
        AppEvent::Resize(width, _) => {
            app.set_columns(ui::grid_columns_for(width));
            Vec::new()
        }
        AppEvent::Api(api) => app.apply(api),
    };
    runtime.execute(app, effects);
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Run the interactive TUI until the user quits
pub async fn run_tui(client: TmdbClient, player: TrailerPlayer, ctx: RenderContext) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut session = TerminalSession::enter()?;
    let _keys = KeySubscription::subscribe(tx.clone());

    let mut app = App::new();
    let size = session.terminal().size()?;
    app.set_columns(ui::grid_columns_for(size.width));

    let mut runtime = Runtime::new(client, player, tx);
    let result = event_loop(session.terminal(), &mut app, &mut runtime, &mut rx, &ctx).await;

    runtime.shutdown().await;
    result
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    runtime: &mut Runtime,
    rx: &mut UnboundedReceiver<AppEvent>,
    ctx: &RenderContext,
) -> Result<()> {
    let effects = app.start();
    runtime.execute(app, effects);

    let mut player_tick = tokio::time::interval(PLAYER_POLL);

    while app.running {
        terminal.draw(|frame| ui::render(frame, app, ctx))?;

        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => dispatch(app, runtime, event),
                None => break,
            },
            _ = player_tick.tick() => runtime.poll_trailer(app),
        }
    }

    tracing::info!("event loop finished");
    Ok(())
}
