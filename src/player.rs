//! Trailer player - mpv/VLC/browser playback
//!
//! Opens a YouTube trailer in an external player. The player process lives
//! as long as its [`TrailerHandle`]; dropping the handle kills it.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::{Child, Command};

/// Supported trailer players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    /// mpv media player (default, plays YouTube through yt-dlp)
    #[default]
    Mpv,
    /// VLC media player
    Vlc,
    /// System browser on the YouTube embed page
    Browser,
}

impl PlayerType {
    /// Get the command name for this player
    pub fn command(&self) -> &'static str {
        match self {
            PlayerType::Mpv => "mpv",
            PlayerType::Vlc => {
                #[cfg(target_os = "macos")]
                if std::path::Path::new("/Applications/VLC.app").exists() {
                    return "/Applications/VLC.app/Contents/MacOS/VLC";
                }
                "vlc"
            }
            PlayerType::Browser => {
                if cfg!(target_os = "macos") {
                    "open"
                } else {
                    "xdg-open"
                }
            }
        }
    }

    /// The launcher hands the URL to another program and exits, so its
    /// process lifetime says nothing about the trailer.
    pub fn is_detached(&self) -> bool {
        matches!(self, PlayerType::Browser)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerType::Mpv => "mpv",
            PlayerType::Vlc => "VLC",
            PlayerType::Browser => "browser",
        }
    }
}

impl std::fmt::Display for PlayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Errors from trailer player operations
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Player '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Failed to start player: {0}")]
    StartFailed(#[from] std::io::Error),
    #[error("Video key is empty")]
    EmptyKey,
}

/// Fixed playback configuration handed to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOptions {
    pub full_width: bool,
    pub autoplay: bool,
    pub controls: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            full_width: true,
            autoplay: true,
            controls: false,
        }
    }
}

/// Watch page for a YouTube video key
pub fn watch_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", urlencoding::encode(key))
}

/// Embed page for a YouTube video key, with the player vars applied
pub fn embed_url(key: &str, options: &PlaybackOptions) -> String {
    format!(
        "https://www.youtube.com/embed/{}?autoplay={}&controls={}",
        urlencoding::encode(key),
        u8::from(options.autoplay),
        u8::from(options.controls)
    )
}

/// Launches trailers in the configured player
#[derive(Debug, Clone, Default)]
pub struct TrailerPlayer {
    player_type: PlayerType,
    options: PlaybackOptions,
    /// Executable to run instead of the player type's default command
    program: Option<String>,
}

impl TrailerPlayer {
    pub fn new(player_type: PlayerType) -> Self {
        Self {
            player_type,
            options: PlaybackOptions::default(),
            program: None,
        }
    }

    /// Run `program` instead of the default command (e.g. a custom mpv build)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Executable that gets launched
    pub fn program(&self) -> &str {
        self.program
            .as_deref()
            .unwrap_or_else(|| self.player_type.command())
    }

    pub fn player_type(&self) -> PlayerType {
        self.player_type
    }

    pub fn options(&self) -> PlaybackOptions {
        self.options
    }

    /// Command-line arguments for playing `key`
    pub fn args(&self, key: &str) -> Vec<String> {
        let opts = &self.options;
        let mut args = Vec::new();

        match self.player_type {
            PlayerType::Mpv => {
                args.push(watch_url(key));
                args.push("--force-window=immediate".into());
                if opts.full_width {
                    args.push("--autofit=100%".into());
                }
                if !opts.autoplay {
                    args.push("--pause".into());
                }
                if !opts.controls {
                    args.push("--osc=no".into());
                }
            }
            PlayerType::Vlc => {
                args.push(watch_url(key));
                args.push("--play-and-exit".into());
                args.push("--no-video-title-show".into());
                if opts.full_width {
                    args.push("--fullscreen".into());
                }
                if !opts.autoplay {
                    args.push("--start-paused".into());
                }
                if !opts.controls {
                    args.push("--qt-minimal-view".into());
                }
            }
            PlayerType::Browser => {
                args.push(embed_url(key, opts));
            }
        }

        args
    }

    /// Check if the player is available on the system
    pub async fn is_available(&self) -> bool {
        let cmd = self.program();

        if cmd.starts_with('/') {
            return std::path::Path::new(cmd).exists();
        }

        Command::new("which")
            .arg(cmd)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Start playing the trailer with the given video key
    pub fn play(&self, key: &str) -> Result<TrailerHandle, PlayerError> {
        if key.trim().is_empty() {
            return Err(PlayerError::EmptyKey);
        }

        let mut cmd = Command::new(self.program());
        cmd.args(self.args(key))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlayerError::NotFound(self.program().to_string())
            } else {
                PlayerError::StartFailed(e)
            }
        })?;

        tracing::info!(player = %self.player_type, program = self.program(), key, "trailer started");

        Ok(TrailerHandle {
            key: key.to_string(),
            child,
        })
    }
}

/// Running trailer player process
#[derive(Debug)]
pub struct TrailerHandle {
    key: String,
    child: Child,
}

impl TrailerHandle {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the player process has exited on its own
    pub fn has_exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }

    /// Wait for the player to exit on its own
    pub async fn wait(mut self) -> std::io::Result<std::process::ExitStatus> {
        let status = self.child.wait().await?;
        tracing::info!(key = %self.key, %status, "player exited");
        Ok(status)
    }

    /// Stop the player and wait for it to go away
    pub async fn close(mut self) {
        let _ = self.child.kill().await;
        tracing::info!(key = %self.key, "trailer stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_type_command() {
        let vlc_cmd = PlayerType::Vlc.command();
        assert!(vlc_cmd == "vlc" || vlc_cmd == "/Applications/VLC.app/Contents/MacOS/VLC");
        assert_eq!(PlayerType::Mpv.command(), "mpv");
    }

    #[test]
    fn test_player_type_display() {
        assert_eq!(PlayerType::Vlc.to_string(), "VLC");
        assert_eq!(PlayerType::Mpv.to_string(), "mpv");
        assert_eq!(PlayerType::Browser.to_string(), "browser");
    }

    #[test]
    fn test_default_player() {
        assert_eq!(PlayerType::default(), PlayerType::Mpv);
    }

    #[test]
    fn test_only_browser_is_detached() {
        assert!(PlayerType::Browser.is_detached());
        assert!(!PlayerType::Mpv.is_detached());
        assert!(!PlayerType::Vlc.is_detached());
    }

    #[test]
    fn test_program_override() {
        let player = TrailerPlayer::new(PlayerType::Mpv);
        assert_eq!(player.program(), "mpv");

        let player = player.with_program("/opt/mpv/bin/mpv");
        assert_eq!(player.program(), "/opt/mpv/bin/mpv");
        assert_eq!(player.player_type(), PlayerType::Mpv);
    }

    #[test]
    fn test_default_options() {
        let opts = PlaybackOptions::default();
        assert!(opts.full_width);
        assert!(opts.autoplay);
        assert!(!opts.controls);
    }

    #[test]
    fn test_empty_key_rejected() {
        let player = TrailerPlayer::new(PlayerType::Mpv);
        assert!(matches!(player.play(" "), Err(PlayerError::EmptyKey)));
    }
}
