//! Cinema marquee theme for TrailerTUI
//!
//! Dark screening-room background, amber marquee lights, velvet red accents.

use ratatui::style::{Color, Modifier, Style};

/// Color palette and style helpers
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #101014 (screening room)
    pub const BACKGROUND: Color = Color::Rgb(0x10, 0x10, 0x14);

    /// Primary: #ffc857 (marquee amber)
    pub const PRIMARY: Color = Color::Rgb(0xff, 0xc8, 0x57);

    /// Secondary: #e84855 (velvet red)
    pub const SECONDARY: Color = Color::Rgb(0xe8, 0x48, 0x55);

    /// Text: #ececec
    pub const TEXT: Color = Color::Rgb(0xec, 0xec, 0xec);

    /// Dim: #6c6c78
    pub const DIM: Color = Color::Rgb(0x6c, 0x6c, 0x78);

    /// Success: #5fd38d
    pub const SUCCESS: Color = Color::Rgb(0x5f, 0xd3, 0x8d);

    /// Warning: #f4a259
    pub const WARNING: Color = Color::Rgb(0xf4, 0xa2, 0x59);

    /// Error: #ff5a5f
    pub const ERROR: Color = Color::Rgb(0xff, 0x5a, 0x5f);

    /// Panels and the search field
    pub const PANEL: Color = Color::Rgb(0x1c, 0x1c, 0x24);

    /// Card borders
    pub const BORDER: Color = Color::Rgb(0x3a, 0x3a, 0x48);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Big hero title
    pub fn hero_title() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::PANEL)
    }

    /// Enabled button (Play Trailer)
    pub fn button() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Close button
    pub fn button_close() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Greyed-out button when no trailer exists
    pub fn button_disabled() -> Style {
        Style::default().fg(Self::DIM).bg(Self::PANEL)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::PANEL)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn year() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Rating color by score
    pub fn rating(vote: f32) -> Style {
        if vote >= 7.0 {
            Self::success()
        } else if vote >= 5.0 {
            Self::warning()
        } else {
            Self::dimmed()
        }
    }
}
