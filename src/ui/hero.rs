//! Hero region: the selected movie with its play/close controls

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::{App, Hero};
use crate::models::MovieDetail;
use crate::ui::Theme;

pub const PLAY_LABEL: &str = " ▶ Play Trailer ";
pub const CLOSE_LABEL: &str = " ✕ Close ";
pub const NO_TRAILER_LABEL: &str = " No trailer ";

/// Button row under the title. Close only appears while the trailer is up;
/// Play is disabled when the movie has no trailer.
pub fn button_spans(app: &App) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if app.is_trailer_shown() {
        spans.push(Span::styled(CLOSE_LABEL, Theme::button_close()));
        spans.push(Span::raw(" "));
    }
    if app.can_play_trailer() {
        spans.push(Span::styled(PLAY_LABEL, Theme::button()));
    } else {
        spans.push(Span::styled(NO_TRAILER_LABEL, Theme::button_disabled()));
    }
    spans
}

fn detail_lines<'a>(app: &App, detail: &'a MovieDetail, image_base: &str) -> Vec<Line<'a>> {
    let mut meta = Vec::new();
    if let Some(year) = detail.year() {
        meta.push(Span::styled(year.to_string(), Theme::year()));
    }
    if let Some(runtime) = detail.runtime.filter(|r| *r > 0) {
        meta.push(Span::styled(
            format!("  {}h {}m", runtime / 60, runtime % 60),
            Theme::dimmed(),
        ));
    }
    meta.push(Span::styled(
        format!("  ★ {:.1}", detail.vote_average),
        Theme::rating(detail.vote_average),
    ));
    if !detail.genres.is_empty() {
        meta.push(Span::styled(format!("  {}", detail.genres.join(" · ")), Theme::dimmed()));
    }

    let mut lines = vec![
        Line::from(button_spans(app)),
        Line::from(""),
        Line::from(Span::styled(detail.title.as_str(), Theme::hero_title())),
        Line::from(meta),
    ];
    if let Some(tagline) = &detail.tagline {
        lines.push(Line::from(Span::styled(
            tagline.as_str(),
            Theme::text().add_modifier(Modifier::ITALIC),
        )));
    }
    if !detail.overview.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(detail.overview.as_str(), Theme::text())));
    }
    if let Some(url) = detail.backdrop_url(image_base) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(url, Theme::dimmed())));
    }
    lines
}

pub fn render_hero(frame: &mut Frame, area: Rect, app: &App, image_base: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if app.is_trailer_shown() {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(" NOW SHOWING ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match app.hero() {
        Some(Hero::Loaded { detail, .. }) => detail_lines(app, detail, image_base),
        Some(Hero::Loading { .. }) => {
            vec![Line::from(Span::styled("⟳ Loading movie...", Theme::loading()))]
        }
        Some(Hero::Failed { error, .. }) => vec![
            Line::from(Span::styled(format!("✗ {}", error), Theme::error())),
            Line::from(""),
            Line::from(vec![
                Span::styled(" r ", Theme::keybind()),
                Span::styled("retry", Theme::dimmed()),
            ]),
        ],
        None => Vec::new(),
    };

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}
