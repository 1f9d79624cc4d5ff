//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use super::document::Tone;

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── document ───────────────────────────────────────────────
    pub fn tone_style(tone: Tone) -> Style {
        match tone {
            Tone::Title => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            Tone::Accent => Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
            Tone::Heading => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Tone::Subheading => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            Tone::Body => Style::default().fg(Color::White),
            Tone::Muted => Style::default().fg(Color::Gray),
            Tone::Tag => Style::default().fg(Color::LightBlue),
            Tone::Link => Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::UNDERLINED),
            Tone::Field => Style::default().fg(Color::DarkGray),
            Tone::Rule => Style::default().fg(Color::DarkGray),
            Tone::Tab => Style::default().fg(Color::Gray),
            Tone::TabActive => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }

    // ── navigation ─────────────────────────────────────────────
    pub fn nav_name_style() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn nav_label_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    /// Highlight plus underline indicator for the active section.
    pub fn nav_active_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn nav_resume_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightMagenta)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
