//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::particles::ParticleShape;

/// Central theme. Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── hero / marquee ─────────────────────────────────────────
    pub fn hero_style() -> Style {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    }

    pub fn marquee_style(row: usize) -> Style {
        let fg = if row % 2 == 0 { Color::White } else { Color::LightMagenta };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }

    pub fn particle_style(shape: ParticleShape) -> Style {
        let fg = match shape {
            ParticleShape::Circle => Color::Cyan,
            ParticleShape::Square => Color::Magenta,
            ParticleShape::Triangle => Color::Yellow,
        };
        Style::default().fg(fg)
    }

    pub fn body_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    // ── newsletter form ────────────────────────────────────────
    pub fn input_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn success_style() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn error_style() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
