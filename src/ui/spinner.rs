//! Sending indicator: a small spinner + label drawn on one row.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each frame.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frames shown per spinner step, so the spinner stays readable at high fps.
const FRAMES_PER_STEP: u64 = 3;

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[((tick / FRAMES_PER_STEP) as usize) % SPINNER_FRAMES.len()]
}

/// A "sending…" indicator with a spinning icon.
pub struct Spinner<'a> {
    pub label: &'a str,
    /// Monotonically increasing frame counter (drives the spinner frame).
    pub tick: u64,
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let line = Line::from(vec![
            Span::styled(
                spinner_frame(self.tick),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(self.label, Style::default().fg(Color::Yellow)),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_advances_slowly_and_cycles() {
        assert_eq!(spinner_frame(0), "⠋");
        assert_eq!(spinner_frame(2), "⠋");
        assert_eq!(spinner_frame(3), "⠙");
        assert_eq!(spinner_frame(3 * 10), "⠋");
    }
}
