//! Marquee strip widget.
//!
//! Lays out one repetition of the text (plus a separator) end to end and
//! translates the strip left by the animator's offset.  The widget also
//! performs the measurement: every render reports the unit width back to
//! the mounted marquee, so a text change is picked up on the next draw.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::StatefulWidget,
};
use unicode_width::UnicodeWidthChar;

use crate::app::marquee::MountedMarquee;

/// Placed between repetitions.
pub const SEPARATOR: &str = "  ✦  ";

/// One terminal column of the content unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// Start of a glyph `width` columns wide.  Zero-width marks that follow
    /// it are folded into `text`.
    Glyph { text: String, width: usize },
    /// Covered by the wide glyph to its left.
    Continuation,
}

/// One repetition of `text`, laid out one entry per display column.
pub fn content_unit(text: &str) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();
    for c in text.chars().chain(SEPARATOR.chars()) {
        if c.is_control() {
            continue;
        }
        match c.width().unwrap_or(0) {
            0 => {
                let last_glyph = columns.iter_mut().rev().find_map(|col| match col {
                    Column::Glyph { text, .. } => Some(text),
                    Column::Continuation => None,
                });
                if let Some(text) = last_glyph {
                    text.push(c);
                }
            }
            width => {
                columns.push(Column::Glyph {
                    text: c.to_string(),
                    width,
                });
                columns.extend(std::iter::repeat(Column::Continuation).take(width - 1));
            }
        }
    }
    columns
}

/// Renders a [`MountedMarquee`] as a single row.
pub struct MarqueeWidget {
    style: Style,
    /// Mirror the translation so the strip runs the other way.
    reversed: bool,
}

impl MarqueeWidget {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            reversed: false,
        }
    }

    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }
}

impl StatefulWidget for MarqueeWidget {
    type State = MountedMarquee;

    fn render(self, area: Rect, buf: &mut Buffer, marquee: &mut Self::State) {
        if area.width == 0 || area.height == 0 || marquee.text().is_empty() {
            return;
        }
        let unit = content_unit(marquee.text());
        marquee.measured(unit.len() as f64);

        let offset = marquee.animator().offset();
        let offset = if self.reversed { -offset } else { offset };
        let row = visible_row(&unit, offset, area.width as usize);
        buf.set_stringn(area.x, area.y, row, area.width as usize, self.style);
    }
}

/// The `width` display columns of the repeated strip visible at translation
/// `offset`.
///
/// The strip is periodic in the unit length, so indexing modulo the unit
/// reproduces any window of the repeated layout.  A wide glyph cut by either
/// edge is replaced by spaces, so the row is always exactly `width` columns.
pub fn visible_row(unit: &[Column], offset: f64, width: usize) -> String {
    let mut row = String::new();
    if unit.is_empty() {
        return row;
    }
    let len = unit.len() as i64;
    let start = offset.floor() as i64;
    let mut x = 0;
    while x < width {
        let column = &unit[(start + x as i64).rem_euclid(len) as usize];
        match column {
            Column::Glyph { text, width: w } if x + w <= width => {
                row.push_str(text);
                x += w;
            }
            _ => {
                row.push(' ');
                x += 1;
            }
        }
    }
    row
}
