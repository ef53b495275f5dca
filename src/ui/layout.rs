//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: hero line, marquee rows, page body, status bar.
pub struct AppLayout {
    pub hero_area: Rect,
    /// One single-row area per marquee.
    pub marquee_areas: Vec<Rect>,
    pub body_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, marquee_rows: usize) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                   // hero line
                Constraint::Length(marquee_rows as u16), // marquee strips
                Constraint::Min(3),                      // page body
                Constraint::Length(1),                   // status bar
            ])
            .split(area);

        let marquee_areas = (0..marquee_rows as u16)
            .map(|i| Rect::new(chunks[1].x, chunks[1].y + i, chunks[1].width, 1))
            .filter(|r| r.y < chunks[1].bottom())
            .collect();

        Self {
            hero_area: chunks[0],
            marquee_areas,
            body_area: chunks[2],
            status_area: chunks[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_stack_vertically() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24), 2);
        assert_eq!(layout.hero_area.y, 0);
        assert_eq!(layout.marquee_areas.len(), 2);
        assert_eq!(layout.marquee_areas[0].y, 1);
        assert_eq!(layout.marquee_areas[1].y, 2);
        assert_eq!(layout.body_area.y, 3);
        assert_eq!(layout.body_area.height, 20);
        assert_eq!(layout.status_area.y, 23);
    }

    #[test]
    fn test_no_marquees() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 40, 10), 0);
        assert!(layout.marquee_areas.is_empty());
        assert_eq!(layout.body_area.y, 1);
    }
}
