//! Newsletter sign-up popup.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::state::NewsletterForm;
use crate::core::newsletter::SubmitStatus;

use super::spinner::Spinner;
use super::theme::Theme;

pub struct NewsletterPopup<'a> {
    pub form: &'a NewsletterForm,
    /// Frame counter for the spinner.
    pub tick: u64,
}

impl Widget for NewsletterPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_fixed(54, 9, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Stay in the loop ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(popup);
        block.render(popup, buf);
        if inner.height == 0 {
            return;
        }

        let lines = vec![
            Line::raw(" Monthly notes on brand, web and growth."),
            Line::raw(""),
            Line::from(vec![
                Span::raw(" Email: "),
                Span::styled(format!("{}▏", self.form.email), Theme::input_style()),
            ]),
            Line::raw(""),
        ];
        Paragraph::new(lines).render(inner, buf);

        let status_y = inner.y + 4;
        if status_y < inner.bottom() {
            let status_area = Rect::new(inner.x + 1, status_y, inner.width.saturating_sub(1), 1);
            match &self.form.status {
                SubmitStatus::Idle => {}
                SubmitStatus::Sending => Spinner {
                    label: "sending",
                    tick: self.tick,
                }
                .render(status_area, buf),
                SubmitStatus::Success(msg) => Paragraph::new(Span::styled(msg.as_str(), Theme::success_style()))
                    .wrap(Wrap { trim: true })
                    .render(status_area, buf),
                SubmitStatus::Failed(msg) => Paragraph::new(Span::styled(msg.as_str(), Theme::error_style()))
                    .wrap(Wrap { trim: true })
                    .render(status_area, buf),
            }
        }

        let hint_y = inner.bottom().saturating_sub(1);
        if hint_y > status_y {
            buf.set_stringn(
                inner.x,
                hint_y,
                "  Enter: subscribe  Esc: close",
                inner.width as usize,
                Theme::hint_style(),
            );
        }
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
