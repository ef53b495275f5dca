//! Scrollable page body drawn over the particle field.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Widget},
};

use super::theme::Theme;

/// Default marquee rows, one strip each.
pub const DEFAULT_MARQUEE_TEXTS: &[&str] = &[
    "BRAND STRATEGY · WEB DESIGN · GROWTH MARKETING",
    "WE BUILD BRANDS THAT MOVE",
];

/// Body copy, one entry per line.
pub const PAGE_COPY: &[&str] = &[
    "",
    "  Services",
    "",
    "    Brand identity      logo systems, tone of voice, guidelines",
    "    Web design          landing pages, product sites, design systems",
    "    Growth marketing    paid social, SEO, lifecycle email",
    "",
    "  How we work",
    "",
    "    1. Discovery call and audit",
    "    2. Strategy sprint",
    "    3. Design and build",
    "    4. Launch, measure, iterate",
    "",
    "  FAQ",
    "",
    "    How long does a project take?",
    "      Most engagements run six to ten weeks.",
    "",
    "    Do you work with early-stage startups?",
    "      Yes. We have fixed-scope packages for seed-stage teams.",
    "",
    "    Can you take over an existing site?",
    "      We audit it first, then decide whether to iterate or rebuild.",
    "",
    "  Contact",
    "",
    "    hello@studio.example",
    "    Press n to join the newsletter.",
    "",
];

pub struct PageBody {
    /// First visible line.
    pub scroll: u16,
}

impl Widget for PageBody {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = PAGE_COPY
            .iter()
            .map(|l| Line::styled(*l, Theme::body_style()))
            .collect();
        Paragraph::new(lines)
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
