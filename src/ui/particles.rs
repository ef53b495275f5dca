//! Floating particle background.
//!
//! Drawn after the page body and only into blank cells, so copy text always
//! stays on top.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::core::particles::{ParticleDescriptor, ParticleShape};

use super::theme::Theme;

/// Effective size at or above which the filled glyph is used.
const LARGE_SIZE: f64 = 3.5;

/// Maps each descriptor to a positioned glyph at the given instant.
pub struct ParticleField<'a> {
    particles: &'a [ParticleDescriptor],
    elapsed_secs: f64,
}

impl<'a> ParticleField<'a> {
    pub fn new(particles: &'a [ParticleDescriptor], elapsed_secs: f64) -> Self {
        Self {
            particles,
            elapsed_secs,
        }
    }
}

/// Glyph for a shape at an effective size.
pub fn glyph(shape: ParticleShape, size: f64) -> &'static str {
    let large = size >= LARGE_SIZE;
    match (shape, large) {
        (ParticleShape::Circle, true) => "●",
        (ParticleShape::Circle, false) => "·",
        (ParticleShape::Square, true) => "■",
        (ParticleShape::Square, false) => "▪",
        (ParticleShape::Triangle, true) => "▲",
        (ParticleShape::Triangle, false) => "▴",
    }
}

/// Cell for a percentage position inside `area`.
fn cell(area: Rect, x_percent: f64, y_percent: f64) -> (u16, u16) {
    let col = (x_percent / 100.0 * f64::from(area.width)).floor() as u16;
    let row = (y_percent / 100.0 * f64::from(area.height)).floor() as u16;
    (
        area.x + col.min(area.width.saturating_sub(1)),
        area.y + row.min(area.height.saturating_sub(1)),
    )
}

impl Widget for ParticleField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for particle in self.particles {
            let frame = particle.sample(self.elapsed_secs);
            let (x, y) = cell(area, frame.x_percent, frame.y_percent);
            if buf[(x, y)].symbol() != " " {
                continue;
            }
            let mut style: Style = Theme::particle_style(particle.shape);
            if frame.opacity < 0.5 {
                style = style.add_modifier(Modifier::DIM);
            }
            buf.set_string(x, y, glyph(particle.shape, particle.size * frame.scale), style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::particles::AnimationVariant;

    fn at(x: f64, y: f64, shape: ParticleShape) -> ParticleDescriptor {
        ParticleDescriptor {
            x_percent: x,
            y_percent: y,
            size: 5.0,
            duration_secs: 10.0,
            delay_secs: 0.0,
            shape,
            variant: AnimationVariant::Variant1,
        }
    }

    #[test]
    fn test_glyph_by_size() {
        assert_eq!(glyph(ParticleShape::Circle, 5.0), "●");
        assert_eq!(glyph(ParticleShape::Circle, 2.0), "·");
        assert_eq!(glyph(ParticleShape::Triangle, 3.5), "▲");
    }

    #[test]
    fn test_particles_land_inside_area() {
        let area = Rect::new(2, 3, 20, 10);
        let particles = [
            at(0.0, 0.0, ParticleShape::Circle),
            at(99.9, 99.9, ParticleShape::Square),
            at(50.0, 50.0, ParticleShape::Triangle),
        ];
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 20));
        ParticleField::new(&particles, 0.0).render(area, &mut buf);

        assert_eq!(buf[(2u16, 3u16)].symbol(), "●");
        assert_eq!(buf[(21u16, 12u16)].symbol(), "■");
        assert_eq!(buf[(12u16, 8u16)].symbol(), "▲");
    }

    #[test]
    fn test_text_cells_are_not_overdrawn() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 0, "x", Style::default());
        let particles = [at(0.0, 0.0, ParticleShape::Square)];
        ParticleField::new(&particles, 0.0).render(area, &mut buf);
        assert_eq!(buf[(0u16, 0u16)].symbol(), "x");
    }

    #[test]
    fn test_empty_field_draws_nothing() {
        let area = Rect::new(0, 0, 5, 5);
        let mut buf = Buffer::empty(area);
        ParticleField::new(&[], 1.0).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
