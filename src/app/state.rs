//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use crate::config::AppConfig;
use crate::core::animator::{MeasureState, ScrollDirection};
use crate::core::newsletter::SubmitStatus;
use crate::core::particles::{self, ParticleDescriptor};

use super::marquee::MountedMarquee;
use super::scheduler::ScrollSource;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    Newsletter,
}

/// The sign-up form's controlled input and feedback.
#[derive(Debug, Default)]
pub struct NewsletterForm {
    pub email: String,
    pub status: SubmitStatus,
}

/// Top-level application state.
pub struct AppState {
    /// Publishes the page scroll position to mounted marquees.
    pub scroll: ScrollSource,
    /// Number of scrollable lines in the page body, for clamping.
    pub page_len: usize,
    /// One entry per marquee row; the text survives unmount so the rows can
    /// be mounted again.
    pub marquee_texts: Vec<String>,
    /// Currently mounted marquee rows.  Empty while unmounted.
    pub marquees: Vec<MountedMarquee>,
    /// Background layout, generated once at startup.
    pub particles: Vec<ParticleDescriptor>,
    /// Reference point for particle motion.
    pub mounted_at: Instant,
    /// Frames rendered so far (drives the sending spinner).
    pub frame_count: u64,
    pub config: AppConfig,
    pub active_view: ActiveView,
    pub newsletter: NewsletterForm,
    /// Set by the input handler; the main loop takes it and spawns the
    /// background submission.
    pub pending_submission: Option<String>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig, marquee_texts: Vec<String>, page_len: usize) -> Self {
        let particles = particles::generate(config.animation.particle_count);
        let mut state = Self {
            scroll: ScrollSource::new(),
            page_len,
            marquee_texts,
            marquees: Vec::new(),
            particles,
            mounted_at: Instant::now(),
            frame_count: 0,
            config,
            active_view: ActiveView::default(),
            newsletter: NewsletterForm::default(),
            pending_submission: None,
            should_quit: false,
            status_message: None,
        };
        state.mount_marquees();
        state
    }

    pub fn scroll_position(&self) -> f64 {
        self.scroll.position()
    }

    /// Move the page by `delta` lines, clamped to the page body.
    pub fn scroll_by(&mut self, delta: f64) {
        let max = self.page_len.saturating_sub(1) as f64;
        let next = (self.scroll.position() + delta).clamp(0.0, max);
        self.scroll.publish(next);
    }

    pub fn mount_marquees(&mut self) {
        if !self.marquees.is_empty() {
            return;
        }
        let settings = self.config.animation.clone();
        self.marquees = self
            .marquee_texts
            .iter()
            .map(|text| MountedMarquee::mount(text.clone(), &mut self.scroll, &settings))
            .collect();
    }

    pub fn unmount_marquees(&mut self) {
        self.marquees.clear();
    }

    pub fn marquees_mounted(&self) -> bool {
        !self.marquees.is_empty()
    }

    /// Advance every mounted animation by one frame.
    pub fn on_frame(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);
        for marquee in &mut self.marquees {
            marquee.frame();
        }
    }

    /// One-line marquee diagnostics for the status bar.
    pub fn marquee_summary(&self) -> String {
        let Some(first) = self.marquees.first() else {
            return "marquees off".into();
        };
        let arrow = match first.animator().direction() {
            ScrollDirection::Down => "→",
            ScrollDirection::Up => "←",
        };
        let animator = first.animator();
        let measured = match animator.measure_state() {
            MeasureState::Measured => format!("unit {}", animator.state().content_unit_width),
            MeasureState::Unmeasured => "unmeasured".into(),
        };
        format!(
            "{arrow} {}/frame {measured} ({} subscribed)",
            animator.base_velocity(),
            self.scroll.subscriber_count()
        )
    }

    /// Seconds since the background mounted.
    pub fn elapsed_secs(&self) -> f64 {
        self.mounted_at.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(
            AppConfig::default(),
            vec!["Brand".into(), "Web".into()],
            50,
        )
    }

    #[test]
    fn test_new_mounts_rows_and_particles() {
        let s = state();
        assert_eq!(s.marquees.len(), 2);
        assert_eq!(s.scroll.subscriber_count(), 2);
        assert_eq!(s.particles.len(), 30);
    }

    #[test]
    fn test_toggle_mount_releases_subscriptions() {
        let mut s = state();
        s.unmount_marquees();
        assert!(!s.marquees_mounted());
        assert_eq!(s.scroll.subscriber_count(), 0);

        s.mount_marquees();
        s.mount_marquees();
        assert_eq!(s.marquees.len(), 2);
        assert_eq!(s.scroll.subscriber_count(), 2);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut s = state();
        s.scroll_by(-10.0);
        assert_eq!(s.scroll_position(), 0.0);
        s.scroll_by(500.0);
        assert_eq!(s.scroll_position(), 49.0);
    }

    #[test]
    fn test_frame_advances_marquees() {
        let mut s = state();
        s.on_frame();
        s.on_frame();
        assert_eq!(s.frame_count, 2);
        for m in &s.marquees {
            assert_eq!(m.animator().offset(), 1.0);
        }
    }

    #[test]
    fn test_marquee_summary() {
        let mut s = state();
        assert_eq!(s.marquee_summary(), "→ 0.5/frame unmeasured (2 subscribed)");
        s.scroll_by(5.0);
        s.scroll_by(-1.0);
        s.marquees[0].measured(10.0);
        s.on_frame();
        assert_eq!(s.marquee_summary(), "← 0.5/frame unit 10 (2 subscribed)");
        s.unmount_marquees();
        assert_eq!(s.marquee_summary(), "marquees off");
    }

    #[test]
    fn test_particles_stable_across_frames() {
        let mut s = state();
        let before = s.particles.clone();
        for _ in 0..10 {
            s.on_frame();
        }
        s.unmount_marquees();
        s.mount_marquees();
        assert_eq!(s.particles, before);
    }
}
