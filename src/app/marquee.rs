//! A mounted marquee row: animator state plus its scroll subscription.
//!
//! Mounting subscribes to the page's [`ScrollSource`]; dropping the value
//! unmounts it and releases the subscription with it.

use crate::config::AnimationSettings;
use crate::core::animator::ScrollVelocityAnimator;

use super::scheduler::{ScrollSource, ScrollSubscription};

#[derive(Debug)]
pub struct MountedMarquee {
    text: String,
    animator: ScrollVelocityAnimator,
    subscription: ScrollSubscription,
}

impl MountedMarquee {
    pub fn mount(text: impl Into<String>, source: &mut ScrollSource, settings: &AnimationSettings) -> Self {
        let text = text.into();
        let mut animator =
            ScrollVelocityAnimator::new(settings.base_velocity, settings.repeat_count);
        // Start from the current page position so the first notification
        // is compared against where the page actually is.
        animator.on_scroll_notification(source.position());
        tracing::debug!("marquee mounted: {text:?}");
        Self {
            text,
            animator,
            subscription: source.subscribe(),
        }
    }

    /// Apply pending scroll notifications, then advance one frame.
    /// Returns the new offset.
    pub fn frame(&mut self) -> f64 {
        for position in self.subscription.drain() {
            self.animator.on_scroll_notification(position);
        }
        self.animator.tick()
    }

    /// Record the rendered width of one copy of the text.
    pub fn measured(&mut self, unit_width: f64) {
        self.animator.on_content_measured(unit_width);
    }

    /// Swap the displayed text.  The renderer re-measures on the next draw.
    #[cfg(test)]
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn animator(&self) -> &ScrollVelocityAnimator {
        &self.animator
    }
}

impl Drop for MountedMarquee {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
        tracing::debug!("marquee unmounted: {:?}", self.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animator::ScrollDirection;

    fn settings(velocity: f64) -> AnimationSettings {
        AnimationSettings {
            base_velocity: velocity,
            repeat_count: 20,
            ..AnimationSettings::default()
        }
    }

    #[test]
    fn test_mount_and_unmount_track_subscribers() {
        let mut source = ScrollSource::new();
        let a = MountedMarquee::mount("Design", &mut source, &settings(1.0));
        let b = MountedMarquee::mount("Build", &mut source, &settings(1.0));
        assert_eq!(source.subscriber_count(), 2);

        drop(a);
        assert_eq!(source.subscriber_count(), 1);
        drop(b);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_frame_applies_every_notification_in_order() {
        let mut source = ScrollSource::new();
        let mut marquee = MountedMarquee::mount("Launch", &mut source, &settings(3.0));

        // Down then Up before the next frame: the last pair wins.
        source.publish(50.0);
        source.publish(10.0);
        assert_eq!(marquee.frame(), -3.0);
        assert_eq!(marquee.animator().direction(), ScrollDirection::Up);
    }

    #[test]
    fn test_mount_starts_from_current_position() {
        let mut source = ScrollSource::new();
        source.publish(80.0);
        let mut marquee = MountedMarquee::mount("Grow", &mut source, &settings(1.0));
        source.publish(60.0);
        marquee.frame();
        assert_eq!(marquee.animator().direction(), ScrollDirection::Up);
    }

    #[test]
    fn test_independent_instances() {
        let mut source = ScrollSource::new();
        let mut fast = MountedMarquee::mount("a", &mut source, &settings(2.0));
        let mut slow = MountedMarquee::mount("b", &mut source, &settings(1.0));
        fast.measured(10.0);

        source.publish(-5.0);
        assert_eq!(fast.frame(), 198.0);
        assert_eq!(slow.frame(), -1.0);
    }

    #[test]
    fn test_end_to_end_through_source() {
        let mut source = ScrollSource::new();
        let mut marquee = MountedMarquee::mount("Studio", &mut source, &settings(3.0));
        marquee.measured(100.0);

        source.publish(50.0);
        assert_eq!(marquee.frame(), 3.0);
        source.publish(10.0);
        assert_eq!(marquee.frame(), 0.0);
        assert_eq!(marquee.frame(), 1997.0);
    }
}
