//! Frame scheduling and scroll notifications.
//!
//! Both are explicit handles rather than self-rescheduling closures: the
//! owner holds a [`FrameHandle`] / [`ScrollSubscription`] and releasing it
//! is what stops the callbacks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::event::AppEvent;

// ───────────────────────────────────────── frame loop ────────

/// Starts the per-frame callback loop.
pub struct FrameLoop;

impl FrameLoop {
    /// Send one [`AppEvent::Frame`] to `tx` every `period` until the
    /// returned handle is stopped or dropped, or the receiver goes away.
    pub fn start(period: Duration, tx: mpsc::UnboundedSender<AppEvent>) -> FrameHandle {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let period = period.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if !flag.load(Ordering::Acquire) {
                    break;
                }
                if tx.send(AppEvent::Frame).is_err() {
                    break;
                }
            }
            flag.store(false, Ordering::Release);
        });

        tracing::debug!("frame loop started ({period:?} per frame)");
        FrameHandle {
            task: Some(task),
            running,
        }
    }
}

/// Owner's handle on a running frame loop.  Dropping it stops the loop.
pub struct FrameHandle {
    task: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl FrameHandle {
    /// Stop scheduling frames.  Idempotent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("frame loop stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some() && self.running.load(Ordering::Acquire)
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

// ───────────────────────────────────────── scroll source ─────

/// Publishes the viewport's vertical scroll position to any number of
/// independent subscribers.
///
/// Each subscriber gets its own queue, so every notification is delivered
/// in order even when several arrive between two frames.
#[derive(Debug, Default)]
pub struct ScrollSource {
    position: f64,
    subscribers: Vec<mpsc::UnboundedSender<f64>>,
}

impl ScrollSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Notify every live subscriber of a new position.  Subscribers that
    /// have been dropped are pruned here.
    pub fn publish(&mut self, position: f64) {
        self.position = position;
        self.subscribers.retain(|tx| tx.send(position).is_ok());
    }

    /// Register a new subscriber.  Released subscribers are pruned first.
    pub fn subscribe(&mut self) -> ScrollSubscription {
        self.subscribers.retain(|tx| !tx.is_closed());
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        ScrollSubscription { rx }
    }

    /// Number of subscribers that have not been released yet.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|tx| !tx.is_closed()).count()
    }
}

/// A live subscription.  Calling [`unsubscribe`] (or dropping it) detaches
/// it from the source.
///
/// [`unsubscribe`]: ScrollSubscription::unsubscribe
#[derive(Debug)]
pub struct ScrollSubscription {
    rx: mpsc::UnboundedReceiver<f64>,
}

impl ScrollSubscription {
    /// Take every notification delivered since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<f64> {
        let mut positions = Vec::new();
        while let Ok(p) = self.rx.try_recv() {
            positions.push(p);
        }
        positions
    }

    /// Stop receiving notifications.  Anything already queued can still be
    /// drained.  Idempotent.
    pub fn unsubscribe(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_frame_loop_sends_frames() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = FrameLoop::start(Duration::from_millis(5), tx);
        assert!(handle.is_running());

        for _ in 0..3 {
            let ev = tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("frame within timeout");
            assert!(matches!(ev, Some(AppEvent::Frame)));
        }
    }

    #[tokio::test]
    async fn test_stopped_loop_never_sends_again() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut handle = FrameLoop::start(Duration::from_millis(5), tx);
        let _ = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;

        handle.stop();
        assert!(!handle.is_running());
        handle.stop();

        // The aborted task drops its sender, so the channel closes once
        // anything already queued is drained.
        let rest = tokio::time::timeout(Duration::from_secs(2), async {
            let mut n = 0;
            while rx.recv().await.is_some() {
                n += 1;
            }
            n
        })
        .await
        .expect("channel closes after stop");
        assert!(rest <= 2, "{rest} frames after stop");
    }

    #[tokio::test]
    async fn test_dropping_handle_cancels_loop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        drop(FrameLoop::start(Duration::from_millis(5), tx));
        let closed = tokio::time::timeout(Duration::from_secs(2), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }

    #[tokio::test]
    async fn test_loop_ends_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = FrameLoop::start(Duration::from_millis(2), tx);
        drop(rx);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_running());
    }

    #[test]
    fn test_scroll_source_fans_out_in_order() {
        let mut source = ScrollSource::new();
        let mut a = source.subscribe();
        let mut b = source.subscribe();
        source.publish(10.0);
        source.publish(4.0);

        assert_eq!(a.drain(), vec![10.0, 4.0]);
        assert_eq!(b.drain(), vec![10.0, 4.0]);
        assert!(a.drain().is_empty());
        assert_eq!(source.position(), 4.0);
    }

    #[test]
    fn test_unsubscribe_releases_subscriber() {
        let mut source = ScrollSource::new();
        let mut a = source.subscribe();
        let mut b = source.subscribe();
        assert_eq!(source.subscriber_count(), 2);

        a.unsubscribe();
        a.unsubscribe();
        assert_eq!(source.subscriber_count(), 1);
        source.publish(0.5);
        assert!(a.drain().is_empty());
        source.publish(1.0);
        assert_eq!(b.drain(), vec![0.5, 1.0]);

        drop(b);
        assert_eq!(source.subscriber_count(), 0);
        source.publish(2.0);
        assert!(source.subscribers.is_empty());
    }

    #[test]
    fn test_late_subscriber_sees_only_new_positions() {
        let mut source = ScrollSource::new();
        source.publish(5.0);
        let mut sub = source.subscribe();
        assert!(sub.drain().is_empty());
        source.publish(6.0);
        assert_eq!(sub.drain(), vec![6.0]);
    }

    #[test]
    fn test_resubscribing_prunes_released_senders() {
        let mut source = ScrollSource::new();
        for _ in 0..50 {
            drop(source.subscribe());
        }
        let _live = source.subscribe();
        assert_eq!(source.subscribers.len(), 1);
        assert_eq!(source.subscriber_count(), 1);
    }
}
