//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  The
//! frame loop feeds [`AppEvent::Frame`] into the same channel.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The terminal was resized; the next draw picks up the new size.
    Resize,
    /// One animation frame elapsed.
    Frame,
}

/// Spawns a background task that polls the terminal for events and sends them
/// through `tx`.  The task exits once every receiver is gone.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<AppEvent>, poll_rate: Duration) {
    tokio::spawn(async move {
        loop {
            // Poll with a timeout so a dropped receiver is noticed even when
            // the terminal is quiet.
            let has_event = event::poll(poll_rate).unwrap_or(false);
            if !has_event {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            if let Ok(ev) = event::read() {
                let app_event = match ev {
                    CtEvent::Key(k) => AppEvent::Key(k),
                    CtEvent::Mouse(m) => AppEvent::Mouse(m),
                    CtEvent::Resize(..) => AppEvent::Resize,
                    _ => continue,
                };
                if tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
        }
    });
}
