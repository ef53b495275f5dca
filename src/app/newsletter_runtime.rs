//! Background newsletter submission so the UI keeps animating while the
//! backend calls are in flight.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::newsletter::{self, NewsletterBackend, SubscribeError, SubscribeOutcome};

pub struct NewsletterUpdate {
    pub result: Result<SubscribeOutcome, SubscribeError>,
}

pub fn spawn_subscribe(
    tx: mpsc::UnboundedSender<NewsletterUpdate>,
    backend: Arc<dyn NewsletterBackend>,
    email: String,
) {
    std::thread::spawn(move || {
        let result = newsletter::subscribe(backend.as_ref(), &email);
        let _ = tx.send(NewsletterUpdate { result });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::newsletter::InMemoryBackend;

    #[tokio::test]
    async fn test_result_arrives_on_channel() {
        let backend = Arc::new(InMemoryBackend::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_subscribe(tx, backend.clone(), "hi@studio.example".into());

        let update = rx.recv().await.expect("one update");
        assert!(matches!(update.result, Ok(SubscribeOutcome::Subscribed { .. })));
        assert_eq!(backend.subscriber_count(), 1);
    }
}
