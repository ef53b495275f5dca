//! Newsletter sign-up flow.
//!
//! The hosted backend is opaque: we only need three calls on it (look up an
//! address, insert it, trigger the confirmation mail).  [`subscribe`] runs
//! them in order and folds the result into a single outcome for the form.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors surfaced to the sign-up form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubscribeError {
    #[error("please enter a valid email address")]
    InvalidEmail,
    #[error("could not reach the newsletter service: {0}")]
    Backend(String),
    #[error("subscribed, but the confirmation email failed: {0}")]
    Confirmation(String),
}

/// Successful terminal states of a sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed { email: String },
    AlreadySubscribed { email: String },
}

impl SubscribeOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Subscribed { email } => format!("Thanks! Check {email} to confirm."),
            Self::AlreadySubscribed { email } => format!("{email} is already subscribed."),
        }
    }
}

/// Submission feedback shown by the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Success(String),
    Failed(String),
}

impl SubmitStatus {
    pub fn from_result(result: &Result<SubscribeOutcome, SubscribeError>) -> Self {
        match result {
            Ok(outcome) => Self::Success(outcome.message()),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending)
    }
}

/// A stored subscriber row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

/// The three remote calls the sign-up flow needs.
///
/// Implementations report failures as plain messages; the flow decides how
/// to classify them.
pub trait NewsletterBackend: Send + Sync {
    fn find_subscriber(&self, email: &str) -> Result<Option<Subscriber>, String>;
    fn insert_subscriber(&self, email: &str) -> Result<Subscriber, String>;
    fn send_confirmation(&self, email: &str) -> Result<(), String>;
}

/// Normalise and sanity-check an address.  Only catches what a browser's
/// `type="email"` field would.
pub fn normalize_email(raw: &str) -> Result<String, SubscribeError> {
    let email = raw.trim().to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(SubscribeError::InvalidEmail);
    };
    let valid = !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);
    if valid {
        Ok(email)
    } else {
        Err(SubscribeError::InvalidEmail)
    }
}

/// Check for an existing row, insert, then trigger the confirmation mail.
pub fn subscribe<B: NewsletterBackend + ?Sized>(
    backend: &B,
    raw_email: &str,
) -> Result<SubscribeOutcome, SubscribeError> {
    let email = normalize_email(raw_email)?;

    if backend
        .find_subscriber(&email)
        .map_err(SubscribeError::Backend)?
        .is_some()
    {
        tracing::info!("newsletter: {email} already subscribed");
        return Ok(SubscribeOutcome::AlreadySubscribed { email });
    }

    backend
        .insert_subscriber(&email)
        .map_err(SubscribeError::Backend)?;
    backend.send_confirmation(&email).map_err(|e| {
        tracing::warn!("newsletter: confirmation for {email} failed: {e}");
        SubscribeError::Confirmation(e)
    })?;

    tracing::info!("newsletter: subscribed {email}");
    Ok(SubscribeOutcome::Subscribed { email })
}

// ───────────────────────────────────────── in-memory backend ─

/// Process-local stand-in for the hosted service.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    rows: Mutex<HashMap<String, Subscriber>>,
    confirmations: Mutex<Vec<String>>,
    /// When set, every call fails with this message.
    offline: Option<String>,
    fail_confirmations: bool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn offline(message: impl Into<String>) -> Self {
        Self {
            offline: Some(message.into()),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn with_failing_confirmations(mut self) -> Self {
        self.fail_confirmations = true;
        self
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.rows.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Addresses a confirmation mail was sent to, in order.
    #[cfg(test)]
    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    fn check_online(&self) -> Result<(), String> {
        match &self.offline {
            Some(msg) => Err(msg.clone()),
            None => Ok(()),
        }
    }
}

impl NewsletterBackend for InMemoryBackend {
    fn find_subscriber(&self, email: &str) -> Result<Option<Subscriber>, String> {
        self.check_online()?;
        let rows = self.rows.lock().map_err(|e| e.to_string())?;
        Ok(rows.get(email).cloned())
    }

    fn insert_subscriber(&self, email: &str) -> Result<Subscriber, String> {
        self.check_online()?;
        let mut rows = self.rows.lock().map_err(|e| e.to_string())?;
        if rows.contains_key(email) {
            return Err(format!("duplicate key: {email}"));
        }
        let row = Subscriber {
            email: email.to_string(),
            subscribed_at: Utc::now(),
        };
        rows.insert(email.to_string(), row.clone());
        Ok(row)
    }

    fn send_confirmation(&self, email: &str) -> Result<(), String> {
        self.check_online()?;
        if self.fail_confirmations {
            return Err("mail function returned 500".into());
        }
        self.confirmations
            .lock()
            .map_err(|e| e.to_string())?
            .push(email.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Hello@Studio.Example ").as_deref(),
            Ok("hello@studio.example")
        );
        for bad in ["", "nobody", "@studio.com", "a@b", "a@b@c.com", "a@.com", "a@com.", "a b@c.com"] {
            assert_eq!(normalize_email(bad), Err(SubscribeError::InvalidEmail), "{bad:?}");
        }
    }

    #[test]
    fn test_subscribe_inserts_and_confirms() {
        let backend = InMemoryBackend::new();
        let outcome = subscribe(&backend, "Ada@Agency.io").unwrap();
        assert_eq!(
            outcome,
            SubscribeOutcome::Subscribed {
                email: "ada@agency.io".into()
            }
        );
        assert_eq!(backend.subscriber_count(), 1);
        assert_eq!(backend.confirmations(), vec!["ada@agency.io".to_string()]);
    }

    #[test]
    fn test_duplicate_is_not_reinserted() {
        let backend = InMemoryBackend::new();
        subscribe(&backend, "ada@agency.io").unwrap();
        let again = subscribe(&backend, "ADA@agency.io ").unwrap();
        assert!(matches!(again, SubscribeOutcome::AlreadySubscribed { .. }));
        assert_eq!(backend.subscriber_count(), 1);
        assert_eq!(backend.confirmations().len(), 1);
    }

    #[test]
    fn test_invalid_email_never_reaches_backend() {
        let backend = InMemoryBackend::offline("should not be called");
        assert_eq!(
            subscribe(&backend, "not-an-email"),
            Err(SubscribeError::InvalidEmail)
        );
    }

    #[test]
    fn test_offline_backend_reports_message() {
        let backend = InMemoryBackend::offline("connection refused");
        let err = subscribe(&backend, "ada@agency.io").unwrap_err();
        assert_eq!(err, SubscribeError::Backend("connection refused".into()));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_confirmation_failure_keeps_row() {
        let backend = InMemoryBackend::new().with_failing_confirmations();
        let err = subscribe(&backend, "ada@agency.io").unwrap_err();
        assert!(matches!(err, SubscribeError::Confirmation(_)));
        assert_eq!(backend.subscriber_count(), 1);
    }

    #[test]
    fn test_submit_status_from_result() {
        let ok = Ok(SubscribeOutcome::Subscribed {
            email: "ada@agency.io".into(),
        });
        assert!(matches!(SubmitStatus::from_result(&ok), SubmitStatus::Success(m) if m.contains("ada@agency.io")));
        let err = Err(SubscribeError::InvalidEmail);
        assert_eq!(
            SubmitStatus::from_result(&err),
            SubmitStatus::Failed("please enter a valid email address".into())
        );
        assert!(SubmitStatus::Sending.is_sending());
        assert!(!SubmitStatus::default().is_sending());
    }
}
