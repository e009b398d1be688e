//! Outbound notifications for calendar activity.
//!
//! Delivery is fire-and-forget: the caller spawns a send and moves on,
//! so a slow or dead notification endpoint never delays an API
//! response. Failures are logged with the event id and otherwise
//! swallowed.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};
use cadence_core::config::NotificationConfig;
use cadence_core::event::Event;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Payload posted to the notification endpoint for a new event.
#[derive(Debug, Clone, Serialize)]
pub struct EventMail {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: String,
}

impl EventMail {
    #[must_use]
    pub fn for_event(event: &Event, from: &str, to: &str) -> Self {
        Self {
            subject: format!("New Event: {}", event.title),
            body: format!(
                "Event scheduled for {}. Duration: {} minutes",
                event.start_at, event.duration_minutes
            ),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("notification endpoint rejected the message: {0}")]
    Rejected(reqwest::StatusCode),
}

/// Delivery backend for [`EventMail`] messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, mail: &EventMail) -> Result<(), NotifyError>;
}

/// Posts each message as JSON to a configured HTTP endpoint.
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpNotifier {
    /// ## Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(endpoint: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send(&self, mail: &EventMail) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(mail)
            .send()
            .await?
            .error_for_status()
            .map_err(|error| match error.status() {
                Some(status) => NotifyError::Rejected(status),
                None => NotifyError::Request(error),
            })?;
        tracing::debug!(status = %response.status(), to = %mail.to, "Notification delivered");
        Ok(())
    }
}

/// Logs each message instead of delivering it. Used when no endpoint is
/// configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, mail: &EventMail) -> Result<(), NotifyError> {
        tracing::info!(to = %mail.to, subject = %mail.subject, "Notification (log only)");
        Ok(())
    }
}

/// Composes and dispatches notifications for calendar activity.
#[derive(Clone)]
pub struct NotificationSender {
    notifier: Arc<dyn Notifier>,
    from_address: String,
}

impl NotificationSender {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>, from_address: String) -> Self {
        Self {
            notifier,
            from_address,
        }
    }

    /// ## Summary
    /// Builds a sender from configuration: an HTTP notifier when an
    /// endpoint is set, a log-only notifier otherwise.
    ///
    /// ## Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_settings(settings: &NotificationConfig) -> ServiceResult<Self> {
        let notifier: Arc<dyn Notifier> = match &settings.endpoint {
            Some(endpoint) => Arc::new(
                HttpNotifier::new(endpoint.clone())
                    .map_err(|e| ServiceError::InvalidConfiguration(e.to_string()))?,
            ),
            None => Arc::new(LogNotifier),
        };
        Ok(Self::new(notifier, settings.from_address.clone()))
    }

    /// Dispatches a creation notice for `event` to `recipient` on a
    /// background task. Delivery failures are logged, never surfaced.
    pub fn spawn_event_created(&self, event: &Event, recipient: &str) {
        let mail = EventMail::for_event(event, &self.from_address, recipient);
        let event_id = event.id;
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(error) = notifier.send(&mail).await {
                tracing::warn!(event_id = %event_id, %error, "Failed to send event notification");
            }
        });
    }
}
