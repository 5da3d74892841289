use std::sync::Arc;

use crate::error::{ChannelError, MessagingError, Result};
use crate::events::{EventDispatcher, FailureDetails, NotificationFailed};
use crate::messaging::client::MessagingClient;
use crate::messaging::manager::MessagingManager;
use crate::messaging::report::{MulticastSendReport, SendReport};
use crate::notification::{FcmNotification, Notifiable};

/// Name recipients are asked to route tokens for.
pub const CHANNEL_NAME: &str = "fcm";

/// The maximum number of tokens sent in a single request.
pub const TOKENS_PER_REQUEST: usize = 500;

/// Delivers notifications through FCM and publishes a `NotificationFailed`
/// event for every token the provider rejects.
pub struct FcmChannel {
    manager: Arc<MessagingManager>,
    events: Arc<dyn EventDispatcher>,
}

impl FcmChannel {
    pub fn new(manager: Arc<MessagingManager>, events: Arc<dyn EventDispatcher>) -> FcmChannel {
        FcmChannel { manager, events }
    }

    /// Sends `notification` to every token `notifiable` routes for this channel.
    ///
    /// Tokens go out in batches of [`TOKENS_PER_REQUEST`], one request after
    /// another. Rejected tokens are reported as events, not errors. A batch
    /// whose request fails outright does not stop the remaining batches; the
    /// first such failure is returned once all batches were attempted.
    pub async fn send(
        &self,
        notifiable: Arc<dyn Notifiable>,
        notification: Arc<dyn FcmNotification>,
    ) -> Result<()> {
        let tokens = notifiable.route_notification_for(CHANNEL_NAME, notification.as_ref());
        if tokens.is_empty() {
            return Ok(());
        }

        let message = notification.to_fcm(notifiable.as_ref());
        let project = notification.fcm_project(notifiable.as_ref(), &message);
        let messaging = self.resolve_provider(project.as_deref());

        let tokens = tokens.into_vec();
        let total_batches = (tokens.len() + TOKENS_PER_REQUEST - 1) / TOKENS_PER_REQUEST;
        let mut transport_errors: Vec<MessagingError> = Vec::new();
        let mut failed_tokens = 0;

        for (index, batch) in tokens.chunks(TOKENS_PER_REQUEST).enumerate() {
            debug!(
                "Sending FCM batch {}/{} with {} token(s)",
                index + 1,
                total_batches,
                batch.len()
            );
            match messaging.send_multicast(&message, batch).await {
                Ok(report) => {
                    failed_tokens += report.failure_count();
                    self.handle_report(&notifiable, &notification, &report);
                }
                Err(err) => {
                    warn!("FCM batch {}/{} failed: {}", index + 1, total_batches, err);
                    transport_errors.push(err);
                }
            }
        }

        info!(
            "Sent FCM notification to {} token(s) in {} batch(es), {} rejected",
            tokens.len(),
            total_batches,
            failed_tokens
        );

        let failed_batches = transport_errors.len();
        match transport_errors.into_iter().next() {
            Some(source) => Err(ChannelError::Transport {
                failed_batches,
                total_batches,
                source,
            }),
            None => Ok(()),
        }
    }

    /// Client for the selected project, or the default client when none was
    /// selected or the selection cannot be resolved.
    fn resolve_provider(&self, project: Option<&str>) -> Arc<dyn MessagingClient> {
        match project {
            Some(name) => match self.manager.project(name) {
                Ok(client) => client,
                Err(err) => {
                    warn!("{}, falling back to the default project", err);
                    self.manager.messaging()
                }
            },
            None => self.manager.messaging(),
        }
    }

    fn handle_report(
        &self,
        notifiable: &Arc<dyn Notifiable>,
        notification: &Arc<dyn FcmNotification>,
        report: &MulticastSendReport,
    ) {
        for item in report.failures() {
            self.failed_notification(notifiable, notification, item);
        }
    }

    fn failed_notification(
        &self,
        notifiable: &Arc<dyn Notifiable>,
        notification: &Arc<dyn FcmNotification>,
        report: &SendReport,
    ) {
        self.events.dispatch(NotificationFailed {
            notifiable: notifiable.clone(),
            notification: notification.clone(),
            channel: CHANNEL_NAME,
            data: FailureDetails {
                message: report.message().map(str::to_owned),
                exception: report.error().map(str::to_owned),
                token: report.target().to_owned(),
            },
        });
    }
}
