use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::notification::{FcmNotification, Notifiable};

/// Details of a token the provider refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureDetails {
    pub message: Option<String>,
    pub exception: Option<String>,
    pub token: String,
}

/// Published once for every token that failed delivery.
#[derive(Clone)]
pub struct NotificationFailed {
    pub notifiable: Arc<dyn Notifiable>,
    pub notification: Arc<dyn FcmNotification>,
    pub channel: &'static str,
    pub data: FailureDetails,
}

impl fmt::Debug for NotificationFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationFailed")
            .field("channel", &self.channel)
            .field("data", &self.data)
            .finish()
    }
}

/// Event bus the channel publishes failures to. Publishing never reports back.
pub trait EventDispatcher: Send + Sync {
    fn dispatch(&self, event: NotificationFailed);
}

/// Logs each failure and drops it.
#[derive(Debug, Default)]
pub struct LogEventDispatcher;

impl EventDispatcher for LogEventDispatcher {
    fn dispatch(&self, event: NotificationFailed) {
        warn!(
            "Notification via {} failed for token {}: {} ({})",
            event.channel,
            event.data.token,
            event.data.exception.as_deref().unwrap_or("unknown error"),
            event.data.message.as_deref().unwrap_or("no message")
        );
    }
}

/// Forwards failures to an mpsc receiver owned by the application.
pub struct ChannelEventDispatcher {
    sender: UnboundedSender<NotificationFailed>,
}

impl ChannelEventDispatcher {
    pub fn new(sender: UnboundedSender<NotificationFailed>) -> ChannelEventDispatcher {
        ChannelEventDispatcher { sender }
    }
}

impl EventDispatcher for ChannelEventDispatcher {
    fn dispatch(&self, event: NotificationFailed) {
        if let Err(err) = self.sender.send(event) {
            debug!("Dropping failure event, receiver closed: {:?}", err.0);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::messaging::message::FcmMessage;
    use crate::notification::Tokens;
    use serde_json::json;
    use tokio::sync::mpsc;

    struct User;

    impl Notifiable for User {
        fn route_notification_for(&self, _channel: &str, _notification: &dyn FcmNotification) -> Tokens {
            Tokens::from("deviceXY")
        }
    }

    struct Ping;

    impl FcmNotification for Ping {
        fn to_fcm(&self, _notifiable: &dyn Notifiable) -> FcmMessage {
            FcmMessage::new().title("ping")
        }
    }

    fn event(token: &str) -> NotificationFailed {
        NotificationFailed {
            notifiable: Arc::new(User),
            notification: Arc::new(Ping),
            channel: "fcm",
            data: FailureDetails {
                message: None,
                exception: Some("NotRegistered".to_owned()),
                token: token.to_owned(),
            },
        }
    }

    #[test]
    fn test_serialize_details() {
        assert_eq!(
            serde_json::to_value(&event("deviceXY").data).unwrap(),
            json!({
                "message": null,
                "exception": "NotRegistered",
                "token": "deviceXY"
            })
        );
    }

    #[tokio::test]
    async fn test_channel_dispatcher_forwards() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = ChannelEventDispatcher::new(tx);
        dispatcher.dispatch(event("a"));
        dispatcher.dispatch(event("b"));
        assert_eq!(rx.recv().await.unwrap().data.token, "a");
        assert_eq!(rx.recv().await.unwrap().data.token, "b");
    }

    #[test]
    fn test_channel_dispatcher_ignores_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        ChannelEventDispatcher::new(tx).dispatch(event("a"));
    }
}
