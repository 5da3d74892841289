use async_trait::async_trait;
use fcm::{ErrorReason, FcmResponse, MessageResult};

use super::client::MessagingClient;
use super::message::{FcmMessage, Priority};
use super::report::{MulticastSendReport, SendReport};
use crate::error::MessagingError;

/// `MessagingClient` backed by the FCM HTTP API.
pub struct FirebaseCloudMessaging {
    api_key: String,
    client: fcm::Client,
}

#[async_trait]
impl MessagingClient for FirebaseCloudMessaging {
    async fn send_multicast(
        &self,
        message: &FcmMessage,
        tokens: &[String],
    ) -> Result<MulticastSendReport, MessagingError> {
        let mut message_builder = fcm::MessageBuilder::new_multi(&self.api_key, tokens);

        if let Some(notification) = &message.notification {
            let mut notification_builder = fcm::NotificationBuilder::new();
            if let Some(title) = &notification.title {
                notification_builder.title(title);
            }
            if let Some(body) = &notification.body {
                notification_builder.body(body);
            }
            if let Some(icon) = &notification.icon {
                notification_builder.icon(icon);
            }
            if let Some(sound) = &notification.sound {
                notification_builder.sound(sound);
            }
            if let Some(action) = &notification.click_action {
                notification_builder.click_action(action);
            }
            message_builder.notification(notification_builder.finalize());
        }
        if !message.data.is_empty() {
            message_builder.data(&message.data)?;
        }
        if let Some(key) = &message.collapse_key {
            message_builder.collapse_key(key);
        }
        message_builder.priority(match message.priority {
            Priority::Normal => fcm::Priority::Normal,
            Priority::High => fcm::Priority::High,
        });
        message_builder.dry_run(message.dry_run);

        let response = self.client.send(message_builder.finalize()).await?;
        debug!(
            "FCM multicast {:?}: {:?} succeeded, {:?} failed",
            response.multicast_id, response.success, response.failure
        );
        Ok(report_from_response(tokens, response))
    }
}

impl FirebaseCloudMessaging {
    pub fn new(api_key: &str) -> FirebaseCloudMessaging {
        FirebaseCloudMessaging {
            api_key: api_key.to_owned(),
            client: fcm::Client::new(),
        }
    }
}

/// Pairs each token with the result at the same position.
///
/// Tokens without a result take the top-level error of the response, or
/// `MissingResult` when FCM gave no reason at all.
fn report_from_response(tokens: &[String], response: FcmResponse) -> MulticastSendReport {
    let (missing_error, missing_message) = match &response.error {
        Some(reason) => (format!("{:?}", reason), describe(reason).map(str::to_owned)),
        None => (
            "MissingResult".to_owned(),
            Some("FCM returned no result for this token".to_owned()),
        ),
    };
    let mut results = response.results.unwrap_or_default().into_iter();
    let items = tokens
        .iter()
        .map(|token| match results.next() {
            Some(result) => item_from_result(token, result),
            None => SendReport::failure(token, &missing_error, missing_message.clone()),
        })
        .collect();
    MulticastSendReport::with_items(items)
}

fn item_from_result(token: &str, result: MessageResult) -> SendReport {
    match result.error {
        Some(reason) => SendReport::failure(
            token,
            &format!("{:?}", reason),
            describe(&reason).map(str::to_owned),
        ),
        None => SendReport::success(token, result.message_id),
    }
}

fn describe(reason: &ErrorReason) -> Option<&'static str> {
    match reason {
        ErrorReason::MissingRegistration => Some("The request did not contain a registration token"),
        ErrorReason::InvalidRegistration => Some("The registration token is not valid"),
        ErrorReason::NotRegistered => Some("The registration token is no longer registered"),
        ErrorReason::InvalidPackageName => Some("The token does not match the package name in the request"),
        ErrorReason::MismatchSenderId => Some("The token is tied to a different sender"),
        ErrorReason::InvalidParameters => Some("The request contained invalid parameters"),
        ErrorReason::MessageTooBig => Some("The message payload exceeds the size limit"),
        ErrorReason::InvalidDataKey => Some("The data payload uses a reserved key"),
        ErrorReason::InvalidTtl => Some("The time to live is out of range"),
        ErrorReason::Unavailable => Some("The FCM server was unavailable"),
        ErrorReason::InternalServerError => Some("The FCM server encountered an error"),
        ErrorReason::DeviceMessageRateExceeded => Some("Too many messages were sent to this device"),
        ErrorReason::TopicsMessageRateExceeded => Some("Too many messages were sent to this topic"),
        ErrorReason::InvalidApnsCredential => Some("The APNs credentials for this app are invalid"),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|t| t.to_string()).collect()
    }

    fn outcome(report: &MulticastSendReport) -> Vec<(&str, bool, Option<&str>)> {
        report
            .items()
            .iter()
            .map(|item| (item.target(), item.is_failure(), item.error()))
            .collect()
    }

    #[test]
    fn test_results_follow_token_order() {
        let json = r#"
            {
                "multicast_id": 7,
                "success": 2,
                "failure": 1,
                "canonical_ids": 0,
                "results": [
                    { "message_id": "0:1" },
                    { "error": "InvalidRegistration" },
                    { "message_id": "0:3" }
                ]
            }
        "#;
        let response = serde_json::from_str::<FcmResponse>(json).unwrap();
        let report = report_from_response(&tokens(&["A", "B", "C"]), response);
        assert_eq!(
            outcome(&report),
            vec![
                ("A", false, None),
                ("B", true, Some("InvalidRegistration")),
                ("C", false, None),
            ]
        );
        assert_eq!(report.items()[0].message_id(), Some("0:1"));
        assert_eq!(
            report.items()[1].message(),
            Some("The registration token is not valid")
        );
    }

    #[test]
    fn test_missing_results_are_failures() {
        let json = r#"
            {
                "results": [
                    { "message_id": "0:1" },
                    { "error": "NotRegistered" }
                ]
            }
        "#;
        let response = serde_json::from_str::<FcmResponse>(json).unwrap();
        let report = report_from_response(&tokens(&["A", "B", "C"]), response);
        assert_eq!(
            outcome(&report),
            vec![
                ("A", false, None),
                ("B", true, Some("NotRegistered")),
                ("C", true, Some("MissingResult")),
            ]
        );
    }

    #[test]
    fn test_top_level_error_applies_to_every_token() {
        let json = r#"{ "error": "InvalidApnsCredential" }"#;
        let response = serde_json::from_str::<FcmResponse>(json).unwrap();
        let report = report_from_response(&tokens(&["A", "B", "C"]), response);
        assert_eq!(report.failure_count(), 3);
        for item in report.items() {
            assert_eq!(item.error(), Some("InvalidApnsCredential"));
            assert_eq!(
                item.message(),
                Some("The APNs credentials for this app are invalid")
            );
        }
    }

    #[test]
    fn test_extra_results_are_ignored() {
        let json = r#"
            {
                "results": [
                    { "message_id": "0:1" },
                    { "error": "MismatchSenderId" },
                    { "error": "NotRegistered" }
                ]
            }
        "#;
        let response = serde_json::from_str::<FcmResponse>(json).unwrap();
        let report = report_from_response(&tokens(&["A", "B"]), response);
        assert_eq!(report.items().len(), 2);
        assert_eq!(
            outcome(&report),
            vec![("A", false, None), ("B", true, Some("MismatchSenderId"))]
        );
        assert_eq!(
            report.items()[1].message(),
            Some("The token is tied to a different sender")
        );
    }
}
