use serde::Serialize;

/// Outcome of delivering a message to one token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendReport {
    target: String,
    message_id: Option<String>,
    error: Option<String>,
    message: Option<String>,
}

impl SendReport {
    pub fn success(target: &str, message_id: Option<String>) -> SendReport {
        SendReport {
            target: target.to_owned(),
            message_id,
            error: None,
            message: None,
        }
    }

    pub fn failure(target: &str, error: &str, message: Option<String>) -> SendReport {
        SendReport {
            target: target.to_owned(),
            message_id: None,
            error: Some(error.to_owned()),
            message,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Reports for one batch, in the order the tokens were submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MulticastSendReport {
    items: Vec<SendReport>,
}

impl MulticastSendReport {
    pub fn with_items(items: Vec<SendReport>) -> MulticastSendReport {
        MulticastSendReport { items }
    }

    pub fn items(&self) -> &[SendReport] {
        &self.items
    }

    pub fn successes(&self) -> impl Iterator<Item = &SendReport> {
        self.items.iter().filter(|item| item.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SendReport> {
        self.items.iter().filter(|item| item.is_failure())
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn has_failures(&self) -> bool {
        self.items.iter().any(SendReport::is_failure)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_counts_follow_items() {
        let report = MulticastSendReport::with_items(vec![
            SendReport::success("A", Some("0:1".to_owned())),
            SendReport::failure("B", "NotRegistered", None),
            SendReport::success("C", None),
        ]);
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.failure_count(), 1);
        assert!(report.has_failures());
        let failed: Vec<&str> = report.failures().map(SendReport::target).collect();
        assert_eq!(failed, vec!["B"]);
    }

    #[test]
    fn test_failure_exposes_details() {
        let item = SendReport::failure("B", "InvalidRegistration", Some("bad token".to_owned()));
        assert!(item.is_failure());
        assert_eq!(item.error(), Some("InvalidRegistration"));
        assert_eq!(item.message(), Some("bad token"));
        assert_eq!(item.message_id(), None);
    }
}
