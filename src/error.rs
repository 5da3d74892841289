use thiserror::Error;

/// Errors raised while reading the environment configuration.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: String, reason: String },
}

/// Failure to obtain a client scoped to a selected project.
///
/// The channel recovers from every variant by falling back to the default client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("unknown FCM project '{0}'")]
    UnknownProject(String),

    #[error("FCM project '{0}' has no credentials configured")]
    MissingCredentials(String),
}

/// A batch send that failed outright, without a per-token report.
#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("FCM request failed: {0}")]
    Fcm(#[from] fcm::FcmError),

    #[error("could not encode message data: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("provider error: {0}")]
    Provider(String),
}

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("{failed_batches} of {total_batches} batches could not be sent: {source}")]
    Transport {
        failed_batches: usize,
        total_batches: usize,
        #[source]
        source: MessagingError,
    },
}

pub type Result<T> = std::result::Result<T, ChannelError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_transport_error_message() {
        let err = ChannelError::Transport {
            failed_batches: 1,
            total_batches: 3,
            source: MessagingError::Provider("unreachable".to_owned()),
        };
        assert_eq!(
            err.to_string(),
            "1 of 3 batches could not be sent: provider error: unreachable"
        );
    }

    #[test]
    fn test_resolution_error_message() {
        assert_eq!(
            ResolutionError::UnknownProject("beta".to_owned()).to_string(),
            "unknown FCM project 'beta'"
        );
    }
}
