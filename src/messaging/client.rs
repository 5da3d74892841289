use async_trait::async_trait;

use super::message::FcmMessage;
use super::report::MulticastSendReport;
use crate::error::MessagingError;

#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Sends `message` to every token in one provider call.
    ///
    /// The returned report holds one item per token, in the same order.
    async fn send_multicast(
        &self,
        message: &FcmMessage,
        tokens: &[String],
    ) -> Result<MulticastSendReport, MessagingError>;
}
