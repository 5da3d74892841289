#[macro_use]
extern crate log;

pub mod channel;
pub mod config;
pub mod error;
pub mod events;
pub mod messaging;
pub mod notification;

pub use channel::{FcmChannel, CHANNEL_NAME, TOKENS_PER_REQUEST};
pub use config::FcmConfig;
pub use error::{ChannelError, ConfigError, MessagingError, ResolutionError};
pub use events::{
    ChannelEventDispatcher, EventDispatcher, FailureDetails, LogEventDispatcher, NotificationFailed,
};
pub use messaging::client::MessagingClient;
pub use messaging::firebase::FirebaseCloudMessaging;
pub use messaging::manager::MessagingManager;
pub use messaging::message::{FcmMessage, Priority};
pub use messaging::report::{MulticastSendReport, SendReport};
pub use notification::{FcmNotification, Notifiable, Tokens};
