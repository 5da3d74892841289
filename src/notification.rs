use std::iter::FromIterator;
use std::vec;

use crate::messaging::message::FcmMessage;

/// Device tokens a recipient resolves for a channel.
///
/// A single token is wrapped into a one-element list and `None` becomes an
/// empty list, so callers can return whichever shape they have at hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokens(Vec<String>);

impl Tokens {
    pub fn none() -> Tokens {
        Tokens(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<String> for Tokens {
    fn from(token: String) -> Tokens {
        Tokens(vec![token])
    }
}

impl From<&str> for Tokens {
    fn from(token: &str) -> Tokens {
        Tokens(vec![token.to_owned()])
    }
}

impl From<Vec<String>> for Tokens {
    fn from(tokens: Vec<String>) -> Tokens {
        Tokens(tokens)
    }
}

impl From<Vec<&str>> for Tokens {
    fn from(tokens: Vec<&str>) -> Tokens {
        tokens.into_iter().collect()
    }
}

impl<T: Into<Tokens>> From<Option<T>> for Tokens {
    fn from(tokens: Option<T>) -> Tokens {
        tokens.map(Into::into).unwrap_or_default()
    }
}

impl<S: Into<String>> FromIterator<S> for Tokens {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Tokens {
        Tokens(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for Tokens {
    type Item = String;
    type IntoIter = vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// An entity notifications are sent to.
pub trait Notifiable: Send + Sync {
    /// Tokens to deliver to for the named channel.
    fn route_notification_for(&self, channel: &str, notification: &dyn FcmNotification) -> Tokens;
}

/// A notification that can be delivered over FCM.
pub trait FcmNotification: Send + Sync {
    fn to_fcm(&self, notifiable: &dyn Notifiable) -> FcmMessage;

    /// Selects the FCM project to send through. `None` uses the default project.
    fn fcm_project(&self, _notifiable: &dyn Notifiable, _message: &FcmMessage) -> Option<String> {
        None
    }
}
