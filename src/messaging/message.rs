use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
}

impl Default for Priority {
    fn default() -> Priority {
        Priority::Normal
    }
}

/// The visible part of a push message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FcmNotificationBody {
    pub title: Option<String>,
    pub body: Option<String>,
    pub icon: Option<String>,
    pub sound: Option<String>,
    pub click_action: Option<String>,
}

/// Payload sent to every token of a notification.
///
/// Built once per send and shared unmodified by all batches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FcmMessage {
    #[serde(default)]
    pub notification: Option<FcmNotificationBody>,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub collapse_key: Option<String>,
    #[serde(default)]
    pub dry_run: bool,
}

impl FcmMessage {
    pub fn new() -> FcmMessage {
        FcmMessage::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.notification_mut().title = Some(title.to_owned());
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.notification_mut().body = Some(body.to_owned());
        self
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.notification_mut().icon = Some(icon.to_owned());
        self
    }

    pub fn sound(mut self, sound: &str) -> Self {
        self.notification_mut().sound = Some(sound.to_owned());
        self
    }

    pub fn click_action(mut self, action: &str) -> Self {
        self.notification_mut().click_action = Some(action.to_owned());
        self
    }

    pub fn data<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.data.insert(key.to_owned(), value.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn collapse_key(mut self, key: &str) -> Self {
        self.collapse_key = Some(key.to_owned());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn notification_mut(&mut self) -> &mut FcmNotificationBody {
        self.notification.get_or_insert_with(Default::default)
    }
}
