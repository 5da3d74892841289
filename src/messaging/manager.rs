use std::collections::HashMap;
use std::sync::Arc;

use super::client::MessagingClient;
use super::firebase::FirebaseCloudMessaging;
use crate::config::FcmConfig;
use crate::error::ResolutionError;

/// Holds the default messaging client and the clients of named projects.
///
/// Built once at startup and shared read-only afterwards.
pub struct MessagingManager {
    default: Arc<dyn MessagingClient>,
    projects: HashMap<String, Option<Arc<dyn MessagingClient>>>,
}

impl MessagingManager {
    pub fn new(default: Arc<dyn MessagingClient>) -> MessagingManager {
        MessagingManager {
            default,
            projects: HashMap::new(),
        }
    }

    pub fn from_config(config: &FcmConfig) -> MessagingManager {
        let mut manager = MessagingManager::new(Arc::new(FirebaseCloudMessaging::new(&config.api_key)));
        for (name, api_key) in &config.projects {
            match api_key {
                Some(key) => {
                    manager = manager.with_project(name, Arc::new(FirebaseCloudMessaging::new(key)))
                }
                None => manager = manager.with_unconfigured_project(name),
            }
        }
        info!(
            "Configured FCM messaging with {} named project(s)",
            manager.projects.len()
        );
        manager
    }

    pub fn with_project(mut self, name: &str, client: Arc<dyn MessagingClient>) -> Self {
        self.projects.insert(name.to_owned(), Some(client));
        self
    }

    /// Registers a project that is known but has no usable credentials.
    pub fn with_unconfigured_project(mut self, name: &str) -> Self {
        self.projects.insert(name.to_owned(), None);
        self
    }

    /// Client scoped to the named project.
    pub fn project(&self, name: &str) -> Result<Arc<dyn MessagingClient>, ResolutionError> {
        match self.projects.get(name) {
            Some(Some(client)) => Ok(client.clone()),
            Some(None) => Err(ResolutionError::MissingCredentials(name.to_owned())),
            None => Err(ResolutionError::UnknownProject(name.to_owned())),
        }
    }

    /// Client of the default project.
    pub fn messaging(&self) -> Arc<dyn MessagingClient> {
        self.default.clone()
    }
}
