use std::env;

use dotenv::dotenv;

use crate::error::ConfigError;

/// FCM credentials read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct FcmConfig {
    /// Server key of the default project.
    pub api_key: String,
    /// Named projects and their server keys, in declaration order.
    pub projects: Vec<(String, Option<String>)>,
}

impl FcmConfig {
    /// Reads `FCM_API_KEY`, `FCM_PROJECTS` and `FCM_PROJECT_<NAME>_API_KEY`,
    /// loading a `.env` file first when one exists.
    pub fn from_env() -> Result<FcmConfig, ConfigError> {
        dotenv().ok();
        FcmConfig::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<FcmConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("FCM_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing("FCM_API_KEY".to_owned()))?;

        let mut projects: Vec<(String, Option<String>)> = Vec::new();
        for name in lookup("FCM_PROJECTS").unwrap_or_default().split(',') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            if projects.iter().any(|(known, _)| known == name) {
                return Err(ConfigError::Invalid {
                    name: "FCM_PROJECTS".to_owned(),
                    reason: format!("project '{}' is listed twice", name),
                });
            }
            let key = lookup(&project_key_var(name)).filter(|key| !key.trim().is_empty());
            if key.is_none() {
                warn!("FCM project '{}' has no API key configured", name);
            }
            projects.push((name.to_owned(), key));
        }

        Ok(FcmConfig { api_key, projects })
    }
}

fn project_key_var(project: &str) -> String {
    format!(
        "FCM_PROJECT_{}_API_KEY",
        project.to_uppercase().replace('-', "_")
    )
}
