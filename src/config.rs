use crate::host::{DocRef, Doctype};
use crate::playback::keymap::normalize_key;
use crate::playback::SurfaceKind;
use thiserror::Error;

pub const DEFAULT_SITE_URL: &str = "http://localhost:8000";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration
/// In debug builds: loads a .env file first, then reads the environment
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the host site
    pub site_url: String,
    /// Token auth pair; both must be set to authenticate
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    /// Playback surface the player widget mounts
    pub surface: SurfaceKind,
    /// Key value that toggles play/pause (already normalized, " " for space)
    pub toggle_key: String,
    /// Document opened when the app starts
    pub start_document: Option<DocRef>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            api_key: None,
            api_secret: None,
            surface: SurfaceKind::default(),
            toggle_key: " ".to_string(),
            start_document: None,
        }
    }
}

impl Config {
    /// Load configuration based on build mode
    pub fn load() -> Result<Self, ConfigError> {
        #[cfg(debug_assertions)]
        {
            if dotenvy::dotenv().is_ok() {
                tracing::info!("Config: Dev mode activated - loaded .env file");
            } else {
                tracing::debug!("Config: No .env file found");
            }
        }

        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(site_url) = get("DRIFT_SITE_URL") {
            config.site_url = site_url.trim().to_string();
        }
        config.api_key = get("DRIFT_API_KEY");
        config.api_secret = get("DRIFT_API_SECRET");

        if let Some(value) = get("DRIFT_PLAYER_SURFACE") {
            config.surface = value.parse().map_err(|_| ConfigError::Invalid {
                key: "DRIFT_PLAYER_SURFACE",
                value: value.clone(),
            })?;
        }

        // Space is significant here, so read the raw value
        if let Some(value) = lookup("DRIFT_TOGGLE_KEY").filter(|v| !v.is_empty()) {
            config.toggle_key = normalize_key(&value).ok_or(ConfigError::Invalid {
                key: "DRIFT_TOGGLE_KEY",
                value: value.clone(),
            })?;
        }

        config.start_document = match (get("DRIFT_DOCTYPE"), get("DRIFT_DOCNAME")) {
            (Some(doctype), Some(name)) => {
                let doctype: Doctype = doctype.parse().map_err(|value| ConfigError::Invalid {
                    key: "DRIFT_DOCTYPE",
                    value,
                })?;
                Some(DocRef::new(doctype, name.trim()))
            }
            _ => None,
        };

        Ok(config)
    }
}
