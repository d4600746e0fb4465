//! Configuration management for oubridge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Customer scope used when no explicit customer id is configured.
///
/// `my_customer` is the Directory API alias for "the customer the authorized
/// account belongs to".
pub const DEFAULT_CUSTOMER: &str = "my_customer";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Workspace customer id (defaults to `my_customer`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    /// Path to the OAuth client credentials JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,

    /// Cached OAuth token state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<StoredToken>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// Cached OAuth token with expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    /// Short-lived access token
    pub access_token: String,

    /// Long-lived refresh token, when the grant included one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Access token expiration time
    pub expires_at: DateTime<Utc>,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default script output path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("config.yaml"))
    }

    /// Get the oubridge home directory (`~/.oubridge`)
    pub fn home_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".oubridge"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path override
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional path override
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        let path = Self::resolve_path(path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Token material lives in this file; keep it private on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Resolve the credentials file path, with an optional CLI override
    pub fn credentials_path(&self, override_path: Option<&str>) -> Result<PathBuf> {
        if let Some(p) = override_path {
            return Ok(PathBuf::from(p));
        }
        if let Some(ref p) = self.credentials_path {
            return Ok(p.clone());
        }
        Ok(Self::home_dir()?.join("credentials.json"))
    }

    /// Resolve the customer id, with an optional CLI override
    pub fn customer_id(&self, override_id: Option<&str>) -> String {
        override_id
            .or(self.customer_id.as_deref())
            .unwrap_or(DEFAULT_CUSTOMER)
            .to_string()
    }

    /// Check if the cached access token is expired or will expire soon
    /// (within 1 minute)
    pub fn is_token_expired(&self) -> bool {
        match &self.token {
            None => true,
            Some(token) => {
                let now = Utc::now();
                let buffer = chrono::Duration::minutes(1);
                token.expires_at - buffer < now
            }
        }
    }
}
